//! Boolean expressions over attribute constraints.

use std::fmt;

use super::constraint_type::ConstraintType;
use crate::error::SchemaError;
use crate::models::{DataModel, Description};

/// Deepest expression tree a query accepts.
///
/// Every level costs two nested protobuf messages and a leaf costs up to
/// five more, so a tree at this depth stays well inside prost's decode
/// recursion limit of 100.
pub const MAX_EXPRESSION_DEPTH: usize = 32;

/// An atomic predicate binding one attribute name to a [`ConstraintType`].
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    attribute_name: String,
    constraint_type: ConstraintType,
}

impl Constraint {
    /// Creates a constraint on `attribute_name`.
    pub fn new(attribute_name: impl Into<String>, constraint_type: ConstraintType) -> Self {
        Self { attribute_name: attribute_name.into(), constraint_type }
    }

    /// Name of the constrained attribute.
    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    /// The operator and operand.
    pub fn constraint_type(&self) -> &ConstraintType {
        &self.constraint_type
    }

    /// Whether the description satisfies the constraint.
    ///
    /// An absent attribute, or a value whose type differs from the operand
    /// type, is a non-match.
    pub fn check(&self, description: &Description) -> bool {
        let Some(value) = description.value(&self.attribute_name) else {
            return false;
        };
        if value.attribute_type() != self.constraint_type.data_type() {
            return false;
        }
        matches!(self.constraint_type.check(value), Ok(true))
    }

    /// Whether the model declares the attribute with a compatible type.
    pub fn is_valid(&self, data_model: &DataModel) -> bool {
        data_model
            .attribute(&self.attribute_name)
            .is_some_and(|attribute| self.constraint_type.is_valid(attribute))
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Constraint(attribute_name={},constraint_type={})",
            self.attribute_name, self.constraint_type
        )
    }
}

/// A boolean expression tree of constraints.
///
/// `And` and `Or` need at least two children. The checked constructors
/// enforce this; trees assembled from the variants directly are verified by
/// [`ConstraintExpr::check_validity`], which [`Query::new`](super::Query::new)
/// runs on every expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintExpr {
    /// All children hold.
    And(Vec<ConstraintExpr>),
    /// At least one child holds.
    Or(Vec<ConstraintExpr>),
    /// The child does not hold.
    Not(Box<ConstraintExpr>),
    /// Leaf constraint.
    Constraint(Constraint),
}

impl ConstraintExpr {
    /// Conjunction.
    ///
    /// # Errors
    /// * `SchemaError::TooFewSubexpressions` - If fewer than two children are given
    pub fn and(children: Vec<Self>) -> Result<Self, SchemaError> {
        ensure_arity("And", &children)?;
        Ok(Self::And(children))
    }

    /// Disjunction.
    ///
    /// # Errors
    /// * `SchemaError::TooFewSubexpressions` - If fewer than two children are given
    pub fn or(children: Vec<Self>) -> Result<Self, SchemaError> {
        ensure_arity("Or", &children)?;
        Ok(Self::Or(children))
    }

    /// Negation.
    #[allow(clippy::should_implement_trait)]
    pub fn not(child: Self) -> Self {
        Self::Not(Box::new(child))
    }

    /// Leaf constraint on `attribute_name`.
    pub fn constraint(attribute_name: impl Into<String>, constraint_type: ConstraintType) -> Self {
        Self::Constraint(Constraint::new(attribute_name, constraint_type))
    }

    /// Whether the description satisfies the expression.
    pub fn check(&self, description: &Description) -> bool {
        match self {
            Self::And(children) => children.iter().all(|child| child.check(description)),
            Self::Or(children) => children.iter().any(|child| child.check(description)),
            Self::Not(child) => !child.check(description),
            Self::Constraint(constraint) => constraint.check(description),
        }
    }

    /// Whether every leaf is valid against the model.
    pub fn is_valid(&self, data_model: &DataModel) -> bool {
        match self {
            Self::And(children) | Self::Or(children) => {
                children.iter().all(|child| child.is_valid(data_model))
            }
            Self::Not(child) => child.is_valid(data_model),
            Self::Constraint(constraint) => constraint.is_valid(data_model),
        }
    }

    /// Nesting depth of the tree. A leaf constraint has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Self::And(children) | Self::Or(children) => {
                1 + children.iter().map(Self::depth).max().unwrap_or(0)
            }
            Self::Not(child) => 1 + child.depth(),
            Self::Constraint(_) => 1,
        }
    }

    /// Verifies the nesting depth of the tree and the arity of every `And`
    /// and `Or` node.
    ///
    /// # Errors
    /// * `SchemaError::ExpressionTooDeep` - If the tree nests deeper than [`MAX_EXPRESSION_DEPTH`]
    /// * `SchemaError::TooFewSubexpressions` - For the first undersized node found
    pub fn check_validity(&self) -> Result<(), SchemaError> {
        let found = self.depth();
        if found > MAX_EXPRESSION_DEPTH {
            return Err(SchemaError::ExpressionTooDeep { max: MAX_EXPRESSION_DEPTH, found });
        }
        self.check_arity()
    }

    fn check_arity(&self) -> Result<(), SchemaError> {
        match self {
            Self::And(children) => {
                ensure_arity("And", children)?;
                children.iter().try_for_each(Self::check_arity)
            }
            Self::Or(children) => {
                ensure_arity("Or", children)?;
                children.iter().try_for_each(Self::check_arity)
            }
            Self::Not(child) => child.check_arity(),
            Self::Constraint(_) => Ok(()),
        }
    }
}

fn ensure_arity(kind: &'static str, children: &[ConstraintExpr]) -> Result<(), SchemaError> {
    if children.len() < 2 {
        return Err(SchemaError::TooFewSubexpressions { kind, found: children.len() });
    }
    Ok(())
}

impl From<Constraint> for ConstraintExpr {
    fn from(constraint: Constraint) -> Self {
        Self::Constraint(constraint)
    }
}

impl fmt::Display for ConstraintExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, children) = match self {
            Self::And(children) => ("And", children.as_slice()),
            Self::Or(children) => ("Or", children.as_slice()),
            Self::Not(child) => return write!(f, "Not({child})"),
            Self::Constraint(constraint) => return write!(f, "{constraint}"),
        };
        write!(f, "{name}([")?;
        for (index, child) in children.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{child}")?;
        }
        f.write_str("])")
    }
}
