//! The constraint language and top-level queries.
//!
//! A [`Query`] is a conjunction of [`ConstraintExpr`] trees, optionally
//! scoped to a [`DataModel`]. Leaves bind an attribute name to a
//! [`ConstraintType`], an operator paired with a typed operand.
//!
//! # Example
//!
//! ```rust
//! use meridian_search::models::{Attribute, AttributeType, DataModel, Description};
//! use meridian_search::query::{ConstraintExpr, ConstraintType, Query};
//!
//! let model = DataModel::new("book", vec![Attribute::new("year", AttributeType::Integer, true)])?;
//! let query = Query::new(
//!     vec![ConstraintExpr::constraint("year", ConstraintType::greater_than(2000))],
//!     Some(model.clone()),
//! )?;
//!
//! let book = Description::with_data_model([("year", 2005)], model)?;
//! assert!(query.check(&book));
//! # Ok::<(), meridian_search::error::SchemaError>(())
//! ```

pub mod constraint_type;
pub mod expr;
pub mod operand;

use std::fmt;

use tracing::warn;

use crate::error::SchemaError;
use crate::models::{DataModel, Description};

pub use constraint_type::{ConstraintOperator, ConstraintType};
pub use expr::{Constraint, ConstraintExpr, MAX_EXPRESSION_DEPTH};
pub use operand::{Distance, Operand, OrderedValue, Range, ScalarValue, ValueSet};

/// A conjunction of constraint expressions with an optional target model.
///
/// Equality compares the constraints and the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    constraints: Vec<ConstraintExpr>,
    model: Option<DataModel>,
}

impl Query {
    /// Creates a query.
    ///
    /// An empty constraint list is accepted and matches every description,
    /// but is deprecated: a warning is logged and
    /// [`Query::is_deprecated_empty`] reports it.
    ///
    /// # Errors
    /// * `SchemaError::ExpressionTooDeep` - If an expression nests deeper than [`MAX_EXPRESSION_DEPTH`]
    /// * `SchemaError::TooFewSubexpressions` - If an `And`/`Or` node has fewer than two children
    /// * `SchemaError::InvalidQuery` - If a constraint is not valid against `model`
    pub fn new(constraints: Vec<ConstraintExpr>, model: Option<DataModel>) -> Result<Self, SchemaError> {
        constraints.iter().try_for_each(ConstraintExpr::check_validity)?;

        let query = Self { constraints, model };
        if let Some(model) = &query.model
            && !query.is_valid(Some(model))
        {
            return Err(SchemaError::InvalidQuery(model.name().to_string()));
        }

        if query.constraints.is_empty() {
            warn!(
                "Query has no constraints. Empty queries are deprecated and will match every description"
            );
        }

        Ok(query)
    }

    /// Top-level constraints.
    pub fn constraints(&self) -> &[ConstraintExpr] {
        &self.constraints
    }

    /// Target data model, if any.
    pub fn model(&self) -> Option<&DataModel> {
        self.model.as_ref()
    }

    /// Whether the query was built without constraints.
    pub fn is_deprecated_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Whether the description satisfies every constraint.
    pub fn check(&self, description: &Description) -> bool {
        self.constraints.iter().all(|constraint| constraint.check(description))
    }

    /// Whether every constraint is valid against `model`. Always true without one.
    pub fn is_valid(&self, model: Option<&DataModel>) -> bool {
        model.is_none_or(|model| self.constraints.iter().all(|constraint| constraint.is_valid(model)))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Query(constraints=[")?;
        for (index, constraint) in self.constraints.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{constraint}")?;
        }
        f.write_str("],model=")?;
        match &self.model {
            Some(model) => write!(f, "{model})"),
            None => f.write_str("None)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attribute, AttributeType, AttributeValue};
    use std::collections::BTreeMap;

    fn book_model() -> DataModel {
        DataModel::new(
            "book",
            vec![
                Attribute::new("year", AttributeType::Integer, true),
                Attribute::new("author", AttributeType::String, false),
            ],
        )
        .unwrap()
    }

    fn after_2000() -> ConstraintExpr {
        ConstraintExpr::constraint("year", ConstraintType::greater_than(2000))
    }

    #[test]
    fn test_check_is_conjunction() {
        let query = Query::new(
            vec![
                after_2000(),
                ConstraintExpr::constraint("author", ConstraintType::equal("Stephen King")),
            ],
            Some(book_model()),
        )
        .unwrap();

        let book = |author: &str| {
            Description::with_data_model(
                [("year", AttributeValue::from(2005)), ("author", author.into())],
                book_model(),
            )
            .unwrap()
        };
        let matching = book("Stephen King");
        let wrong_author = book("Orwell");
        assert!(query.check(&matching));
        assert!(!query.check(&wrong_author));
    }

    #[test]
    fn test_invalid_query_rejected() {
        let result = Query::new(
            vec![ConstraintExpr::constraint("nonexistent_attr", ConstraintType::equal(1))],
            Some(book_model()),
        );
        assert_eq!(result.unwrap_err(), SchemaError::InvalidQuery("book".to_string()));

        let result = Query::new(
            vec![ConstraintExpr::constraint("year", ConstraintType::equal("2000"))],
            Some(book_model()),
        );
        assert!(matches!(result, Err(SchemaError::InvalidQuery(_))));
    }

    #[test]
    fn test_query_without_model_accepts_anything() {
        let unknown = ConstraintExpr::constraint("nonexistent_attr", ConstraintType::equal(1));
        let query = Query::new(vec![unknown], None).unwrap();
        assert!(query.is_valid(None));
        assert!(!query.is_valid(Some(&book_model())));
    }

    #[test]
    fn test_valid_after_construction() {
        let model = book_model();
        let query = Query::new(vec![after_2000()], Some(model.clone())).unwrap();
        assert!(query.is_valid(Some(&model)));
        assert!(query.is_valid(query.model()));
    }

    #[test]
    fn test_undersized_expression_rejected() {
        let undersized = ConstraintExpr::not(ConstraintExpr::And(vec![after_2000()]));
        let result = Query::new(vec![undersized], None);
        assert!(matches!(result, Err(SchemaError::TooFewSubexpressions { kind: "And", found: 1 })));
    }

    fn nested_not(levels: usize) -> ConstraintExpr {
        (0..levels).fold(after_2000(), |expr, _| ConstraintExpr::not(expr))
    }

    #[test]
    fn test_depth_at_bound_accepted() {
        let expr = nested_not(MAX_EXPRESSION_DEPTH - 1);
        assert_eq!(expr.depth(), MAX_EXPRESSION_DEPTH);
        assert!(Query::new(vec![expr], None).is_ok());
    }

    #[test]
    fn test_depth_past_bound_rejected() {
        let expr = nested_not(MAX_EXPRESSION_DEPTH);
        assert_eq!(
            Query::new(vec![expr], None).unwrap_err(),
            SchemaError::ExpressionTooDeep {
                max: MAX_EXPRESSION_DEPTH,
                found: MAX_EXPRESSION_DEPTH + 1
            }
        );

        let wide =
            ConstraintExpr::and(vec![after_2000(), nested_not(MAX_EXPRESSION_DEPTH - 1)]).unwrap();
        assert!(matches!(
            Query::new(vec![wide], None),
            Err(SchemaError::ExpressionTooDeep { found, .. }) if found == MAX_EXPRESSION_DEPTH + 1
        ));
    }

    #[test]
    fn test_empty_query_is_vacuous_and_flagged() {
        let query = Query::new(Vec::new(), None).unwrap();
        assert!(query.is_deprecated_empty());
        let empty = Description::new(BTreeMap::<String, AttributeValue>::new()).unwrap();
        assert!(query.check(&empty));

        let query = Query::new(vec![after_2000()], None).unwrap();
        assert!(!query.is_deprecated_empty());
    }

    #[test]
    fn test_equality() {
        let a = Query::new(vec![after_2000()], Some(book_model())).unwrap();
        let b = Query::new(vec![after_2000()], Some(book_model())).unwrap();
        let c = Query::new(vec![after_2000()], None).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display() {
        let query = Query::new(vec![after_2000()], None).unwrap();
        assert_eq!(
            query.to_string(),
            "Query(constraints=[Constraint(attribute_name=year,constraint_type=ConstraintType(value=2000,type=>))],model=None)"
        );
    }
}
