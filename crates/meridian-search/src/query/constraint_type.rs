//! Operators and their typed operands.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::operand::{Distance, Operand, OrderedValue, Range, ScalarValue, ValueSet};
use crate::error::{EvaluationError, SchemaError};
use crate::models::{Attribute, AttributeType, AttributeValue, Location};

/// The operator of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintOperator {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEq,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEq,
    /// Inclusive range membership.
    Within,
    /// Set membership.
    In,
    /// Set non-membership.
    NotIn,
    /// Great-circle distance from a center.
    Distance,
}

impl ConstraintOperator {
    /// All operators.
    pub const ALL: [Self; 10] = [
        Self::Equal,
        Self::NotEqual,
        Self::LessThan,
        Self::LessThanEq,
        Self::GreaterThan,
        Self::GreaterThanEq,
        Self::Within,
        Self::In,
        Self::NotIn,
        Self::Distance,
    ];

    /// The operator symbol.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanEq => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanEq => ">=",
            Self::Within => "within",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::Distance => "distance",
        }
    }
}

impl fmt::Display for ConstraintOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstraintOperator {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownOperator(s.to_string()))
    }
}

/// An operator paired with an operand of the shape it requires.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintType {
    /// Value equals the operand.
    Equal(ScalarValue),
    /// Value differs from the operand.
    NotEqual(ScalarValue),
    /// Value is strictly less than the operand.
    LessThan(OrderedValue),
    /// Value is less than or equal to the operand.
    LessThanEq(OrderedValue),
    /// Value is strictly greater than the operand.
    GreaterThan(OrderedValue),
    /// Value is greater than or equal to the operand.
    GreaterThanEq(OrderedValue),
    /// Value lies in the inclusive range.
    Within(Range),
    /// Value is a member of the set.
    In(ValueSet),
    /// Value is not a member of the set.
    NotIn(ValueSet),
    /// Location lies within the radius of the center.
    Distance(Distance),
}

impl ConstraintType {
    /// Builds a constraint type from an operator and an untyped operand.
    ///
    /// # Errors
    /// * `SchemaError::InvalidConstraintType` - If the operand shape or type
    ///   is not accepted by the operator
    pub fn new(operator: ConstraintOperator, operand: Operand) -> Result<Self, SchemaError> {
        use ConstraintOperator as Op;

        match (operator, operand) {
            (Op::Equal, Operand::Value(v)) => Ok(Self::Equal(v.try_into()?)),
            (Op::NotEqual, Operand::Value(v)) => Ok(Self::NotEqual(v.try_into()?)),
            (Op::LessThan, Operand::Value(v)) => Ok(Self::LessThan(v.try_into()?)),
            (Op::LessThanEq, Operand::Value(v)) => Ok(Self::LessThanEq(v.try_into()?)),
            (Op::GreaterThan, Operand::Value(v)) => Ok(Self::GreaterThan(v.try_into()?)),
            (Op::GreaterThanEq, Operand::Value(v)) => Ok(Self::GreaterThanEq(v.try_into()?)),
            (Op::Within, Operand::Tuple(values)) => {
                let [low, high]: [AttributeValue; 2] = values.try_into().map_err(|v: Vec<_>| {
                    SchemaError::InvalidConstraintType(format!("Expected length=2, got {}", v.len()))
                })?;
                Ok(Self::Within(Range::try_from((low, high))?))
            }
            (Op::In, Operand::Tuple(values)) => Ok(Self::In(values.try_into()?)),
            (Op::NotIn, Operand::Tuple(values)) => Ok(Self::NotIn(values.try_into()?)),
            (Op::Distance, Operand::Tuple(values)) => Ok(Self::Distance(values.try_into()?)),
            (op, Operand::Value(v)) => Err(SchemaError::InvalidConstraintType(format!(
                "Expected tuple for '{op}', got {v}"
            ))),
            (op, Operand::Tuple(_)) => Err(SchemaError::InvalidConstraintType(format!(
                "Expected a single value for '{op}', got a tuple"
            ))),
        }
    }

    /// `==` constraint.
    pub fn equal(value: impl Into<ScalarValue>) -> Self {
        Self::Equal(value.into())
    }

    /// `!=` constraint.
    pub fn not_equal(value: impl Into<ScalarValue>) -> Self {
        Self::NotEqual(value.into())
    }

    /// `<` constraint.
    pub fn less_than(value: impl Into<OrderedValue>) -> Self {
        Self::LessThan(value.into())
    }

    /// `<=` constraint.
    pub fn less_than_eq(value: impl Into<OrderedValue>) -> Self {
        Self::LessThanEq(value.into())
    }

    /// `>` constraint.
    pub fn greater_than(value: impl Into<OrderedValue>) -> Self {
        Self::GreaterThan(value.into())
    }

    /// `>=` constraint.
    pub fn greater_than_eq(value: impl Into<OrderedValue>) -> Self {
        Self::GreaterThanEq(value.into())
    }

    /// `within` constraint over an inclusive range.
    pub fn within(range: impl Into<Range>) -> Self {
        Self::Within(range.into())
    }

    /// `in` constraint.
    pub fn is_in(set: impl Into<ValueSet>) -> Self {
        Self::In(set.into())
    }

    /// `not_in` constraint.
    pub fn not_in(set: impl Into<ValueSet>) -> Self {
        Self::NotIn(set.into())
    }

    /// `distance` constraint with the radius in kilometers.
    pub fn distance(center: Location, radius: f64) -> Self {
        Self::Distance(Distance::new(center, radius))
    }

    /// The operator.
    pub fn operator(&self) -> ConstraintOperator {
        match self {
            Self::Equal(_) => ConstraintOperator::Equal,
            Self::NotEqual(_) => ConstraintOperator::NotEqual,
            Self::LessThan(_) => ConstraintOperator::LessThan,
            Self::LessThanEq(_) => ConstraintOperator::LessThanEq,
            Self::GreaterThan(_) => ConstraintOperator::GreaterThan,
            Self::GreaterThanEq(_) => ConstraintOperator::GreaterThanEq,
            Self::Within(_) => ConstraintOperator::Within,
            Self::In(_) => ConstraintOperator::In,
            Self::NotIn(_) => ConstraintOperator::NotIn,
            Self::Distance(_) => ConstraintOperator::Distance,
        }
    }

    /// The type of values this constraint can be meaningfully checked against.
    pub fn data_type(&self) -> AttributeType {
        match self {
            Self::Equal(v) | Self::NotEqual(v) => v.data_type(),
            Self::LessThan(v) | Self::LessThanEq(v) | Self::GreaterThan(v) | Self::GreaterThanEq(v) => {
                v.data_type()
            }
            Self::Within(range) => range.data_type(),
            Self::In(set) | Self::NotIn(set) => set.data_type(),
            Self::Distance(_) => AttributeType::Location,
        }
    }

    /// Whether the constraint can apply to values of `attribute`.
    pub fn is_valid(&self, attribute: &Attribute) -> bool {
        self.data_type() == attribute.attribute_type()
    }

    /// Checks a value against the constraint.
    ///
    /// Equality and set membership treat a value of another type as unequal
    /// and not a member.
    ///
    /// # Errors
    /// * `EvaluationError::TypeMismatch` - If an ordering, range or distance
    ///   constraint is checked against a value of another type
    pub fn check(&self, value: &AttributeValue) -> Result<bool, EvaluationError> {
        match self {
            Self::Equal(operand) => Ok(operand.matches(value)),
            Self::NotEqual(operand) => Ok(!operand.matches(value)),
            Self::LessThan(operand) => {
                Ok(self.compare(operand, value)? == Some(Ordering::Less))
            }
            Self::LessThanEq(operand) => Ok(matches!(
                self.compare(operand, value)?,
                Some(Ordering::Less | Ordering::Equal)
            )),
            Self::GreaterThan(operand) => {
                Ok(self.compare(operand, value)? == Some(Ordering::Greater))
            }
            Self::GreaterThanEq(operand) => Ok(matches!(
                self.compare(operand, value)?,
                Some(Ordering::Greater | Ordering::Equal)
            )),
            Self::Within(range) => {
                self.expect_type(value)?;
                Ok(range.contains(value))
            }
            Self::In(set) => Ok(set.contains(value)),
            Self::NotIn(set) => Ok(!set.contains(value)),
            Self::Distance(distance) => match value {
                AttributeValue::Location(location) => Ok(distance.contains(location)),
                _ => Err(self.mismatch(value)),
            },
        }
    }

    fn compare(
        &self,
        operand: &OrderedValue,
        value: &AttributeValue,
    ) -> Result<Option<Ordering>, EvaluationError> {
        self.expect_type(value)?;
        Ok(operand.compare(value))
    }

    fn expect_type(&self, value: &AttributeValue) -> Result<(), EvaluationError> {
        if value.attribute_type() == self.data_type() {
            Ok(())
        } else {
            Err(self.mismatch(value))
        }
    }

    fn mismatch(&self, value: &AttributeValue) -> EvaluationError {
        EvaluationError::TypeMismatch {
            operator: self.operator().to_string(),
            operand: self.data_type(),
            value: value.attribute_type(),
        }
    }
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConstraintType(value=")?;
        match self {
            Self::Equal(v) | Self::NotEqual(v) => write!(f, "{v}")?,
            Self::LessThan(v) | Self::LessThanEq(v) | Self::GreaterThan(v) | Self::GreaterThanEq(v) => {
                write!(f, "{v}")?;
            }
            Self::Within(range) => write!(f, "{range}")?,
            Self::In(set) | Self::NotIn(set) => write!(f, "{set}")?,
            Self::Distance(distance) => write!(f, "{distance}")?,
        }
        write!(f, ",type={})", self.operator())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_symbols_round_trip() {
        for op in ConstraintOperator::ALL {
            assert_eq!(op.as_str().parse::<ConstraintOperator>().unwrap(), op);
        }
        assert_eq!(
            "~=".parse::<ConstraintOperator>().unwrap_err(),
            SchemaError::UnknownOperator("~=".to_string())
        );
    }

    #[test]
    fn test_new_accepts_valid_operands() {
        let op = |s: &str| s.parse::<ConstraintOperator>().unwrap();
        assert_eq!(
            ConstraintType::new(op("=="), Operand::value(3)).unwrap(),
            ConstraintType::equal(3)
        );
        assert_eq!(
            ConstraintType::new(op(">"), Operand::value(1.5)).unwrap(),
            ConstraintType::greater_than(1.5)
        );
        assert_eq!(
            ConstraintType::new(op("within"), Operand::tuple([2000, 2010])).unwrap(),
            ConstraintType::within((2000, 2010))
        );
        assert_eq!(
            ConstraintType::new(op("in"), Operand::tuple(["a", "b"])).unwrap(),
            ConstraintType::is_in(vec!["a", "b"])
        );
        let center = Location::new(1.1, 2.2);
        assert_eq!(
            ConstraintType::new(
                op("distance"),
                Operand::Tuple(vec![center.into(), AttributeValue::from(2.2)])
            )
            .unwrap(),
            ConstraintType::distance(center, 2.2)
        );
    }

    #[test]
    fn test_new_rejects_bad_operands() {
        let invalid = |op, operand| {
            matches!(
                ConstraintType::new(op, operand),
                Err(SchemaError::InvalidConstraintType(_))
            )
        };
        assert!(invalid(ConstraintOperator::LessThan, Operand::value(true)));
        assert!(invalid(ConstraintOperator::Equal, Operand::value(Location::new(0.0, 0.0))));
        assert!(invalid(ConstraintOperator::Within, Operand::tuple([1, 2, 3])));
        assert!(invalid(ConstraintOperator::Within, Operand::value(1)));
        assert!(invalid(
            ConstraintOperator::Within,
            Operand::Tuple(vec![AttributeValue::from(1), AttributeValue::from("b")])
        ));
        assert!(invalid(
            ConstraintOperator::In,
            Operand::Tuple(vec![AttributeValue::from(1), AttributeValue::from(1.0)])
        ));
        assert!(invalid(ConstraintOperator::Equal, Operand::tuple([1, 2])));
        assert!(invalid(ConstraintOperator::Distance, Operand::tuple([1.0, 2.0])));
    }

    #[test]
    fn test_equality() {
        let ct = ConstraintType::equal("Stephen King");
        assert!(ct.check(&AttributeValue::from("Stephen King")).unwrap());
        assert!(!ct.check(&AttributeValue::from("George Orwell")).unwrap());
        assert!(!ct.check(&AttributeValue::from(1)).unwrap());
        assert!(ConstraintType::not_equal(1).check(&AttributeValue::from(1.0)).unwrap());
        assert!(!ConstraintType::equal(true).check(&AttributeValue::from(1)).unwrap());
    }

    #[test]
    fn test_ordering() {
        let value = AttributeValue::from(2000);
        assert!(!ConstraintType::less_than(2000).check(&value).unwrap());
        assert!(ConstraintType::less_than_eq(2000).check(&value).unwrap());
        assert!(!ConstraintType::greater_than(2000).check(&value).unwrap());
        assert!(ConstraintType::greater_than_eq(2000).check(&value).unwrap());
        assert!(ConstraintType::greater_than(1999).check(&value).unwrap());
        assert!(ConstraintType::less_than("b").check(&AttributeValue::from("a")).unwrap());
    }

    #[test]
    fn test_ordering_type_mismatch_is_error() {
        let err = ConstraintType::less_than(3).check(&AttributeValue::from(2.0)).unwrap_err();
        assert_eq!(
            err,
            EvaluationError::TypeMismatch {
                operator: "<".to_string(),
                operand: AttributeType::Integer,
                value: AttributeType::Float,
            }
        );
    }

    #[test]
    fn test_nan_never_orders() {
        let nan = AttributeValue::from(f64::NAN);
        assert!(!ConstraintType::less_than(1.0).check(&nan).unwrap());
        assert!(!ConstraintType::greater_than_eq(1.0).check(&nan).unwrap());
    }

    #[test]
    fn test_within() {
        let ct = ConstraintType::within((2000, 2010));
        assert!(ct.check(&AttributeValue::from(2000)).unwrap());
        assert!(ct.check(&AttributeValue::from(2010)).unwrap());
        assert!(!ct.check(&AttributeValue::from(1999)).unwrap());
        assert!(ct.check(&AttributeValue::from(2000.0)).is_err());
    }

    #[test]
    fn test_set_membership() {
        let ct = ConstraintType::is_in(vec![1, 2, 3]);
        assert!(ct.check(&AttributeValue::from(2)).unwrap());
        assert!(!ct.check(&AttributeValue::from(4)).unwrap());
        assert!(!ct.check(&AttributeValue::from(2.0)).unwrap());

        let ct = ConstraintType::not_in(vec![1, 2, 3]);
        assert!(!ct.check(&AttributeValue::from(2)).unwrap());
        assert!(ct.check(&AttributeValue::from(4)).unwrap());
    }

    #[test]
    fn test_distance() {
        let london = Location::new(51.5074, -0.1278);
        let paris = Location::new(48.8566, 2.3522);
        assert!(ConstraintType::distance(london, 400.0).check(&paris.into()).unwrap());
        assert!(!ConstraintType::distance(london, 300.0).check(&paris.into()).unwrap());
        assert!(ConstraintType::distance(london, 0.0).check(&london.into()).unwrap());
        assert!(ConstraintType::distance(london, 1.0).check(&AttributeValue::from(1.0)).is_err());
    }

    #[test]
    fn test_is_valid_and_data_type() {
        let year = Attribute::new("year", AttributeType::Integer, true);
        assert!(ConstraintType::greater_than(1990).is_valid(&year));
        assert!(!ConstraintType::greater_than(1990.0).is_valid(&year));
        assert_eq!(ConstraintType::not_in(Vec::<bool>::new()).data_type(), AttributeType::Boolean);
        assert_eq!(
            ConstraintType::distance(Location::new(0.0, 0.0), 1.0).data_type(),
            AttributeType::Location
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ConstraintType::equal("Stephen King").to_string(),
            "ConstraintType(value=Stephen King,type===)"
        );
        assert_eq!(
            ConstraintType::within((2000, 2010)).to_string(),
            "ConstraintType(value=(2000, 2010),type=within)"
        );
    }
}
