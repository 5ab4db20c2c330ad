use std::fmt::Display;

use crate::operator::Algebra;

/// Result of evaluating a node under a concrete environment.
///
/// Operands of the wrong sort are coerced (`false` is 0, non-zero is `true`)
/// so evaluation is total; arithmetic wraps on overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    Int(i64),
    Bool(bool),
}

impl Value {
    pub fn as_int(self) -> i64 {
        match self {
            Value::Int(value) => value,
            Value::Bool(value) => value as i64,
        }
    }

    pub fn as_bool(self) -> bool {
        match self {
            Value::Int(value) => value != 0,
            Value::Bool(value) => value,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Bool(value) => write!(f, "{}", value),
        }
    }
}

// Both branches of an Ite and both sides of And/Or are already evaluated.
impl Algebra for Value {
    fn plus(self, rhs: Self) -> Self {
        Value::Int(self.as_int().wrapping_add(rhs.as_int()))
    }

    fn times(self, rhs: Self) -> Self {
        Value::Int(self.as_int().wrapping_mul(rhs.as_int()))
    }

    fn ite(self, then: Self, otherwise: Self) -> Self {
        if self.as_bool() {
            then
        } else {
            otherwise
        }
    }

    fn less_than(self, rhs: Self) -> Self {
        Value::Bool(self.as_int() < rhs.as_int())
    }

    fn equal(self, rhs: Self) -> Self {
        Value::Bool(match (self, rhs) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (a, b) => a.as_int() == b.as_int(),
        })
    }

    fn and(self, rhs: Self) -> Self {
        Value::Bool(self.as_bool() && rhs.as_bool())
    }

    fn or(self, rhs: Self) -> Self {
        Value::Bool(self.as_bool() || rhs.as_bool())
    }

    fn negate(self) -> Self {
        Value::Bool(!self.as_bool())
    }
}
