use std::{fmt::Display, rc::Rc};

use crate::{node::Node, typing::Sort, Expr};

/// The operations an operator needs from the domain it is applied in.
///
/// Concrete evaluation ([`crate::Value`]) and symbolic translation
/// ([`crate::Symbolic`]) both go through [`Operator::apply`]; where the two
/// must differ (branching, comparisons, connectives) the domain decides.
pub trait Algebra: Sized {
    fn plus(self, rhs: Self) -> Self;
    fn times(self, rhs: Self) -> Self;
    /// `self` is the guard.
    fn ite(self, then: Self, otherwise: Self) -> Self;
    fn less_than(self, rhs: Self) -> Self;
    fn equal(self, rhs: Self) -> Self;
    fn and(self, rhs: Self) -> Self;
    fn or(self, rhs: Self) -> Self;
    fn negate(self) -> Self;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Multiply,
    Ite,
    Lt,
    Eq,
    And,
    Or,
    Not,
}

const INT_INT: &[Sort] = &[Sort::Int, Sort::Int];
const BOOL_BOOL: &[Sort] = &[Sort::Bool, Sort::Bool];

impl Operator {
    pub const ALL: [Operator; 8] = [
        Operator::Add,
        Operator::Multiply,
        Operator::Ite,
        Operator::Lt,
        Operator::Eq,
        Operator::And,
        Operator::Or,
        Operator::Not,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operator::Add => "Add",
            Operator::Multiply => "Multiply",
            Operator::Ite => "Ite",
            Operator::Lt => "Lt",
            Operator::Eq => "Eq",
            Operator::And => "And",
            Operator::Or => "Or",
            Operator::Not => "Not",
        }
    }

    pub fn from_name(name: &str) -> Option<Operator> {
        Operator::ALL
            .iter()
            .copied()
            .find(|operator| operator.name() == name)
    }

    /// Precedence in the total order of nodes. Leaves take 0 and 1.
    pub fn sort_order(self) -> u8 {
        match self {
            Operator::Add => 10,
            Operator::Multiply => 11,
            Operator::Ite => 12,
            Operator::Lt => 20,
            Operator::Eq => 21,
            Operator::And => 22,
            Operator::Or => 23,
            Operator::Not => 24,
        }
    }

    /// Operand sorts and result sort.
    pub fn signature(self) -> (&'static [Sort], Sort) {
        match self {
            Operator::Add | Operator::Multiply => (INT_INT, Sort::Int),
            Operator::Ite => (&[Sort::Bool, Sort::Int, Sort::Int], Sort::Int),
            Operator::Lt | Operator::Eq => (INT_INT, Sort::Bool),
            Operator::And | Operator::Or => (BOOL_BOOL, Sort::Bool),
            Operator::Not => (&[Sort::Bool], Sort::Bool),
        }
    }

    pub fn arity(self) -> usize {
        self.signature().0.len()
    }

    pub fn is_commutative(self) -> bool {
        matches!(
            self,
            Operator::Add | Operator::Multiply | Operator::Eq | Operator::And | Operator::Or
        )
    }

    /// Combines already computed operands.
    ///
    /// Panics when the number of operands does not match the arity, which
    /// cannot happen for nodes built through [`Node::build`].
    pub fn apply<A: Algebra>(self, operands: Vec<A>) -> A {
        let count = operands.len();
        let mut operands = operands.into_iter();
        match (
            self,
            operands.next(),
            operands.next(),
            operands.next(),
            operands.next(),
        ) {
            (Operator::Add, Some(a), Some(b), None, None) => a.plus(b),
            (Operator::Multiply, Some(a), Some(b), None, None) => a.times(b),
            (Operator::Ite, Some(guard), Some(a), Some(b), None) => guard.ite(a, b),
            (Operator::Lt, Some(a), Some(b), None, None) => a.less_than(b),
            (Operator::Eq, Some(a), Some(b), None, None) => a.equal(b),
            (Operator::And, Some(a), Some(b), None, None) => a.and(b),
            (Operator::Or, Some(a), Some(b), None, None) => a.or(b),
            (Operator::Not, Some(a), None, None, None) => a.negate(),
            (operator, ..) => panic!(
                "{} takes {} operands, applied to {}",
                operator,
                operator.arity(),
                count
            ),
        }
    }

    /// Returns the representative of `Self(operands...)` when it differs from
    /// the node itself: commutative operators order their operands by text.
    /// Or sorts its operands like And does; the swapped node stays an Or.
    pub(crate) fn canonicalize(self, operands: &[Expr]) -> Option<Expr> {
        match operands {
            [lhs, rhs] if self.is_commutative() && rhs.text() < lhs.text() => Some(
                Node::unchecked(self, vec![Rc::clone(rhs), Rc::clone(lhs)]),
            ),
            _ => None,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
