//! Shorthand for building trees in code and tests.
//!
//! The builders do not check operand sorts, `add(lt(x(), y()), c1())` builds
//! fine and evaluates through coercion.

use crate::{node::Variable, operator::Operator, Expr, Node};

pub fn x() -> Expr {
    Node::variable(Variable::X)
}

pub fn y() -> Expr {
    Node::variable(Variable::Y)
}

pub fn z() -> Expr {
    Node::variable(Variable::Z)
}

pub fn constant(value: i64) -> Expr {
    Node::constant(value)
}

pub fn c1() -> Expr {
    constant(1)
}

pub fn c2() -> Expr {
    constant(2)
}

pub fn c3() -> Expr {
    constant(3)
}

pub fn add(lhs: Expr, rhs: Expr) -> Expr {
    Node::unchecked(Operator::Add, vec![lhs, rhs])
}

pub fn multiply(lhs: Expr, rhs: Expr) -> Expr {
    Node::unchecked(Operator::Multiply, vec![lhs, rhs])
}

pub fn ite(guard: Expr, then: Expr, otherwise: Expr) -> Expr {
    Node::unchecked(Operator::Ite, vec![guard, then, otherwise])
}

pub fn lt(lhs: Expr, rhs: Expr) -> Expr {
    Node::unchecked(Operator::Lt, vec![lhs, rhs])
}

pub fn eq(lhs: Expr, rhs: Expr) -> Expr {
    Node::unchecked(Operator::Eq, vec![lhs, rhs])
}

pub fn and(lhs: Expr, rhs: Expr) -> Expr {
    Node::unchecked(Operator::And, vec![lhs, rhs])
}

pub fn or(lhs: Expr, rhs: Expr) -> Expr {
    Node::unchecked(Operator::Or, vec![lhs, rhs])
}

pub fn not(value: Expr) -> Expr {
    Node::unchecked(Operator::Not, vec![value])
}
