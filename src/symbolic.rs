//! Symbolic algebra over the three variables.
//!
//! Building a [`Symbolic`] through its [`Algebra`] operations evaluates what
//! can be decided without knowing the variables: constant arithmetic and
//! comparisons, neutral and absorbing elements, `Eq(a, a)`, double negation
//! and piecewise expressions with a decided guard. Nothing beyond that is
//! simplified; deciding equivalence is left to [`crate::z3_checker`].

use std::{collections::BTreeSet, fmt::Display, rc::Rc};

use pretty::RcDoc;

use crate::{env::Env, eval::Value, node::Variable, operator::Algebra};

const WIDTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbolic {
    Int(i64),
    Bool(bool),
    Symbol(Rc<str>),
    Add(Rc<Symbolic>, Rc<Symbolic>),
    Mul(Rc<Symbolic>, Rc<Symbolic>),
    Piecewise {
        condition: Rc<Symbolic>,
        then: Rc<Symbolic>,
        otherwise: Rc<Symbolic>,
    },
    Lt(Rc<Symbolic>, Rc<Symbolic>),
    Eq(Rc<Symbolic>, Rc<Symbolic>),
    And(Rc<Symbolic>, Rc<Symbolic>),
    Or(Rc<Symbolic>, Rc<Symbolic>),
    Not(Rc<Symbolic>),
}

impl Symbolic {
    pub fn symbol(name: &str) -> Symbolic {
        Symbolic::Symbol(Rc::from(name))
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Symbolic::Int(_) | Symbolic::Bool(_))
    }

    /// Names of all symbols occurring in the expression.
    pub fn free_symbols(&self) -> BTreeSet<&str> {
        fn helper<'a>(symbolic: &'a Symbolic, symbols: &mut BTreeSet<&'a str>) {
            match symbolic {
                Symbolic::Int(_) | Symbolic::Bool(_) => (),
                Symbolic::Symbol(name) => {
                    symbols.insert(&**name);
                }
                Symbolic::Add(a, b)
                | Symbolic::Mul(a, b)
                | Symbolic::Lt(a, b)
                | Symbolic::Eq(a, b)
                | Symbolic::And(a, b)
                | Symbolic::Or(a, b) => {
                    helper(a, symbols);
                    helper(b, symbols);
                }
                Symbolic::Piecewise {
                    condition,
                    then,
                    otherwise,
                } => {
                    helper(condition, symbols);
                    helper(then, symbols);
                    helper(otherwise, symbols);
                }
                Symbolic::Not(a) => helper(a, symbols),
            }
        }

        let mut symbols = BTreeSet::new();
        helper(self, &mut symbols);
        symbols
    }

    /// Substitutes the environment for the symbols and evaluates.
    /// Returns `None` if a symbol other than `x`, `y` or `z` occurs.
    pub fn evaluate(&self, env: &Env<i64>) -> Option<Value> {
        let binary = |a: &Symbolic, b: &Symbolic| Some((a.evaluate(env)?, b.evaluate(env)?));
        Some(match self {
            Symbolic::Int(value) => Value::Int(*value),
            Symbolic::Bool(value) => Value::Bool(*value),
            Symbolic::Symbol(name) => Value::Int(*env.get(Variable::from_name(name)?)),
            Symbolic::Add(a, b) => binary(a, b).map(|(a, b)| a.plus(b))?,
            Symbolic::Mul(a, b) => binary(a, b).map(|(a, b)| a.times(b))?,
            Symbolic::Lt(a, b) => binary(a, b).map(|(a, b)| a.less_than(b))?,
            Symbolic::Eq(a, b) => binary(a, b).map(|(a, b)| a.equal(b))?,
            Symbolic::And(a, b) => binary(a, b).map(|(a, b)| a.and(b))?,
            Symbolic::Or(a, b) => binary(a, b).map(|(a, b)| a.or(b))?,
            Symbolic::Not(a) => a.evaluate(env)?.negate(),
            Symbolic::Piecewise {
                condition,
                then,
                otherwise,
            } => condition
                .evaluate(env)?
                .ite(then.evaluate(env)?, otherwise.evaluate(env)?),
        })
    }

    fn precedence(&self) -> u8 {
        match self {
            Symbolic::Or(..) => 1,
            Symbolic::And(..) => 2,
            Symbolic::Lt(..) => 4,
            Symbolic::Add(..) => 5,
            Symbolic::Mul(..) => 6,
            Symbolic::Not(..) => 9,
            _ => 10,
        }
    }

    fn doc(&self) -> RcDoc<'static> {
        match self {
            Symbolic::Int(value) => RcDoc::as_string(value),
            Symbolic::Bool(true) => RcDoc::text("True"),
            Symbolic::Bool(false) => RcDoc::text("False"),
            Symbolic::Symbol(name) => RcDoc::text(name.to_string()),
            Symbolic::Add(a, b) => infix(a.operand(5), " +", b.operand(5)),
            Symbolic::Mul(a, b) => a.operand(6).append(RcDoc::text("*")).append(b.operand(6)),
            Symbolic::Lt(a, b) => infix(a.operand(5), " <", b.operand(5)),
            Symbolic::Eq(a, b) => call("Eq", vec![a.doc(), b.doc()]),
            Symbolic::And(a, b) => infix(a.operand(9), " &", b.operand(9)),
            Symbolic::Or(a, b) => infix(a.operand(9), " |", b.operand(9)),
            Symbolic::Not(a) => RcDoc::text("~").append(a.operand(10)),
            Symbolic::Piecewise {
                condition,
                then,
                otherwise,
            } => call(
                "Piecewise",
                vec![
                    call("", vec![then.doc(), condition.doc()]),
                    call("", vec![otherwise.doc(), RcDoc::text("True")]),
                ],
            ),
        }
    }

    /// Parenthesized unless it binds at least as tight as `precedence`.
    fn operand(&self, precedence: u8) -> RcDoc<'static> {
        if self.precedence() < precedence {
            RcDoc::text("(").append(self.doc()).append(RcDoc::text(")"))
        } else {
            self.doc()
        }
    }
}

fn infix(lhs: RcDoc<'static>, operator: &'static str, rhs: RcDoc<'static>) -> RcDoc<'static> {
    lhs.append(RcDoc::text(operator))
        .append(RcDoc::line().append(rhs).nest(4))
        .group()
}

fn call(name: &'static str, arguments: Vec<RcDoc<'static>>) -> RcDoc<'static> {
    let separator = RcDoc::text(",").append(RcDoc::line());
    RcDoc::text(name)
        .append(RcDoc::text("("))
        .append(RcDoc::intersperse(arguments, separator).nest(4))
        .append(RcDoc::text(")"))
        .group()
}

impl Display for Symbolic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.doc().render_fmt(WIDTH, f)
    }
}

impl Algebra for Symbolic {
    fn plus(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Symbolic::Int(a), Symbolic::Int(b)) => Symbolic::Int(a.wrapping_add(b)),
            (Symbolic::Int(0), other) | (other, Symbolic::Int(0)) => other,
            (a, b) => Symbolic::Add(Rc::new(a), Rc::new(b)),
        }
    }

    fn times(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Symbolic::Int(a), Symbolic::Int(b)) => Symbolic::Int(a.wrapping_mul(b)),
            (Symbolic::Int(0), _) | (_, Symbolic::Int(0)) => Symbolic::Int(0),
            (Symbolic::Int(1), other) | (other, Symbolic::Int(1)) => other,
            (a, b) => Symbolic::Mul(Rc::new(a), Rc::new(b)),
        }
    }

    fn ite(self, then: Self, otherwise: Self) -> Self {
        match (self, then, otherwise) {
            (Symbolic::Bool(true), then, _) => then,
            (Symbolic::Bool(false), _, otherwise) => otherwise,
            (_, then, otherwise) if then == otherwise => then,
            (condition, then, otherwise) => Symbolic::Piecewise {
                condition: Rc::new(condition),
                then: Rc::new(then),
                otherwise: Rc::new(otherwise),
            },
        }
    }

    fn less_than(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Symbolic::Int(a), Symbolic::Int(b)) => Symbolic::Bool(a < b),
            (a, b) if a == b => Symbolic::Bool(false),
            (a, b) => Symbolic::Lt(Rc::new(a), Rc::new(b)),
        }
    }

    fn equal(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Symbolic::Int(a), Symbolic::Int(b)) => Symbolic::Bool(a == b),
            (Symbolic::Bool(a), Symbolic::Bool(b)) => Symbolic::Bool(a == b),
            (a, b) if a == b => Symbolic::Bool(true),
            (a, b) => Symbolic::Eq(Rc::new(a), Rc::new(b)),
        }
    }

    fn and(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Symbolic::Bool(false), _) | (_, Symbolic::Bool(false)) => Symbolic::Bool(false),
            (Symbolic::Bool(true), other) | (other, Symbolic::Bool(true)) => other,
            (a, b) if a == b => a,
            (a, b) => Symbolic::And(Rc::new(a), Rc::new(b)),
        }
    }

    fn or(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Symbolic::Bool(true), _) | (_, Symbolic::Bool(true)) => Symbolic::Bool(true),
            (Symbolic::Bool(false), other) | (other, Symbolic::Bool(false)) => other,
            (a, b) if a == b => a,
            (a, b) => Symbolic::Or(Rc::new(a), Rc::new(b)),
        }
    }

    fn negate(self) -> Self {
        match self {
            Symbolic::Bool(value) => Symbolic::Bool(!value),
            Symbolic::Not(inner) => Rc::try_unwrap(inner).unwrap_or_else(|inner| (*inner).clone()),
            other => Symbolic::Not(Rc::new(other)),
        }
    }
}
