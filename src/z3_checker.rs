use std::convert::TryFrom;

use slog::{debug, Logger};
use z3::{
    ast::{Ast, Bool, Int},
    Config, Context, Model, SatResult, Solver,
};

use crate::{env::Env, error::Error, node::Variable, symbolic::Symbolic};

/// Outcome of comparing two symbolic forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Equivalence {
    Equivalent,
    /// An environment on which the two forms evaluate differently.
    Distinct(Env<i64>),
    Unknown,
}

impl Equivalence {
    pub fn is_equivalent(&self) -> bool {
        matches!(self, Equivalence::Equivalent)
    }
}

/// Decides whether `lhs` and `rhs` agree on every integer binding of `x`, `y` and `z`.
///
/// Integers are unbounded in the solver, unlike [`crate::Value`] which wraps on overflow.
pub fn equivalent(lhs: &Symbolic, rhs: &Symbolic, logger: &Logger) -> Result<Equivalence, Error> {
    if lhs == rhs {
        debug!(logger, "syntactically equal"; "form" => %lhs);
        return Ok(Equivalence::Equivalent);
    }

    let cfg = Config::new();
    let ctx = Context::new(&cfg);
    let variables = Variables::new(&ctx);

    let left = lower(&ctx, &variables, lhs)?;
    let right = lower(&ctx, &variables, rhs)?;
    let same = left
        .eq(right)
        .and_then(Bool::try_from)
        .map_err(|_| sort_error(lhs, rhs))?;

    let solver = Solver::new(&ctx);
    solver.assert(&same.not());

    let result = solver.check();
    debug!(logger, "checked equivalence"; "lhs" => %lhs, "rhs" => %rhs, "result" => ?result);

    Ok(match result {
        SatResult::Unsat => Equivalence::Equivalent,
        SatResult::Sat => match solver.get_model() {
            Some(model) => Equivalence::Distinct(variables.counterexample(&model)),
            None => Equivalence::Unknown,
        },
        SatResult::Unknown => Equivalence::Unknown,
    })
}

/// Finds a binding under which the boolean `formula` holds, if there is one.
pub fn satisfiable(formula: &Symbolic, logger: &Logger) -> Result<Option<Env<i64>>, Error> {
    let cfg = Config::new();
    let ctx = Context::new(&cfg);
    let variables = Variables::new(&ctx);

    let assertion = lower(&ctx, &variables, formula)
        .and_then(|node| Bool::try_from(node).map_err(|_| not_a_formula(formula)))?;

    let solver = Solver::new(&ctx);
    solver.assert(&assertion);

    let result = solver.check();
    debug!(logger, "checked satisfiability"; "formula" => %formula, "result" => ?result);

    Ok(match result {
        SatResult::Sat => solver
            .get_model()
            .map(|model| variables.counterexample(&model)),
        _ => None,
    })
}

fn sort_error(lhs: &Symbolic, rhs: &Symbolic) -> Error {
    Error::Lowering(format!("'{}' and '{}' are of different sorts", lhs, rhs))
}

fn not_a_formula(formula: &Symbolic) -> Error {
    Error::Lowering(format!("'{}' is not a boolean formula", formula))
}

struct Variables<'ctx> {
    x: Int<'ctx>,
    y: Int<'ctx>,
    z: Int<'ctx>,
}

impl<'ctx> Variables<'ctx> {
    fn new(ctx: &'ctx Context) -> Variables<'ctx> {
        Variables {
            x: Int::new_const(ctx, Variable::X.name()),
            y: Int::new_const(ctx, Variable::Y.name()),
            z: Int::new_const(ctx, Variable::Z.name()),
        }
    }

    fn get(&self, variable: Variable) -> &Int<'ctx> {
        match variable {
            Variable::X => &self.x,
            Variable::Y => &self.y,
            Variable::Z => &self.z,
        }
    }

    // Variables the model leaves unconstrained are completed to 0.
    fn counterexample(&self, model: &Model<'ctx>) -> Env<i64> {
        let value = |variable: &Int<'ctx>| {
            model
                .eval(variable, true)
                .and_then(|value| value.as_i64())
                .unwrap_or(0)
        };
        Env::new(value(&self.x), value(&self.y), value(&self.z))
    }
}

#[derive(Clone)]
enum AstNode<'ctx> {
    Bool(Bool<'ctx>),
    Int(Int<'ctx>),
}

impl<'ctx> AstNode<'ctx> {
    fn add(self, other: AstNode<'ctx>) -> Result<AstNode<'ctx>, ()> {
        Ok(AstNode::Int(Int::try_from(self)? + Int::try_from(other)?))
    }

    fn mul(self, other: AstNode<'ctx>) -> Result<AstNode<'ctx>, ()> {
        Ok(AstNode::Int(Int::try_from(self)? * Int::try_from(other)?))
    }

    fn eq(self, other: AstNode<'ctx>) -> Result<AstNode<'ctx>, ()> {
        match self {
            AstNode::Bool(b) => Ok(AstNode::Bool(b._eq(&Bool::try_from(other)?))),
            AstNode::Int(i) => Ok(AstNode::Bool(i._eq(&Int::try_from(other)?))),
        }
    }

    fn lt(self, other: AstNode<'ctx>) -> Result<AstNode<'ctx>, ()> {
        Ok(AstNode::Bool(
            Int::try_from(self)?.lt(&Int::try_from(other)?),
        ))
    }

    fn and(self, other: AstNode<'ctx>) -> Result<AstNode<'ctx>, ()> {
        let ctx = self.get_ctx();
        Ok(AstNode::Bool(Bool::and(
            ctx,
            &[&Bool::try_from(self)?, &Bool::try_from(other)?],
        )))
    }

    fn or(self, other: AstNode<'ctx>) -> Result<AstNode<'ctx>, ()> {
        let ctx = self.get_ctx();
        Ok(AstNode::Bool(Bool::or(
            ctx,
            &[&Bool::try_from(self)?, &Bool::try_from(other)?],
        )))
    }

    fn conditional(self, true_: AstNode<'ctx>, false_: AstNode<'ctx>) -> Result<AstNode<'ctx>, ()> {
        let guard = Bool::try_from(self)?;
        match true_ {
            AstNode::Bool(true_) => Ok(AstNode::Bool(guard.ite(&true_, &Bool::try_from(false_)?))),
            AstNode::Int(true_) => Ok(AstNode::Int(guard.ite(&true_, &Int::try_from(false_)?))),
        }
    }

    fn negate(self) -> Result<AstNode<'ctx>, ()> {
        Ok(AstNode::Bool(Bool::try_from(self)?.not()))
    }

    fn get_ctx(&self) -> &'ctx Context {
        match self {
            AstNode::Bool(v) => v.get_ctx(),
            AstNode::Int(v) => v.get_ctx(),
        }
    }
}

impl<'ctx> TryFrom<AstNode<'ctx>> for Bool<'ctx> {
    type Error = ();

    fn try_from(value: AstNode<'ctx>) -> Result<Self, Self::Error> {
        if let AstNode::Bool(v) = value {
            Ok(v)
        } else {
            Err(())
        }
    }
}

impl<'ctx> TryFrom<AstNode<'ctx>> for Int<'ctx> {
    type Error = ();

    fn try_from(value: AstNode<'ctx>) -> Result<Self, Self::Error> {
        if let AstNode::Int(v) = value {
            Ok(v)
        } else {
            Err(())
        }
    }
}

fn lower<'ctx>(
    ctx: &'ctx Context,
    variables: &Variables<'ctx>,
    symbolic: &Symbolic,
) -> Result<AstNode<'ctx>, Error> {
    let ill_sorted = |_| Error::Lowering(format!("'{}' is ill-sorted", symbolic));
    let binary = |a: &Symbolic, b: &Symbolic| -> Result<_, Error> {
        Ok((lower(ctx, variables, a)?, lower(ctx, variables, b)?))
    };

    match symbolic {
        Symbolic::Int(value) => Ok(AstNode::Int(Int::from_i64(ctx, *value))),
        Symbolic::Bool(value) => Ok(AstNode::Bool(Bool::from_bool(ctx, *value))),
        Symbolic::Symbol(name) => Variable::from_name(name)
            .map(|variable| AstNode::Int(variables.get(variable).clone()))
            .ok_or_else(|| Error::Lowering(format!("unknown symbol '{}'", name))),
        Symbolic::Add(a, b) => {
            let (a, b) = binary(a, b)?;
            a.add(b).map_err(ill_sorted)
        }
        Symbolic::Mul(a, b) => {
            let (a, b) = binary(a, b)?;
            a.mul(b).map_err(ill_sorted)
        }
        Symbolic::Lt(a, b) => {
            let (a, b) = binary(a, b)?;
            a.lt(b).map_err(ill_sorted)
        }
        Symbolic::Eq(a, b) => {
            let (a, b) = binary(a, b)?;
            a.eq(b).map_err(ill_sorted)
        }
        Symbolic::And(a, b) => {
            let (a, b) = binary(a, b)?;
            a.and(b).map_err(ill_sorted)
        }
        Symbolic::Or(a, b) => {
            let (a, b) = binary(a, b)?;
            a.or(b).map_err(ill_sorted)
        }
        Symbolic::Not(a) => lower(ctx, variables, a)?.negate().map_err(ill_sorted),
        Symbolic::Piecewise {
            condition,
            then,
            otherwise,
        } => {
            let guard = lower(ctx, variables, condition)?;
            let (then, otherwise) = binary(then, otherwise)?;
            guard.conditional(then, otherwise).map_err(ill_sorted)
        }
    }
}
