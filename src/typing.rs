use std::{fmt::Display, rc::Rc};

use crate::{error::Error, language::Identifier, operator::Operator, Node};

/// Integer expressions and boolean predicates live in separate sorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sort {
    Int,
    Bool,
}

impl Display for Sort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sort::Int => write!(f, "int"),
            Sort::Bool => write!(f, "bool"),
        }
    }
}

pub trait Sorted {
    fn sort(&self) -> Sort;
}

impl Sorted for Node {
    fn sort(&self) -> Sort {
        match self.operator() {
            Some(operator) => operator.signature().1,
            None => Sort::Int,
        }
    }
}

impl<T: Sorted + ?Sized> Sorted for Rc<T> {
    fn sort(&self) -> Sort {
        self.as_ref().sort()
    }
}

/// Checks the operands of `constructor` against the operator's signature.
pub(crate) fn type_operands(
    constructor: &Identifier,
    operator: Operator,
    operands: &[impl Sorted],
) -> Result<(), Error> {
    let (parameters, _) = operator.signature();
    if parameters.len() != operands.len() {
        return Err(Error::ArityMismatch {
            constructor: constructor.clone(),
            expected: parameters.len(),
            found: operands.len(),
        });
    }

    for (position, (expected, operand)) in parameters.iter().zip(operands).enumerate() {
        let found = operand.sort();
        if *expected != found {
            return Err(Error::SortMismatch {
                constructor: constructor.clone(),
                position,
                expected: *expected,
                found,
            });
        }
    }
    Ok(())
}
