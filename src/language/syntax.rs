use std::fmt::Display;

use derivative::Derivative;
use itertools::Itertools;

mod identifier;

pub use identifier::*;

use crate::positioned::SourcePos;

/// An annotation as written, before any name is looked up.
#[derive(Debug, Clone, Derivative)]
#[derivative(PartialEq, Eq)]
pub enum ParseTree {
    Name {
        name: Identifier,
    },
    Literal {
        value: String,
        #[derivative(PartialEq = "ignore")]
        info: SourcePos,
    },
    Call {
        constructor: Identifier,
        arguments: Vec<ParseTree>,
    },
}

impl Display for ParseTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseTree::Name { name } => write!(f, "{}", name),
            ParseTree::Literal { value, .. } => write!(f, "{}", value),
            ParseTree::Call {
                constructor,
                arguments,
            } => write!(f, "{}({})", constructor, arguments.iter().join(", ")),
        }
    }
}
