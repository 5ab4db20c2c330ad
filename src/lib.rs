//! Expression trees for grouping synthesized programs into equivalence classes.
//!
//! Trees are built from the variables `x`, `y`, `z`, small constants and the
//! operators `Add`, `Multiply`, `Ite`, `Lt`, `Eq`, `And`, `Or` and `Not`.
//! Each tree evaluates concretely, translates to a symbolic form that the
//! z3 solver can compare, and has a canonical form in which the operands of
//! commutative operators are ordered.

mod positioned;

pub mod dsl;
pub mod language;

mod error;
mod resolver;
mod symbol_table;
mod typing;

mod env;
mod eval;
mod node;
mod operator;
mod symbolic;

mod classes;
mod example;
mod options;
mod sample;
mod statistics;
mod z3_checker;

#[macro_use]
extern crate pest_derive;

pub use classes::{Class, EquivalenceClasses};
pub use env::{Env, SymbolicEnv};
pub use error::Error;
pub use eval::Value;
pub use example::{
    header_annotation, parse_examples, parse_examples_with_logger, Example, ExampleFile,
};
pub use language::{parse_expression, parse_expression_with};
pub use node::{Expr, Kind, Node, Variable};
pub use operator::{Algebra, Operator};
pub use options::Options;
pub use positioned::SourcePos;
pub use sample::Generator;
pub use statistics::Statistics;
pub use symbol_table::{Entry, SymbolTable};
pub use symbolic::Symbolic;
pub use typing::{Sort, Sorted};
pub use z3_checker::{equivalent, satisfiable, Equivalence};
