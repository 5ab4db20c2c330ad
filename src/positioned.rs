use std::fmt::Display;

use crate::language::syntax::ParseTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourcePos {
    UnknownPosition,
    SourcePos { line: usize, col: usize },
}

impl SourcePos {
    pub fn new(line: usize, col: usize) -> SourcePos {
        SourcePos::SourcePos { line, col }
    }
}

impl Display for SourcePos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourcePos::UnknownPosition => write!(f, "unknown position"),
            SourcePos::SourcePos { line, col } => write!(f, "line {}, column {}", line, col),
        }
    }
}

pub trait WithPosition {
    fn get_position(&self) -> SourcePos;
}

impl WithPosition for ParseTree {
    fn get_position(&self) -> SourcePos {
        match self {
            ParseTree::Name { name } => name.get_position(),
            ParseTree::Literal { info, .. } => *info,
            ParseTree::Call { constructor, .. } => constructor.get_position(),
        }
    }
}
