use std::{fmt::Display, io, path::PathBuf};

use crate::{
    language::Identifier,
    positioned::{SourcePos, WithPosition},
    typing::Sort,
};

#[derive(Debug)]
pub enum Error {
    LexerError(SourcePos),
    ParseError(pom::Error),
    UnknownIdentifier(Identifier),
    NotAConstructor(Identifier),
    MissingArguments(Identifier),
    ArityMismatch {
        constructor: Identifier,
        expected: usize,
        found: usize,
    },
    SortMismatch {
        constructor: Identifier,
        position: usize,
        expected: Sort,
        found: Sort,
    },
    UnsupportedLiteral {
        literal: String,
        info: SourcePos,
    },
    /// An annotation read from a file failed to parse or resolve.
    Annotation {
        path: PathBuf,
        text: String,
        error: Box<Error>,
    },
    MalformedExample {
        line: usize,
        text: String,
    },
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Logger(sloggers::Error),
    Lowering(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::LexerError(pos) => write!(f, "Unexpected character at {}", pos),
            Error::ParseError(error) => write!(f, "Unable to parse annotation: {}", error),
            Error::UnknownIdentifier(identifier) => f.write_str(&undeclared_name(identifier)),
            Error::NotAConstructor(identifier) => f.write_str(&not_a_constructor(identifier)),
            Error::MissingArguments(identifier) => f.write_str(&missing_arguments(identifier)),
            Error::ArityMismatch {
                constructor,
                expected,
                found,
            } => f.write_str(&arity_mismatch(constructor, *expected, *found)),
            Error::SortMismatch {
                constructor,
                position,
                expected,
                found,
            } => f.write_str(&unification_error(constructor, *position, *expected, *found)),
            Error::UnsupportedLiteral { literal, info } => {
                write!(f, "Unsupported literal {} at {}, only 1, 2 and 3 are constants", literal, info)
            }
            Error::Annotation { path, text, error } => {
                write!(f, "{}: annotation '{}': {}", path.display(), text, error)
            }
            Error::MalformedExample { line, text } => {
                write!(f, "Malformed example on line {}: '{}'", line, text)
            }
            Error::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Error::Logger(error) => write!(f, "Unable to build logger: {}", error),
            Error::Lowering(reason) => write!(f, "Unable to lower to z3: {}", reason),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Annotation { error, .. } => Some(error.as_ref()),
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub fn undeclared_name(name: &Identifier) -> String {
    format!("Undeclared name '{}' at {}", name, name.get_position())
}

pub fn not_a_constructor(name: &Identifier) -> String {
    format!(
        "'{}' at {} is not a constructor and cannot take arguments",
        name,
        name.get_position()
    )
}

pub fn missing_arguments(constructor: &Identifier) -> String {
    format!(
        "Constructor '{}' at {} is used without arguments",
        constructor,
        constructor.get_position()
    )
}

pub fn arity_mismatch(constructor: &Identifier, expected: usize, found: usize) -> String {
    format!(
        "Constructor '{}' expects {} arguments but {} were given",
        constructor, expected, found
    )
}

pub fn unification_error(constructor: &Identifier, position: usize, expected: Sort, found: Sort) -> String {
    format!(
        "Argument {} of '{}' is expected to be of sort {} but is of sort {}",
        position + 1,
        constructor,
        expected,
        found
    )
}
