//! Example files.
//!
//! The first line of an example file may carry the expected expression as a
//! header annotation, `# Ite(Lt(x, 3), 1, 2)`. Every other non-blank line that
//! is not a `#` comment is an input/output example, `x=1, y=2, z=3 -> 4`.

use std::{
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use itertools::Itertools;
use slog::{debug, info, Logger};

use crate::{
    env::Env,
    error::Error,
    language::{example_line, parse_expression},
    node::Variable,
    options::discard,
    Expr, Node,
};

/// Reads the header annotation of the file at `path`.
///
/// Only the first line is read. Returns `Ok(None)` when it is not a header.
pub fn parse_examples(path: impl AsRef<Path>) -> Result<Option<Expr>, Error> {
    parse_examples_with_logger(path, &discard())
}

pub fn parse_examples_with_logger(
    path: impl AsRef<Path>,
    logger: &Logger,
) -> Result<Option<Expr>, Error> {
    let path = path.as_ref();
    let mut reader = BufReader::new(open(path)?);
    let mut first_line = String::new();
    reader
        .read_line(&mut first_line)
        .map_err(|source| io_error(path, source))?;

    let golden = golden(path, &first_line)?;
    debug!(logger, "read header"; "path" => %path.display(), "golden" => ?golden);
    Ok(golden)
}

/// The annotation text of a header line, if `line` is one.
pub fn header_annotation(line: &str) -> Option<&str> {
    line.strip_prefix('#').map(str::trim)
}

fn golden(path: &Path, line: &str) -> Result<Option<Expr>, Error> {
    let Some(text) = header_annotation(line) else {
        return Ok(None);
    };
    parse_expression(text)
        .map(Some)
        .map_err(|error| Error::Annotation {
            path: path.to_owned(),
            text: text.to_owned(),
            error: Box::new(error),
        })
}

fn open(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_owned(),
        source,
    }
}

/// One input/output pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Example {
    pub input: Env<i64>,
    pub output: i64,
}

impl Example {
    /// Parses `x=a, y=b, z=c -> d`. Variables that are not bound are 0 and
    /// bindings of names other than `x`, `y` and `z` are ignored.
    pub fn parse(line_number: usize, text: &str) -> Result<Example, Error> {
        let (bindings, output) = example_line(text).map_err(|_| Error::MalformedExample {
            line: line_number,
            text: text.to_owned(),
        })?;

        let mut input = Env::default();
        for (name, value) in bindings {
            match Variable::from_name(name) {
                Some(Variable::X) => input.x = value,
                Some(Variable::Y) => input.y = value,
                Some(Variable::Z) => input.z = value,
                None => (),
            }
        }
        Ok(Example { input, output })
    }

    pub fn holds(&self, candidate: &Node) -> bool {
        candidate.evaluate(&self.input).as_int() == self.output
    }
}

impl Display for Example {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "x={}, y={}, z={} -> {}",
            self.input.x, self.input.y, self.input.z, self.output
        )
    }
}

/// A whole example file: the optional header annotation and every example below it.
#[derive(Debug, Clone)]
pub struct ExampleFile {
    pub path: PathBuf,
    pub golden: Option<Expr>,
    pub examples: Vec<Example>,
}

impl ExampleFile {
    pub fn read(path: impl AsRef<Path>, logger: &Logger) -> Result<ExampleFile, Error> {
        let path = path.as_ref();
        let reader = BufReader::new(open(path)?);

        let mut golden_expr = None;
        let mut examples = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| io_error(path, source))?;
            if index == 0 {
                golden_expr = golden(path, &line)?;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            examples.push(Example::parse(index + 1, trimmed)?);
        }

        info!(logger, "read example file";
            "path" => %path.display(),
            "examples" => examples.len(),
            "golden" => golden_expr.as_ref().map(|golden| golden.text().to_owned())
        );

        Ok(ExampleFile {
            path: path.to_owned(),
            golden: golden_expr,
            examples,
        })
    }

    /// The examples `candidate` does not reproduce.
    pub fn violations<'a>(&'a self, candidate: &'a Node) -> impl Iterator<Item = &'a Example> {
        self.examples
            .iter()
            .filter(move |example| !example.holds(candidate))
    }

    pub fn summary(&self) -> String {
        self.examples.iter().join("\n")
    }
}
