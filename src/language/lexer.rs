use std::fmt::Display;

use pest::{iterators::Pair, Parser};

use crate::positioned::{SourcePos, WithPosition};

#[derive(Parser)]
#[grammar = "language/expr.pest"]
struct AnnotationLexer;

#[derive(Debug, Copy, Clone)]
pub enum Token<'a> {
    Identifier(&'a str, SourcePos),
    Punctuator(&'a str, SourcePos),
    Literal(&'a str, SourcePos),
}

impl PartialEq for Token<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Identifier(l0, _), Self::Identifier(r0, _)) => l0 == r0,
            (Self::Punctuator(l0, _), Self::Punctuator(r0, _)) => l0 == r0,
            (Self::Literal(l0, _), Self::Literal(r0, _)) => l0 == r0,
            _ => false,
        }
    }
}

impl WithPosition for Token<'_> {
    fn get_position(&self) -> SourcePos {
        *match self {
            Token::Identifier(_, pos) => pos,
            Token::Punctuator(_, pos) => pos,
            Token::Literal(_, pos) => pos,
        }
    }
}

impl<'a> Display for Token<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:?}", self))
    }
}

fn error_position(error: pest::error::Error<Rule>) -> SourcePos {
    match error.line_col {
        pest::error::LineColLocation::Pos((line, col)) => SourcePos::new(line, col),
        pest::error::LineColLocation::Span((start_line, start_col), _) => {
            SourcePos::new(start_line, start_col)
        }
    }
}

fn position(pair: &Pair<Rule>) -> SourcePos {
    let (line, col) = pair.as_span().start_pos().line_col();
    SourcePos::new(line, col)
}

/// Create a list of tokens from the annotation, or return the lexer error position.
pub(crate) fn tokens(text: &str) -> Result<Vec<Token>, SourcePos> {
    let input = AnnotationLexer::parse(Rule::input, text)
        .map_err(error_position)?
        .next()
        .ok_or(SourcePos::new(1, 1))?;

    let tokens = input
        .into_inner()
        .filter(|record| record.as_rule() == Rule::token)
        .filter_map(|token_pair| {
            let info = position(&token_pair);
            let token_str = token_pair.as_str();
            // a token always is one of three, see grammar
            let token_fn = match token_pair.into_inner().next()?.as_rule() {
                Rule::identifier => Token::Identifier,
                Rule::punctuator => Token::Punctuator,
                Rule::literal => Token::Literal,
                _ => unreachable!(),
            };
            Some(token_fn(token_str, info))
        })
        .collect::<Vec<_>>();
    Ok(tokens)
}

/// Splits an example line `x=1, y=2 -> 3` into its bindings and its output.
pub(crate) fn example_line(line: &str) -> Result<(Vec<(&str, i64)>, i64), SourcePos> {
    let example = AnnotationLexer::parse(Rule::example, line)
        .map_err(error_position)?
        .next()
        .ok_or(SourcePos::new(1, 1))?;

    let mut bindings = Vec::new();
    let mut output = None;
    for pair in example.into_inner() {
        match pair.as_rule() {
            Rule::binding => {
                let mut inner = pair.into_inner();
                let (name, value) = match (inner.next(), inner.next()) {
                    (Some(name), Some(value)) => (name, value),
                    _ => unreachable!(),
                };
                bindings.push((name.as_str(), integer(&value)?));
            }
            Rule::literal => output = Some(integer(&pair)?),
            _ => (),
        }
    }
    let output = output.ok_or(SourcePos::new(1, line.len() + 1))?;
    Ok((bindings, output))
}

fn integer(pair: &Pair<Rule>) -> Result<i64, SourcePos> {
    pair.as_str().parse().map_err(|_| position(pair))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_call() {
        let tokens = tokens("Add(1, x)").unwrap();
        let expected = vec![
            Token::Identifier("Add", SourcePos::UnknownPosition),
            Token::Punctuator("(", SourcePos::UnknownPosition),
            Token::Literal("1", SourcePos::UnknownPosition),
            Token::Punctuator(",", SourcePos::UnknownPosition),
            Token::Identifier("x", SourcePos::UnknownPosition),
            Token::Punctuator(")", SourcePos::UnknownPosition),
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn token_positions() {
        let tokens = tokens("Not( y )").unwrap();
        assert_eq!(tokens[2].get_position(), SourcePos::new(1, 6));
    }

    #[test]
    fn unknown_character() {
        assert_eq!(tokens("Add(1, x) + 2"), Err(SourcePos::new(1, 11)));
    }

    #[test]
    fn empty_annotation() {
        assert_eq!(tokens("   ").unwrap(), vec![]);
    }

    #[test]
    fn example_with_all_bindings() {
        let (bindings, output) = example_line("x=1, y=-2, z=3 -> 6").unwrap();
        assert_eq!(bindings, vec![("x", 1), ("y", -2), ("z", 3)]);
        assert_eq!(output, 6);
    }

    #[test]
    fn example_without_arrow() {
        assert!(example_line("x=1, y=2").is_err());
    }
}
