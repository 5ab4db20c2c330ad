use pom::parser::*;

use super::lexer::*;
use super::syntax::*;
use crate::positioned::WithPosition;

/// Main entrypoint for parsing an annotation,
pub fn parse(tokens: &[Token]) -> Result<ParseTree, pom::Error> {
    (expression() - end()).parse(tokens)
}

pub(super) fn expression<'a>() -> Parser<'a, Token<'a>, ParseTree> {
    let call = (identifier() + arguments()).map(|(constructor, arguments)| ParseTree::Call {
        constructor,
        arguments,
    });
    let name = identifier().map(|name| ParseTree::Name { name });

    call | name | literal()
}

fn arguments<'a>() -> Parser<'a, Token<'a>, Vec<ParseTree>> {
    // can it be empty? the resolver reports the arity instead
    punct("(") * (list(call(expression), punct(",")) | empty().map(|_| Vec::new())) - punct(")")
}

fn literal<'a>() -> Parser<'a, Token<'a>, ParseTree> {
    take(1).convert(|tokens| {
        let token = tokens[0]; // only one taken
        if let Token::Literal(s, pos) = token {
            return Ok(ParseTree::Literal {
                value: s.to_string(),
                info: pos,
            });
        }
        Err(())
    })
}

fn identifier<'a>() -> Parser<'a, Token<'a>, Identifier> {
    take(1).convert(|tokens| {
        let token = tokens[0]; // only one taken
        if let Token::Identifier(s, _) = token {
            Ok(Identifier::with_pos(s.to_string(), token.get_position()))
        } else {
            Err(())
        }
    })
}

fn punct(kw: &str) -> Parser<Token, Token> {
    is_a(move |t| match t {
        Token::Punctuator(p, _) => p == kw,
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(text: &str) -> Result<ParseTree, pom::Error> {
        let tokens = tokens(text).unwrap();
        parse(&tokens)
    }

    #[test]
    fn nested_call() {
        let tree = parse_str("Add(1, Multiply(x, y))").unwrap();
        assert_eq!(tree.to_string(), "Add(1, Multiply(x, y))");
        match tree {
            ParseTree::Call {
                constructor,
                arguments,
            } => {
                assert_eq!(constructor, "Add");
                assert_eq!(arguments.len(), 2);
            }
            _ => panic!("expected a call"),
        }
    }

    #[test]
    fn bare_name() {
        let tree = parse_str("z").unwrap();
        assert_eq!(tree, ParseTree::Name { name: "z".into() });
    }

    #[test]
    fn empty_argument_list() {
        let tree = parse_str("Not()").unwrap();
        assert_eq!(
            tree,
            ParseTree::Call {
                constructor: "Not".into(),
                arguments: vec![]
            }
        );
    }

    #[test]
    fn trailing_tokens() {
        assert!(parse_str("Add(1, 2) x").is_err());
    }

    #[test]
    fn unbalanced_parentheses() {
        assert!(parse_str("Add(1, 2").is_err());
        assert!(parse_str("Add 1, 2)").is_err());
    }

    #[test]
    fn empty_input() {
        assert!(parse_str("").is_err());
    }
}
