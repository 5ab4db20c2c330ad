use std::rc::Rc;

use crate::{
    error::Error,
    language::ParseTree,
    symbol_table::{Entry, SymbolTable},
    typing::type_operands,
    Expr, Node,
};

/// Turns a parse tree into an expression tree, looking every name up in
/// `symbol_table` and checking each constructor's operands against its signature.
pub fn resolve(symbol_table: &SymbolTable, tree: &ParseTree) -> Result<Expr, Error> {
    match tree {
        ParseTree::Name { name } => match symbol_table.lookup(name) {
            Some(Entry::Variable(variable)) => Ok(Rc::clone(variable)),
            Some(Entry::Constructor(_)) => Err(Error::MissingArguments(name.clone())),
            None => Err(Error::UnknownIdentifier(name.clone())),
        },
        ParseTree::Literal { value, info } => value
            .parse::<i64>()
            .ok()
            .and_then(|value| symbol_table.literal(value))
            .ok_or_else(|| Error::UnsupportedLiteral {
                literal: value.clone(),
                info: *info,
            }),
        ParseTree::Call {
            constructor,
            arguments,
        } => {
            let operator = match symbol_table.lookup(constructor) {
                Some(Entry::Constructor(operator)) => *operator,
                Some(Entry::Variable(_)) => {
                    return Err(Error::NotAConstructor(constructor.clone()))
                }
                None => return Err(Error::UnknownIdentifier(constructor.clone())),
            };

            let operands = arguments
                .iter()
                .map(|argument| resolve(symbol_table, argument))
                .collect::<Result<Vec<_>, _>>()?;

            type_operands(constructor, operator, &operands)?;

            Ok(Node::unchecked(operator, operands))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dsl::*, language::parse_expression, typing::Sort};

    #[test]
    fn resolve_nested() {
        let e = parse_expression("Ite(Lt(x, 3), Add(x, 1), Multiply(y, 2))").unwrap();
        assert_eq!(e, ite(lt(x(), c3()), add(x(), c1()), multiply(y(), c2())));
    }

    #[test]
    fn resolve_leaf() {
        assert_eq!(parse_expression("z").unwrap(), z());
        assert_eq!(parse_expression(" 2 ").unwrap(), c2());
    }

    #[test]
    fn leaves_are_shared_within_a_tree() {
        let e = parse_expression("Add(x, x)").unwrap();
        assert!(Rc::ptr_eq(&e.children()[0], &e.children()[1]));
    }

    #[test]
    fn unknown_identifier() {
        let error = parse_expression("Add(w, 1)").unwrap_err();
        assert!(matches!(error, Error::UnknownIdentifier(name) if name == "w"));

        let error = parse_expression("Sub(x, 1)").unwrap_err();
        assert_eq!(error.to_string(), "Undeclared name 'Sub' at line 1, column 1");
    }

    #[test]
    fn constant_names_are_not_in_the_vocabulary() {
        assert!(matches!(
            parse_expression("Add(c1, x)"),
            Err(Error::UnknownIdentifier(name)) if name == "c1"
        ));
    }

    #[test]
    fn variable_with_arguments() {
        assert!(matches!(
            parse_expression("x(1)"),
            Err(Error::NotAConstructor(name)) if name == "x"
        ));
    }

    #[test]
    fn constructor_without_arguments() {
        assert!(matches!(
            parse_expression("Add"),
            Err(Error::MissingArguments(name)) if name == "Add"
        ));
    }

    #[test]
    fn unsupported_literal() {
        assert!(matches!(
            parse_expression("Add(x, 4)"),
            Err(Error::UnsupportedLiteral { literal, .. }) if literal == "4"
        ));
        assert!(matches!(
            parse_expression("-1"),
            Err(Error::UnsupportedLiteral { .. })
        ));
        assert!(matches!(
            parse_expression("99999999999999999999"),
            Err(Error::UnsupportedLiteral { .. })
        ));
    }

    #[test]
    fn arity_is_checked() {
        assert!(matches!(
            parse_expression("Not(Lt(x, y), Lt(y, x))"),
            Err(Error::ArityMismatch {
                expected: 1,
                found: 2,
                ..
            })
        ));
        assert!(matches!(
            parse_expression("Add()"),
            Err(Error::ArityMismatch {
                expected: 2,
                found: 0,
                ..
            })
        ));
    }

    #[test]
    fn sorts_are_checked() {
        assert!(matches!(
            parse_expression("Ite(x, 1, 2)"),
            Err(Error::SortMismatch {
                position: 0,
                expected: Sort::Bool,
                found: Sort::Int,
                ..
            })
        ));
        assert!(matches!(
            parse_expression("Add(1, Lt(x, y))"),
            Err(Error::SortMismatch {
                position: 1,
                expected: Sort::Int,
                found: Sort::Bool,
                ..
            })
        ));
    }

    #[test]
    fn custom_table() {
        let table = SymbolTable::standard();
        let a = crate::language::parse_expression_with(&table, "Eq(y, 1)").unwrap();
        let b = crate::language::parse_expression_with(&table, "Lt(y, 1)").unwrap();
        assert!(Rc::ptr_eq(&a.children()[0], &b.children()[0]));
    }
}
