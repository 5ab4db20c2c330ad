use std::{collections::HashMap, rc::Rc};

use crate::{
    node::Variable,
    operator::Operator,
    Expr, Node,
};

/// What a name in an annotation stands for.
#[derive(Debug, Clone)]
pub enum Entry {
    Variable(Expr),
    Constructor(Operator),
}

/// The closed vocabulary annotations are written in: the variables `x`, `y`
/// and `z`, the literals `1`, `2` and `3`, and one constructor per operator.
///
/// Leaves are built once per table and shared by every tree resolved against it.
pub struct SymbolTable {
    names: HashMap<&'static str, Entry>,
    literals: HashMap<i64, Expr>,
}

impl SymbolTable {
    pub const LITERALS: [i64; 3] = [1, 2, 3];

    pub fn standard() -> SymbolTable {
        let mut names = HashMap::new();
        for variable in Variable::ALL {
            names.insert(variable.name(), Entry::Variable(Node::variable(variable)));
        }
        for operator in Operator::ALL {
            names.insert(operator.name(), Entry::Constructor(operator));
        }

        let literals = Self::LITERALS
            .iter()
            .map(|value| (*value, Node::constant(*value)))
            .collect();

        SymbolTable { names, literals }
    }

    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        self.names.get(name)
    }

    pub fn literal(&self, value: i64) -> Option<Expr> {
        self.literals.get(&value).map(Rc::clone)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::standard()
    }
}
