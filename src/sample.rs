use std::rc::Rc;

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{node::Variable, operator::Operator, typing::Sort, Expr, Node};

const LITERALS: [i64; 3] = [1, 2, 3];

/// Random well-sorted trees over the annotation vocabulary.
///
/// Leaves are shared between the trees of one generator, like leaves resolved
/// against one symbol table.
pub struct Generator {
    rng: StdRng,
    variables: Vec<Expr>,
    constants: Vec<Expr>,
}

impl Generator {
    pub fn new(seed: u64) -> Generator {
        Generator {
            rng: StdRng::seed_from_u64(seed),
            variables: Variable::ALL.iter().map(|v| Node::variable(*v)).collect(),
            constants: LITERALS.iter().map(|c| Node::constant(*c)).collect(),
        }
    }

    /// A tree of `sort` no higher than `max_height`.
    ///
    /// A boolean tree needs an operator, so it is at least of height 1.
    pub fn expression(&mut self, sort: Sort, max_height: usize) -> Expr {
        let leaf = sort == Sort::Int && (max_height == 0 || self.rng.gen_bool(0.3));
        if leaf {
            return self.leaf();
        }

        let candidates = Operator::ALL
            .iter()
            .copied()
            .filter(|operator| operator.signature().1 == sort)
            .filter(|operator| {
                // Operands of a boolean operator at height 1 must be integers.
                max_height > 1 || operator.signature().0.iter().all(|s| *s == Sort::Int)
            })
            .collect::<Vec<_>>();

        let operator = match candidates.choose(&mut self.rng) {
            Some(operator) => *operator,
            None => return self.leaf(),
        };
        let children = operator
            .signature()
            .0
            .iter()
            .map(|operand| self.expression(*operand, max_height.saturating_sub(1)))
            .collect();
        Node::unchecked(operator, children)
    }

    /// `count` trees with sorts picked at random.
    pub fn expressions(&mut self, count: usize, max_height: usize) -> Vec<Expr> {
        (0..count)
            .map(|_| {
                let sort = if max_height > 0 && self.rng.gen_bool(0.5) {
                    Sort::Bool
                } else {
                    Sort::Int
                };
                self.expression(sort, max_height)
            })
            .collect()
    }

    fn leaf(&mut self) -> Expr {
        let pool = if self.rng.gen_bool(0.5) {
            &self.variables
        } else {
            &self.constants
        };
        let index = self.rng.gen_range(0..pool.len());
        Rc::clone(&pool[index])
    }
}
