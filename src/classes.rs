//! Grouping trees into equivalence classes.
//!
//! Trees with the same canonical tree always share a class. With
//! [`EquivalenceClasses::insert_checked`] the solver is asked as well, so trees
//! that only agree semantically, `Add(x, x)` and `Multiply(2, x)`, end up
//! together too.

use std::collections::BTreeMap;

use slog::{debug, Logger};

use crate::{
    env::SymbolicEnv,
    error::Error,
    statistics::Statistics,
    typing::Sorted,
    z3_checker::{self, Equivalence},
    Expr,
};

#[derive(Debug, Clone)]
pub struct Class {
    members: Vec<Expr>,
}

impl Class {
    /// The smallest member in the total order of trees.
    pub fn representative(&self) -> &Expr {
        // A class is created with its first member.
        self.members
            .iter()
            .min()
            .unwrap_or_else(|| unreachable!("empty class"))
    }

    pub fn members(&self) -> &[Expr] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct EquivalenceClasses {
    classes: Vec<Class>,
    // canonical tree -> index into `classes`
    by_canonical: BTreeMap<Expr, usize>,
    statistics: Statistics,
}

impl EquivalenceClasses {
    pub fn new() -> EquivalenceClasses {
        EquivalenceClasses::default()
    }

    /// Adds `expr` to the class of its canonical tree, opening a new class if
    /// there is none. Returns the index of the class.
    pub fn insert(&mut self, expr: Expr) -> usize {
        self.statistics.measure_expression();
        let canonical = expr.canonical_tree();
        if let Some(index) = self.by_canonical.get(&canonical) {
            self.statistics.measure_canonical_hit();
            self.classes[*index].members.push(expr);
            return *index;
        }
        self.open(canonical, expr)
    }

    /// Like [`EquivalenceClasses::insert`], but a tree without a canonical
    /// match is compared by the solver against each class of the same sort.
    /// Classes whose comparison is inconclusive are skipped.
    pub fn insert_checked(&mut self, expr: Expr, logger: &Logger) -> Result<usize, Error> {
        self.statistics.measure_expression();
        let canonical = expr.canonical_tree();
        if let Some(index) = self.by_canonical.get(&canonical) {
            self.statistics.measure_canonical_hit();
            self.classes[*index].members.push(expr);
            return Ok(*index);
        }

        let env = SymbolicEnv::new();
        let sort = expr.sort();
        for index in 0..self.classes.len() {
            let representative = self.classes[index].representative();
            if representative.sort() != sort {
                continue;
            }

            self.statistics.measure_invoke_z3();
            let verdict = z3_checker::equivalent(
                expr.to_symbolic(&env),
                representative.to_symbolic(&env),
                logger,
            )?;
            if verdict == Equivalence::Equivalent {
                debug!(logger, "merged into class";
                    "expr" => %expr, "representative" => %representative, "class" => index);
                self.statistics.measure_merge();
                self.by_canonical.insert(canonical, index);
                self.classes[index].members.push(expr);
                return Ok(index);
            }
        }

        Ok(self.open(canonical, expr))
    }

    fn open(&mut self, canonical: Expr, expr: Expr) -> usize {
        let index = self.classes.len();
        self.statistics.measure_new_class();
        self.by_canonical.insert(canonical, index);
        self.classes.push(Class {
            members: vec![expr],
        });
        index
    }

    /// Classes ordered by their representative.
    pub fn classes(&self) -> Vec<&Class> {
        let mut classes = self.classes.iter().collect::<Vec<_>>();
        classes.sort_by(|a, b| a.representative().cmp(b.representative()));
        classes
    }

    pub fn class_of(&self, expr: &Expr) -> Option<&Class> {
        self.by_canonical
            .get(&expr.canonical_tree())
            .map(|index| &self.classes[*index])
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }
}
