use std::{cmp::Ordering, fmt::Display, ops::Deref};

use crate::{node::Variable, symbolic::Symbolic};

/// Binding of the three variables `x`, `y` and `z`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Env<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> Env<T> {
    pub fn new(x: T, y: T, z: T) -> Env<T> {
        Env { x, y, z }
    }

    pub fn get(&self, variable: Variable) -> &T {
        match variable {
            Variable::X => &self.x,
            Variable::Y => &self.y,
            Variable::Z => &self.z,
        }
    }
}

impl Display for Env<i64> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x = {}, y = {}, z = {}", self.x, self.y, self.z)
    }
}

// z is the most significant variable, x the least.
impl PartialOrd for Env<i64> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Env<i64> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.z
            .cmp(&other.z)
            .then(self.y.cmp(&other.y))
            .then(self.x.cmp(&other.x))
    }
}

/// The symbolic environment: every variable is bound to the symbol of the same name.
///
/// It can only be built with [`SymbolicEnv::new`], so all symbolic environments
/// are the same binding and a node may memoize its symbolic form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolicEnv(Env<Symbolic>);

impl SymbolicEnv {
    pub fn new() -> SymbolicEnv {
        SymbolicEnv(Env::new(
            Symbolic::symbol(Variable::X.name()),
            Symbolic::symbol(Variable::Y.name()),
            Symbolic::symbol(Variable::Z.name()),
        ))
    }
}

impl Default for SymbolicEnv {
    fn default() -> Self {
        SymbolicEnv::new()
    }
}

impl Deref for SymbolicEnv {
    type Target = Env<Symbolic>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        let env = Env::new(2, 3, 5);
        assert_eq!(*env.get(Variable::X), 2);
        assert_eq!(*env.get(Variable::Z), 5);
        assert_eq!(env.to_string(), "x = 2, y = 3, z = 5");
    }

    #[test]
    fn ordered_by_z_first() {
        let mut envs = vec![Env::new(9, 0, 1), Env::new(0, 1, 0), Env::new(1, 0, 0)];
        envs.sort();
        assert_eq!(
            envs,
            vec![Env::new(1, 0, 0), Env::new(0, 1, 0), Env::new(9, 0, 1)]
        );
    }

    #[test]
    fn symbolic_names() {
        let env = SymbolicEnv::new();
        assert_eq!(env.get(Variable::Y).to_string(), "y");
        assert_eq!(env, SymbolicEnv::default());
    }
}
