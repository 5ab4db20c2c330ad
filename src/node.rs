//! Expression trees.
//!
//! A [`Node`] never changes after construction, so each derived view (height,
//! text, symbolic form, canonical form) is computed on first use and kept in a
//! write-once cell. Every view is a pure function of the node, recomputing it
//! would give the same value.
//!
//! Nodes compare by their text: two trees printing the same are equal, however
//! they were built. The total order sorts by height first, then by the sort
//! order of the node kind (constants before variables before operators), then
//! by the leaf name or by the children from left to right.

use std::{
    cell::OnceCell,
    cmp::Ordering,
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
    rc::Rc,
};

use itertools::Itertools;
use slog::Logger;

use crate::{
    env::{Env, SymbolicEnv},
    error::Error,
    eval::Value,
    language::Identifier,
    operator::Operator,
    symbolic::Symbolic,
    z3_checker::{self, Equivalence},
};

pub type Expr = Rc<Node>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    X,
    Y,
    Z,
}

impl Variable {
    pub const ALL: [Variable; 3] = [Variable::X, Variable::Y, Variable::Z];

    pub fn name(self) -> &'static str {
        match self {
            Variable::X => "x",
            Variable::Y => "y",
            Variable::Z => "z",
        }
    }

    pub fn from_name(name: &str) -> Option<Variable> {
        Variable::ALL
            .iter()
            .copied()
            .find(|variable| variable.name() == name)
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Constant(i64),
    Variable(Variable),
    Operator(Operator),
}

pub struct Node {
    kind: Kind,
    // Empty for leaves
    children: Vec<Expr>,
    height: OnceCell<usize>,
    text: OnceCell<String>,
    symbolic: OnceCell<Symbolic>,
    // None when the node is its own canonical form
    canonical: OnceCell<Option<Expr>>,
}

impl Node {
    fn with_kind(kind: Kind, children: Vec<Expr>) -> Expr {
        Rc::new(Node {
            kind,
            children,
            height: OnceCell::new(),
            text: OnceCell::new(),
            symbolic: OnceCell::new(),
            canonical: OnceCell::new(),
        })
    }

    pub fn constant(value: i64) -> Expr {
        Node::with_kind(Kind::Constant(value), Vec::new())
    }

    pub fn variable(variable: Variable) -> Expr {
        Node::with_kind(Kind::Variable(variable), Vec::new())
    }

    /// Builds an operator node, checking the number of operands.
    /// Operand sorts are not checked here, see [`crate::typing`].
    pub fn build(operator: Operator, children: Vec<Expr>) -> Result<Expr, Error> {
        if children.len() != operator.arity() {
            return Err(Error::ArityMismatch {
                constructor: Identifier::from(operator.name()),
                expected: operator.arity(),
                found: children.len(),
            });
        }
        Ok(Node::unchecked(operator, children))
    }

    pub(crate) fn unchecked(operator: Operator, children: Vec<Expr>) -> Expr {
        debug_assert_eq!(children.len(), operator.arity());
        Node::with_kind(Kind::Operator(operator), children)
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn operator(&self) -> Option<Operator> {
        match self.kind {
            Kind::Operator(operator) => Some(operator),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Expr] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn sort_order(&self) -> u8 {
        match self.kind {
            Kind::Constant(_) => 0,
            Kind::Variable(_) => 1,
            Kind::Operator(operator) => operator.sort_order(),
        }
    }

    /// Operator tag, variable name or constant literal.
    pub fn name(&self) -> &str {
        match self.kind {
            Kind::Constant(_) => self.text(),
            Kind::Variable(variable) => variable.name(),
            Kind::Operator(operator) => operator.name(),
        }
    }

    /// 0 for leaves, one more than the highest child otherwise.
    pub fn height(&self) -> usize {
        *self.height.get_or_init(|| {
            self.children
                .iter()
                .map(|child| child.height() + 1)
                .max()
                .unwrap_or(0)
        })
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(|child| child.size()).sum::<usize>()
    }

    pub fn text(&self) -> &str {
        self.text.get_or_init(|| match self.kind {
            Kind::Constant(value) => value.to_string(),
            Kind::Variable(variable) => variable.name().to_owned(),
            Kind::Operator(operator) => format!(
                "{}({})",
                operator.name(),
                self.children.iter().map(|child| child.text()).join(", ")
            ),
        })
    }

    /// Evaluates every child, branches and both sides of connectives included,
    /// then combines the results.
    pub fn evaluate(&self, env: &Env<i64>) -> Value {
        match self.kind {
            Kind::Constant(value) => Value::Int(value),
            Kind::Variable(variable) => Value::Int(*env.get(variable)),
            Kind::Operator(operator) => operator.apply(
                self.children
                    .iter()
                    .map(|child| child.evaluate(env))
                    .collect(),
            ),
        }
    }

    pub fn to_symbolic(&self, env: &SymbolicEnv) -> &Symbolic {
        self.symbolic.get_or_init(|| match self.kind {
            Kind::Constant(value) => Symbolic::Int(value),
            Kind::Variable(variable) => env.get(variable).clone(),
            Kind::Operator(operator) => operator.apply(
                self.children
                    .iter()
                    .map(|child| child.to_symbolic(env).clone())
                    .collect(),
            ),
        })
    }

    /// Asks the solver whether both trees compute the same function.
    pub fn equivalent_to(&self, other: &Node, logger: &Logger) -> Result<Equivalence, Error> {
        let env = SymbolicEnv::new();
        z3_checker::equivalent(self.to_symbolic(&env), other.to_symbolic(&env), logger)
    }

    /// The representative of this node's equivalence sub-class.
    ///
    /// Only the operands of this node are reordered; children keep whatever
    /// form they were built with. See [`Node::canonical_tree`].
    pub fn canonical_form(self: &Rc<Self>) -> Expr {
        let canonical = self.canonical.get_or_init(|| match self.kind {
            Kind::Operator(operator) => operator.canonicalize(&self.children),
            _ => None,
        });
        match canonical {
            Some(canonical) => Rc::clone(canonical),
            None => Rc::clone(self),
        }
    }

    /// Canonicalizes the whole tree bottom-up.
    pub fn canonical_tree(self: &Rc<Self>) -> Expr {
        let Kind::Operator(operator) = self.kind else {
            return Rc::clone(self);
        };
        let children = self
            .children
            .iter()
            .map(|child| child.canonical_tree())
            .collect::<Vec<_>>();

        let unchanged = children
            .iter()
            .zip(&self.children)
            .all(|(canonical, child)| Rc::ptr_eq(canonical, child));
        if unchanged {
            self.canonical_form()
        } else {
            Node::unchecked(operator, children).canonical_form()
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.text() == other.text()
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text().hash(state);
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        if std::ptr::eq(self, other) {
            return Ordering::Equal;
        }
        match self.height().cmp(&other.height()) {
            Ordering::Equal => (),
            ordering => return ordering,
        }
        if self.text() == other.text() {
            return Ordering::Equal;
        }
        match self.sort_order().cmp(&other.sort_order()) {
            Ordering::Equal => (),
            ordering => return ordering,
        }
        if self.name() != other.name() {
            return self.name().cmp(other.name());
        }
        for (lhs, rhs) in self.children.iter().zip(&other.children) {
            if lhs != rhs {
                return lhs.cmp(rhs);
            }
        }
        panic!(
            "{} and {} differ but neither kind nor children order them",
            self, other
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::*;

    #[test]
    fn leaf_text() {
        assert_eq!(c2().text(), "2");
        assert_eq!(z().text(), "z");
        assert_eq!(constant(-7).text(), "-7");
    }

    #[test]
    fn operator_text() {
        let e = ite(and(lt(x(), c3()), not(eq(y(), z()))), add(x(), c1()), multiply(y(), c2()));
        assert_eq!(
            e.text(),
            "Ite(And(Lt(x, 3), Not(Eq(y, z))), Add(x, 1), Multiply(y, 2))"
        );
        assert_eq!(e.to_string(), e.text());
    }

    #[test]
    fn height() {
        assert_eq!(x().height(), 0);
        assert_eq!(add(x(), c1()).height(), 1);
        assert_eq!(not(lt(add(x(), c1()), y())).height(), 3);
    }

    #[test]
    fn size() {
        assert_eq!(ite(lt(x(), c3()), c1(), c2()).size(), 6);
    }

    #[test]
    fn memoized_views_are_stable() {
        let env = SymbolicEnv::new();
        let e = add(multiply(z(), y()), x());
        assert!(std::ptr::eq(e.text(), e.text()));
        assert_eq!(e.height(), e.height());
        assert!(std::ptr::eq(e.to_symbolic(&env), e.to_symbolic(&env)));
        assert!(Rc::ptr_eq(&e.canonical_form(), &e.canonical_form()));
    }

    #[test]
    fn equality_is_textual() {
        let shared = add(x(), c1());
        let a = multiply(Rc::clone(&shared), Rc::clone(&shared));
        let b = multiply(add(x(), c1()), add(x(), c1()));
        assert_eq!(a, b);
        assert_ne!(a, multiply(add(c1(), x()), add(x(), c1())));

        let mut set = std::collections::HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn evaluation() {
        let env = Env::new(2, 3, 5);
        assert_eq!(add(x(), c3()).evaluate(&env), Value::Int(5));
        assert_eq!(multiply(c2(), c3()).evaluate(&env), Value::Int(6));
        assert_eq!(ite(lt(x(), c3()), c1(), c2()).evaluate(&env), Value::Int(1));
        assert_eq!(ite(lt(z(), c3()), c1(), c2()).evaluate(&env), Value::Int(2));
        assert_eq!(or(eq(x(), c2()), lt(z(), y())).evaluate(&env), Value::Bool(true));
        assert_eq!(not(and(eq(x(), c2()), lt(z(), y()))).evaluate(&env), Value::Bool(true));
    }

    #[test]
    fn symbolic_translation() {
        let env = SymbolicEnv::new();
        assert_eq!(add(x(), c3()).to_symbolic(&env).to_string(), "x + 3");
        assert_eq!(
            ite(lt(x(), c3()), c1(), c2()).to_symbolic(&env).to_string(),
            "Piecewise((1, x < 3), (2, True))"
        );
        assert_eq!(
            and(lt(x(), y()), not(eq(y(), z()))).to_symbolic(&env).to_string(),
            "(x < y) & ~Eq(y, z)"
        );
        assert_eq!(multiply(c2(), c3()).to_symbolic(&env), &Symbolic::Int(6));
    }

    #[test]
    fn commutative_operands_are_sorted() {
        let p = multiply(y(), c2());
        let q = add(x(), c1());
        assert!(q.text() < p.text());

        assert_eq!(add(p.clone(), q.clone()).canonical_form(), add(q.clone(), p.clone()));
        assert_eq!(multiply(z(), x()).canonical_form(), multiply(x(), z()));
        assert_eq!(eq(y(), c3()).canonical_form(), eq(c3(), y()));
        assert_eq!(
            and(lt(y(), x()), lt(x(), y())).canonical_form(),
            and(lt(x(), y()), lt(y(), x()))
        );
        assert_eq!(
            or(lt(y(), x()), lt(x(), y())).canonical_form(),
            or(lt(x(), y()), lt(y(), x()))
        );
    }

    #[test]
    fn ordered_operands_are_kept() {
        let e = add(c1(), x());
        assert!(Rc::ptr_eq(&e.canonical_form(), &e));
    }

    #[test]
    fn non_commutative_operators_are_their_own_form() {
        let e = lt(y(), x());
        assert!(Rc::ptr_eq(&e.canonical_form(), &e));
        let e = ite(lt(y(), x()), z(), c1());
        assert!(Rc::ptr_eq(&e.canonical_form(), &e));
        let e = not(eq(z(), c1()));
        assert!(Rc::ptr_eq(&e.canonical_form(), &e));
    }

    #[test]
    fn canonical_form_is_idempotent() {
        for e in [
            add(z(), x()),
            multiply(c3(), c2()),
            eq(y(), x()),
            and(lt(z(), x()), lt(c1(), y())),
            or(eq(z(), x()), lt(c1(), y())),
        ] {
            let canonical = e.canonical_form();
            assert_eq!(canonical.canonical_form(), canonical);
        }
    }

    #[test]
    fn canonical_form_is_shallow() {
        let e = add(multiply(z(), y()), c1());
        assert_eq!(e.canonical_form().text(), "Add(1, Multiply(z, y))");
        assert_eq!(e.canonical_tree().text(), "Add(1, Multiply(y, z))");
    }

    #[test]
    fn canonical_tree_identifies_swapped_trees() {
        let a = not(and(eq(y(), x()), lt(add(z(), c2()), c3())));
        let b = not(and(lt(add(c2(), z()), c3()), eq(x(), y())));
        assert_ne!(a, b);
        assert_eq!(a.canonical_tree(), b.canonical_tree());
    }

    #[test]
    fn order_by_height_first() {
        assert!(c3() < add(c1(), c1()));
        assert!(not(lt(x(), y())) > add(c1(), c1()));
        assert!(add(x(), y()) < not(lt(x(), y())));
    }

    #[test]
    fn leaves_before_operators() {
        let mut nodes = vec![z(), c2(), x(), c1(), y(), c3()];
        nodes.sort();
        let texts = nodes.iter().map(|node| node.text()).collect::<Vec<_>>();
        assert_eq!(texts, vec!["1", "2", "3", "x", "y", "z"]);
    }

    #[test]
    fn order_by_sort_order_then_children() {
        assert!(add(z(), z()) < multiply(c1(), c1()));
        assert!(multiply(c1(), c1()) < lt(c1(), c1()));
        assert!(add(c1(), z()) < add(x(), c1()));
        assert!(add(x(), c1()) < add(x(), y()));
        assert_eq!(add(x(), y()).cmp(&add(x(), y())), Ordering::Equal);
    }

    #[test]
    fn equivalence_of_swapped_trees() {
        let logger = Logger::root(slog::Discard, slog::o!());
        let a = eq(add(x(), c1()), z());
        let b = eq(z(), add(c1(), x()));
        assert!(a.equivalent_to(&b, &logger).unwrap().is_equivalent());
        assert!(!a.equivalent_to(&lt(x(), z()), &logger).unwrap().is_equivalent());
    }

    #[test]
    fn arity_is_checked() {
        let result = Node::build(Operator::Not, vec![x(), y()]);
        assert!(matches!(
            result,
            Err(Error::ArityMismatch {
                expected: 1,
                found: 2,
                ..
            })
        ));
        assert!(Node::build(Operator::Ite, vec![lt(x(), y()), x(), y()]).is_ok());
    }
}
