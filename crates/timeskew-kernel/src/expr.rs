//! Symbolic expression trees for order-sensitive verification.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::algebra::CellAlgebra;

/// A symbolic expression: a shared, immutable binary tree over named
/// symbols.
///
/// No simplification, reassociation, or constant folding is ever
/// applied: `(a - b) + c` and `a - (b - c)` are different values here
/// even though they are numerically equal. Equality is structural, with
/// a pointer fast path: subtrees cloned from the same update are shared
/// `Rc`s, so comparing two runs of the same schedule is cheap while any
/// divergence recurses only until the first structural difference.
///
/// Expression size grows multiplicatively with every half-step; see the
/// verification harness documentation for the practical grid and
/// timestep limits.
#[derive(Clone)]
pub struct Expr(Rc<Node>);

enum Node {
    Symbol(String),
    Add(Expr, Expr),
    Sub(Expr, Expr),
    Mul(Expr, Expr),
}

impl Expr {
    /// A named terminal symbol.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self(Rc::new(Node::Symbol(name.into())))
    }

    /// Number of nodes in the tree, counting shared subtrees once per
    /// occurrence. Diagnostic only; exponential in the number of
    /// half-steps executed.
    pub fn node_count(&self) -> usize {
        match &*self.0 {
            Node::Symbol(_) => 1,
            Node::Add(a, b) | Node::Sub(a, b) | Node::Mul(a, b) => {
                1 + a.node_count() + b.node_count()
            }
        }
    }
}

impl Default for Expr {
    /// The untouched-cell placeholder. Harnesses overwrite every cell
    /// with a unique symbol before running, so this only ever appears if
    /// seeding was skipped.
    fn default() -> Self {
        Self::symbol("0")
    }
}

impl CellAlgebra for Expr {
    fn add(&self, rhs: &Self) -> Self {
        Self(Rc::new(Node::Add(self.clone(), rhs.clone())))
    }

    fn sub(&self, rhs: &Self) -> Self {
        Self(Rc::new(Node::Sub(self.clone(), rhs.clone())))
    }

    fn mul(&self, rhs: &Self) -> Self {
        Self(Rc::new(Node::Mul(self.clone(), rhs.clone())))
    }
}

/// Memoized structural comparison of expression trees.
///
/// A cell's expression after many half-steps is a small DAG (updates
/// share their operands through `Rc`) whose fully-expanded tree is
/// exponentially larger. Naive recursive equality walks the expanded
/// tree; this comparer records every pointer pair already proven equal,
/// bounding a comparison by the DAG size instead. One comparer should
/// be shared across a whole field sweep so subtrees common to many
/// cells are proven once.
#[derive(Debug, Default)]
pub struct ExprComparer {
    proven: HashSet<(usize, usize)>,
}

impl ExprComparer {
    /// A comparer with an empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Structural equality of `a` and `b`.
    pub fn equal(&mut self, a: &Expr, b: &Expr) -> bool {
        if Rc::ptr_eq(&a.0, &b.0) {
            return true;
        }
        let key = (Rc::as_ptr(&a.0) as usize, Rc::as_ptr(&b.0) as usize);
        if self.proven.contains(&key) {
            return true;
        }
        let equal = match (&*a.0, &*b.0) {
            (Node::Symbol(x), Node::Symbol(y)) => x == y,
            (Node::Add(a1, a2), Node::Add(b1, b2))
            | (Node::Sub(a1, a2), Node::Sub(b1, b2))
            | (Node::Mul(a1, a2), Node::Mul(b1, b2)) => self.equal(a1, b1) && self.equal(a2, b2),
            _ => false,
        };
        if equal {
            self.proven.insert(key);
        }
        equal
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        ExprComparer::new().equal(self, other)
    }
}

impl Eq for Expr {}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            Node::Symbol(name) => f.write_str(name),
            Node::Add(a, b) => write!(f, "({a} + {b})"),
            Node::Sub(a, b) => write!(f, "({a} - {b})"),
            Node::Mul(a, b) => write!(f, "({a} * {b})"),
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    #[test]
    fn structural_equality_ignores_allocation() {
        let a = sym("x").add(&sym("y"));
        let b = sym("x").add(&sym("y"));
        assert_eq!(a, b);
    }

    #[test]
    fn shared_clones_compare_equal_via_pointer() {
        let a = sym("x").mul(&sym("y"));
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn operand_order_matters() {
        let ab = sym("a").sub(&sym("b"));
        let ba = sym("b").sub(&sym("a"));
        assert_ne!(ab, ba);
    }

    #[test]
    fn operation_kind_matters() {
        assert_ne!(sym("a").add(&sym("b")), sym("a").sub(&sym("b")));
    }

    #[test]
    fn association_is_not_rewritten() {
        let left = sym("a").sub(&sym("b")).add(&sym("c"));
        let right = sym("a").sub(&sym("b").sub(&sym("c")));
        assert_ne!(left, right);
    }

    #[test]
    fn display_is_fully_parenthesized() {
        let e = sym("v(0,0,0,0)").mul(&sym("vv(0,0,0,0)")).add(&sym("t"));
        assert_eq!(e.to_string(), "((v(0,0,0,0) * vv(0,0,0,0)) + t)");
    }

    #[test]
    fn node_count_counts_occurrences() {
        let x = sym("x");
        let e = x.add(&x); // shared subtree counted twice
        assert_eq!(e.node_count(), 3);
    }
}
