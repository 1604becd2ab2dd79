//! Exhaustive, depth-bounded enumeration of expression trees.
//!
//! At depth `d > 0` the enumeration visits every factory in catalog order and
//! yields each tree rooted at that factory whose children come from the
//! enumeration at depth `d - 1`. Binary factories walk the full Cartesian
//! product, left operand major. Depth 0 yields nothing.
//!
//! The cursor is an explicit state machine: each [`Level`] remembers which
//! factory it is on and, for unary and binary factories, the cursors of its
//! child enumerations. Pulling the next tree is a plain synchronous call, so
//! a search can stop after any tree and resume later.

use crate::catalog::{Catalog, Factory};
use crate::ir::Expr;
use std::sync::Arc;

/// Forward-only cursor over all trees up to `max_depth`
pub struct Enumerator {
    catalog: Arc<Catalog>,
    root: Level,
    max_depth: usize,
    produced: u64,
    exhausted: bool,
}

impl Enumerator {
    pub fn new(catalog: Arc<Catalog>, max_depth: usize) -> Self {
        Self {
            catalog,
            root: Level::new(max_depth),
            max_depth,
            produced: 0,
            exhausted: false,
        }
    }

    /// Produce the next tree, or `None` once the enumeration is complete
    pub fn next_expr(&mut self) -> Option<Arc<Expr>> {
        if self.exhausted {
            return None;
        }
        match self.root.next(&self.catalog) {
            Some(expr) => {
                self.produced += 1;
                Some(expr)
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }

    /// Returns true once a pull has found nothing left.
    ///
    /// The cursor cannot look ahead, so this stays false until the pull after
    /// the last tree.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Number of trees produced so far
    pub fn produced(&self) -> u64 {
        self.produced
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }
}

impl Iterator for Enumerator {
    type Item = Arc<Expr>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_expr()
    }
}

/// Cursor over the trees of exactly one depth bound
struct Level {
    depth: usize,
    /// Index of the catalog factory currently being expanded
    factory: usize,
    state: LevelState,
}

enum LevelState {
    /// Nothing started for the current factory
    Start,
    Unary {
        child: Box<Level>,
    },
    Binary {
        left: Box<Level>,
        current_left: Arc<Expr>,
        right: Box<Level>,
    },
}

impl Level {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            factory: 0,
            state: LevelState::Start,
        }
    }

    fn child(&self) -> Box<Level> {
        Box::new(Level::new(self.depth - 1))
    }

    fn next(&mut self, catalog: &Catalog) -> Option<Arc<Expr>> {
        if self.depth == 0 {
            return None;
        }

        loop {
            let factory = catalog.get(self.factory)?;

            match std::mem::replace(&mut self.state, LevelState::Start) {
                LevelState::Start => match factory {
                    Factory::Unary(_) => {
                        self.state = LevelState::Unary { child: self.child() };
                    }
                    Factory::Binary(_) => {
                        let mut left = self.child();
                        match left.next(catalog) {
                            Some(first) => {
                                self.state = LevelState::Binary {
                                    left,
                                    current_left: first,
                                    right: self.child(),
                                };
                            }
                            None => self.factory += 1,
                        }
                    }
                    nullary => {
                        self.factory += 1;
                        return nullary.leaf();
                    }
                },

                LevelState::Unary { mut child } => match (factory, child.next(catalog)) {
                    (Factory::Unary(op), Some(operand)) => {
                        self.state = LevelState::Unary { child };
                        return Some(Expr::unary(op, operand));
                    }
                    _ => self.factory += 1,
                },

                LevelState::Binary {
                    mut left,
                    current_left,
                    mut right,
                } => {
                    let Factory::Binary(op) = factory else {
                        self.factory += 1;
                        continue;
                    };
                    match right.next(catalog) {
                        Some(operand) => {
                            let expr = Expr::binary(op, Arc::clone(&current_left), operand);
                            self.state = LevelState::Binary {
                                left,
                                current_left,
                                right,
                            };
                            return Some(expr);
                        }
                        // Right operands exhausted: advance the left one and restart the right
                        None => match left.next(catalog) {
                            Some(next_left) => {
                                self.state = LevelState::Binary {
                                    left,
                                    current_left: next_left,
                                    right: self.child(),
                                };
                            }
                            None => self.factory += 1,
                        },
                    }
                }
            }
        }
    }
}

/// Exact number of trees the enumeration yields, or `None` on overflow.
///
/// With `n`, `u`, `b` the nullary, unary and binary factory counts:
/// `N(0) = 0` and `N(d) = n + u * N(d - 1) + b * N(d - 1)^2`.
pub fn count_trees(catalog: &Catalog, max_depth: usize) -> Option<u128> {
    let (nullary, unary, binary) = catalog.arity_counts();
    let (nullary, unary, binary) = (nullary as u128, unary as u128, binary as u128);

    let mut count: u128 = 0;
    for _ in 0..max_depth {
        let pairs = count.checked_mul(count)?.checked_mul(binary)?;
        count = unary
            .checked_mul(count)?
            .checked_add(pairs)?
            .checked_add(nullary)?;
    }
    Some(count)
}
