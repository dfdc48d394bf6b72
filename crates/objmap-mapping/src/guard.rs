//! Recursion bookkeeping for record traversal

use std::any::TypeId;

use objmap_reflect::{Reflect, identity};
use tracing::trace;

use crate::{Error, Result};

/// Tracks the records and collections on the active traversal path
///
/// Entering a record that is already on the path is a cycle. Records and
/// collection levels both count toward `max_depth`; going past it is a depth
/// overflow. Every successful [`enter`](Self::enter) must be paired with a
/// [`leave`](Self::leave), every [`descend`](Self::descend) with an
/// [`ascend`](Self::ascend).
#[derive(Debug, Clone)]
pub struct TraversalGuard {
    max_depth: usize,
    path: Vec<(usize, TypeId)>,
    nesting: usize,
}

impl TraversalGuard {
    /// Create a guard with an empty path
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            path: Vec::new(),
            nesting: 0,
        }
    }

    /// Push a record onto the active path
    pub fn enter<R: Reflect + ?Sized>(&mut self, record: &R) -> Result<()> {
        let shape = record.type_info().name;
        let id = identity(record);

        if self.path.contains(&id) {
            trace!(shape, depth = self.path.len(), "Cycle detected");
            return Err(Error::CycleDetected { shape });
        }
        self.check_depth(shape)?;

        self.path.push(id);
        Ok(())
    }

    /// Pop the most recently entered record
    pub fn leave(&mut self) {
        self.path.pop();
    }

    /// Count one sequence or map level toward the depth limit
    pub fn descend(&mut self, shape: &'static str) -> Result<()> {
        self.check_depth(shape)?;
        self.nesting += 1;
        Ok(())
    }

    /// Undo the most recent [`descend`](Self::descend)
    pub fn ascend(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }

    /// Number of records and collection levels on the active path
    pub fn depth(&self) -> usize {
        self.path.len() + self.nesting
    }

    /// Configured depth limit
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn check_depth(&self, shape: &'static str) -> Result<()> {
        if self.depth() >= self.max_depth {
            trace!(shape, max_depth = self.max_depth, "Depth limit reached");
            return Err(Error::DepthExceeded {
                shape,
                max_depth: self.max_depth,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use objmap_reflect::impl_record;

    #[derive(Debug, Clone, Default)]
    struct Inner {
        value: i64,
    }
    impl_record!(Inner { value });

    #[derive(Debug, Clone, Default)]
    struct Outer {
        inner: Inner,
    }
    impl_record!(Outer { inner });

    #[test]
    fn test_enter_and_leave() {
        let outer = Outer::default();
        let mut guard = TraversalGuard::new(4);

        guard.enter(&outer).unwrap();
        guard.enter(&outer.inner).unwrap();
        assert_eq!(guard.depth(), 2);

        guard.leave();
        guard.leave();
        assert_eq!(guard.depth(), 0);
    }

    #[test]
    fn test_reentry_is_a_cycle() {
        let outer = Outer::default();
        let mut guard = TraversalGuard::new(4);

        guard.enter(&outer).unwrap();
        let err = guard.enter(&outer).unwrap_err();

        assert!(matches!(err, Error::CycleDetected { shape: "Outer" }));
        assert_eq!(guard.depth(), 1);
    }

    #[test]
    fn test_same_address_different_type_is_not_a_cycle() {
        let outer = Outer {
            inner: Inner { value: 3 },
        };
        let mut guard = TraversalGuard::new(4);

        guard.enter(&outer).unwrap();
        assert!(guard.enter(&outer.inner).is_ok());
    }

    #[test]
    fn test_depth_limit() {
        let outer = Outer::default();
        let mut guard = TraversalGuard::new(1);

        guard.enter(&outer).unwrap();
        let err = guard.enter(&outer.inner).unwrap_err();

        assert!(matches!(
            err,
            Error::DepthExceeded {
                shape: "Inner",
                max_depth: 1
            }
        ));
    }

    #[test]
    fn test_collection_levels_count_toward_depth() {
        let outer = Outer::default();
        let mut guard = TraversalGuard::new(3);

        guard.enter(&outer).unwrap();
        guard.descend("Vec").unwrap();
        guard.descend("Vec").unwrap();
        assert_eq!(guard.depth(), 3);

        let err = guard.descend("Vec").unwrap_err();
        assert!(matches!(err, Error::DepthExceeded { max_depth: 3, .. }));
        assert!(guard.enter(&outer.inner).is_err());

        guard.ascend();
        assert!(guard.enter(&outer.inner).is_ok());
        assert_eq!(guard.depth(), 3);
    }

    #[test]
    fn test_siblings_may_repeat_after_leave() {
        let outer = Outer::default();
        let mut guard = TraversalGuard::new(2);

        guard.enter(&outer).unwrap();
        guard.leave();
        assert!(guard.enter(&outer).is_ok());
        assert_eq!(guard.max_depth(), 2);
    }
}
