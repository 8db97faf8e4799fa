#![forbid(unsafe_code)]

//! Exclusive toggle group: opening one member closes the others.
//!
//! Used for the "collection item" accordions. Unlike disclosure panels these
//! carry no persistence and no height animation; the adapter only flips
//! classes.

use tracing::debug;

/// Which members changed as a result of one activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupChange {
    /// Member that just opened, if the activation opened one.
    pub opened: Option<usize>,
    /// Members that must close (previously open, now not).
    pub closed: Vec<usize>,
}

/// A set of mutually exclusive toggles, at most one open.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExclusiveGroup {
    len: usize,
    open: Option<usize>,
}

impl ExclusiveGroup {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn open_member(&self) -> Option<usize> {
        self.open
    }

    /// Activate a member: open it (closing any other), or close it when it
    /// was already the open one. Out-of-range indices change nothing.
    pub fn activate(&mut self, index: usize) -> GroupChange {
        if index >= self.len {
            return GroupChange {
                opened: None,
                closed: Vec::new(),
            };
        }
        let closed: Vec<usize> = self.open.into_iter().collect();
        if self.open == Some(index) {
            self.open = None;
            debug!(index, "group member closed");
            return GroupChange {
                opened: None,
                closed,
            };
        }
        self.open = Some(index);
        debug!(index, "group member opened");
        GroupChange {
            opened: Some(index),
            closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn opening_a_member_closes_the_previous_one() {
        let mut group = ExclusiveGroup::new(3);
        assert_eq!(
            group.activate(0),
            GroupChange {
                opened: Some(0),
                closed: vec![]
            }
        );
        assert_eq!(
            group.activate(2),
            GroupChange {
                opened: Some(2),
                closed: vec![0]
            }
        );
        assert_eq!(group.open_member(), Some(2));
    }

    #[test]
    fn activating_the_open_member_closes_it() {
        let mut group = ExclusiveGroup::new(2);
        group.activate(1);
        assert_eq!(
            group.activate(1),
            GroupChange {
                opened: None,
                closed: vec![1]
            }
        );
        assert_eq!(group.open_member(), None);
    }

    #[test]
    fn out_of_range_is_a_noop() {
        let mut group = ExclusiveGroup::new(1);
        group.activate(0);
        assert_eq!(
            group.activate(5),
            GroupChange {
                opened: None,
                closed: vec![]
            }
        );
        assert_eq!(group.open_member(), Some(0));
    }
}
