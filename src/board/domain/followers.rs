//! Follower membership as first-class domain state.

use super::MemberId;
use serde::{Deserialize, Serialize};
use std::collections::btree_set;
use std::collections::BTreeSet;

/// Set of members following a task for notification fan-out.
///
/// Storage backends may flatten the set into an encoded document field; in
/// the domain it is a real set with idempotent membership operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FollowerSet(BTreeSet<MemberId>);

impl FollowerSet {
    /// Creates an empty follower set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Adds a follower, returning `true` when membership changed.
    pub fn follow(&mut self, member: MemberId) -> bool {
        self.0.insert(member)
    }

    /// Removes a follower, returning `true` when membership changed.
    pub fn unfollow(&mut self, member: &MemberId) -> bool {
        self.0.remove(member)
    }

    /// Returns `true` when the member currently follows the task.
    #[must_use]
    pub fn follows(&self, member: &MemberId) -> bool {
        self.0.contains(member)
    }

    /// Iterates followers in identifier order.
    #[must_use]
    pub fn iter(&self) -> btree_set::Iter<'_, MemberId> {
        self.0.iter()
    }

    /// Returns the number of followers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when nobody follows the task.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<MemberId> for FollowerSet {
    fn from_iter<I: IntoIterator<Item = MemberId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FollowerSet {
    type Item = &'a MemberId;
    type IntoIter = btree_set::Iter<'a, MemberId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for FollowerSet {
    type Item = MemberId;
    type IntoIter = btree_set::IntoIter<MemberId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
