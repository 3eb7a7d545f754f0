//! Integer sort positions and the stride arithmetic that allocates them.
//!
//! Positions order tasks inside one status bucket and have no meaning across
//! buckets. New values are handed out in multiples of a stride so that later
//! insertions can land between siblings without renumbering the bucket; a
//! clamp ceiling bounds growth from repeated appends until a rebalance
//! renumbers the bucket.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort position of a task within its status bucket.
///
/// Positions are advisory ordering state: equal values are tolerated (ties
/// resolve by write order in the store) and gaps are intentional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(i64);

impl Position {
    /// Creates a position from a raw value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw position value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stride and clamp parameters for position allocation.
///
/// # Examples
///
/// ```
/// use aalto::board::domain::OrderingConfig;
///
/// let config = OrderingConfig::default();
/// assert_eq!(config.stride, 1_000);
/// assert_eq!(config.clamp, 1_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderingConfig {
    /// Gap between consecutively allocated positions.
    pub stride: i64,
    /// Ceiling applied to cross-bucket move targets. Values at or beyond
    /// the ceiling sort last and signal that the bucket wants a rebalance.
    pub clamp: i64,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            stride: 1_000,
            clamp: 1_000_000,
        }
    }
}

impl OrderingConfig {
    /// Returns the position for the first task of an empty bucket.
    #[must_use]
    pub const fn initial_position(&self) -> Position {
        Position::new(self.stride)
    }

    /// Returns the position that sorts a new task after every existing one.
    ///
    /// `highest` is the bucket's current maximum position, obtained from a
    /// max query rather than a full scan; `None` means the bucket is empty.
    #[must_use]
    pub const fn append_after(&self, highest: Option<Position>) -> Position {
        match highest {
            Some(position) => Position::new(position.value().saturating_add(self.stride)),
            None => self.initial_position(),
        }
    }

    /// Returns the target position for a task dropped at `dest_index` in
    /// another bucket.
    ///
    /// The value is `(dest_index + 1) * stride`, clamped to the ceiling.
    /// Clamping is deliberate and silent: overflowing tasks all sort last,
    /// tie-broken by write order, and ordering degrades gracefully until a
    /// rebalance.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DestinationIndexOutOfRange`] when the
    /// index itself cannot be represented; this is a caller precondition
    /// violation, not a runtime condition to recover from.
    pub fn cross_bucket_position(&self, dest_index: usize) -> Result<Position, BoardDomainError> {
        let index = i64::try_from(dest_index)
            .map_err(|_| BoardDomainError::DestinationIndexOutOfRange(dest_index))?;
        let unclamped = index.saturating_add(1).saturating_mul(self.stride);
        Ok(Position::new(unclamped.min(self.clamp)))
    }

    /// Returns `true` when a bucket whose maximum position is `highest`
    /// has reached the clamp ceiling and would benefit from a rebalance.
    #[must_use]
    pub fn at_clamp(&self, highest: Option<Position>) -> bool {
        highest.is_some_and(|position| position.value() >= self.clamp)
    }

    /// Returns the stride multiple for the zero-based `index`, saturating
    /// instead of overflowing.
    pub(crate) fn stride_multiple(&self, index: usize) -> i64 {
        let step = i64::try_from(index.saturating_add(1)).unwrap_or(i64::MAX);
        step.saturating_mul(self.stride)
    }
}
