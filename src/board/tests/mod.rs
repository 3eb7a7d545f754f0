//! Unit tests for board ordering and change-history behaviour.
