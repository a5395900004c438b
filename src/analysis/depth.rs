//! Nesting depth bound for recursive passes.

use crate::error::{Error, Result};

/// Default maximum nesting of statements and expressions.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Largest depth limit a parser or config accepts.
pub const MAX_DEPTH_LIMIT: usize = 1024;

/// Tracks how deep a recursive pass currently is and fails once the
/// configured limit would be exceeded.
#[derive(Debug, Clone, Copy)]
pub struct DepthBudget {
    limit: usize,
    current: usize,
}

impl DepthBudget {
    pub fn new(limit: usize) -> Self {
        Self { limit, current: 0 }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Descend one level.
    pub fn enter(&mut self) -> Result<()> {
        if self.current >= self.limit {
            return Err(Error::DepthExceeded { limit: self.limit });
        }
        self.current += 1;
        Ok(())
    }

    /// Return from a level entered with [`enter`](Self::enter).
    pub fn exit(&mut self) {
        self.current = self.current.saturating_sub(1);
    }
}

impl Default for DepthBudget {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}
