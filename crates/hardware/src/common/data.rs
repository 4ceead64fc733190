//! Memory Access Types.
//!
//! This module defines the classification of trace accesses replayed against
//! the cache. The kind of an access decides the following:
//! 1. **Lookup Path:** Which hit/miss counters are updated.
//! 2. **Fill State:** Whether a newly allocated block starts dirty.
//! 3. **Write Traffic:** Whether write-through traffic is generated.

use std::fmt;

/// Type of memory access in a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Data read. Fills are always clean.
    Read,

    /// Data write. Fills are dirty and, under write-through, every write
    /// reaches backing storage.
    Write,
}

impl AccessType {
    /// Trace token for this access kind (`r` or `w`).
    pub const fn token(self) -> char {
        match self {
            Self::Read => 'r',
            Self::Write => 'w',
        }
    }

    /// Parses a trace token, accepting `r`/`w` in either case.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "r" | "R" => Some(Self::Read),
            "w" | "W" => Some(Self::Write),
            _ => None,
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}
