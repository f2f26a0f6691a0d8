//! Instruction sequence numbers.
//!
//! Sequence numbers are assigned 1-based in fetch (program) order and give a
//! total order over every instruction of a trace. They are the identity used
//! by the pipeline window, the timeline and the statistics.

use serde::Serialize;
use std::fmt;

/// A 1-based instruction sequence number.
///
/// Older instructions always compare lower than younger ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SeqNum(pub u32);

impl SeqNum {
    /// Creates a sequence number from its raw 1-based value.
    #[inline(always)]
    pub const fn new(n: u32) -> Self {
        Self(n)
    }

    /// Returns the raw 1-based value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SeqNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
