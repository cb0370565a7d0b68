use std::fmt;
use anyhow::{ensure, Result};

/// Half-open time window [start, end) in epoch seconds. The end of one
/// polling cycle becomes the start of the next.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Window {
    pub start: u64,
    pub end:   u64,
}

impl Window {
    pub fn new(start: u64, end: u64) -> Result<Self> {
        ensure!(end > start, "invalid window [{}, {})", start, end);
        Ok(Self {
            start: start,
            end:   end,
        })
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
