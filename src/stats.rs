//! Monotonic parser statistics, surfaced read-only to the embedder.

/// Counters tracked by a [`crate::Parser`][crate::framer::Framer]. All four
/// only ever increase between calls to [`Stats::reset`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub sentences_parsed: u32,
    pub checksum_errors: u32,
    pub parse_errors: u32,
    pub buffer_overflows: u32,
}

impl Stats {
    pub const fn new() -> Self {
        Stats {
            sentences_parsed: 0,
            checksum_errors: 0,
            parse_errors: 0,
            buffer_overflows: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Stats::new();
    }
}
