//! A streaming parser for NMEA 0183 sentences.
//!
//! The crate is built from three pieces, each usable on its own:
//!
//! - [`ring`]: a lock-free SPSC byte ring buffer, the boundary between a byte
//!   source (UART, file, socket) and the parser.
//! - [`framer`]: a state machine that resynchronizes on sentence boundaries,
//!   verifies checksums, and dispatches to [`sentences`](mod@sentences).
//! - [`tracker`] (feature `tracker`): accumulates GSV/GSA bursts into
//!   consolidated satellite snapshots.
//!
//! [`Parser`] wires the first two together behind `feed`/`work`. The
//! satellite tracker is constructed and driven separately, fed by the same
//! [`Record`]s `work` hands to its callback — see the tracker's own
//! documentation.
//!
//! ```
//! use tiny_nmea::{Parser, PushMode, DefaultParser};
//!
//! let mut parser: DefaultParser = Parser::new();
//! parser.feed(b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n", PushMode::Atomic).unwrap();
//! parser.work(
//!     |record, _stats| println!("{:?}", record),
//!     |talker, sentence_type, _stats| println!("failed to decode {talker:?} {sentence_type:?}"),
//! );
//! ```
//!
//! No dynamic allocation and no floating-point arithmetic are used while
//! parsing; bounded collections come from `heapless`/`arrayvec`, and the only
//! place floats appear is in explicit, opt-in lossy conversions for display.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub mod fixed;
pub mod framer;
pub mod record;
pub mod ring;
mod sentences;
pub mod stats;
#[cfg(feature = "tracker")]
pub mod tracker;
mod tokenizer;

pub use error::Error;
pub use fixed::Fixed;
pub use framer::{DefaultFramer, Framer, DEFAULT_MAX_SENTENCE_LEN};
pub use record::{
    Coord, Date, FaaMode, FixQuality, GsaFixType, NavStatus, Payload, Record, Satellite,
    SentenceType, Talker, Time,
};
pub use ring::{PushMode, Ring};
pub use sentences::{
    AisData, GbsData, GgaData, GllData, GnsData, GsaData, GstData, GsvData, RmcData, VtgData,
    ZdaData,
};
pub use stats::Stats;
#[cfg(feature = "tracker")]
pub use tracker::{ActiveSatellite, DefaultSatTracker, SatTracker};

/// Default ring-buffer capacity, in bytes. Comfortably larger than the
/// default max sentence length so a full sentence plus some slack always
/// fits between two `work` calls.
pub const DEFAULT_RING_CAPACITY: usize = 256;

/// A [`Parser`] configured with every default: standard sentence length,
/// default ring capacity.
pub type DefaultParser = Parser<DEFAULT_MAX_SENTENCE_LEN, DEFAULT_RING_CAPACITY>;

/// Owns the ring buffer and the framer, and exposes the two operations an
/// embedder needs: [`Parser::feed`] from the producer side, [`Parser::work`]
/// from the consumer side.
///
/// `MAX_SENTENCE_LEN` and `RING_N` are const generics so the buffers live
/// inline in the struct with no heap allocation; see the crate-level
/// `DefaultParser` alias for the standard-mandated configuration.
pub struct Parser<
    const MAX_SENTENCE_LEN: usize = DEFAULT_MAX_SENTENCE_LEN,
    const RING_N: usize = DEFAULT_RING_CAPACITY,
> {
    ring: Ring<RING_N>,
    framer: Framer<MAX_SENTENCE_LEN>,
}

impl<const MAX_SENTENCE_LEN: usize, const RING_N: usize> Default for Parser<MAX_SENTENCE_LEN, RING_N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const MAX_SENTENCE_LEN: usize, const RING_N: usize> Parser<MAX_SENTENCE_LEN, RING_N> {
    pub const fn new() -> Self {
        Parser {
            ring: Ring::new(),
            framer: Framer::new(),
        }
    }

    /// Queues `data` for parsing. Returns the number of bytes actually
    /// accepted; returns [`Error::BufferFull`] (after still queuing whatever
    /// fit) if the ring couldn't accept all of `data` under `mode`.
    ///
    /// Producer-side only — see [`Ring`]'s SPSC contract.
    pub fn feed(&mut self, data: &[u8], mode: PushMode) -> Result<usize, Error> {
        let written = self.ring.push(data, mode);
        if written < data.len() {
            return Err(Error::BufferFull);
        }
        Ok(written)
    }

    /// Queues `data`, discarding the oldest queued bytes if necessary to make
    /// room. Never fails, but — like [`Ring::push_wrapping`] — breaks the
    /// ring's SPSC contract and must not be called concurrently with `work`.
    pub fn feed_wrapping(&mut self, data: &[u8]) {
        self.ring.push_wrapping(data);
    }

    /// Drains every complete sentence currently queued, invoking `on_sentence`
    /// for each decoded [`Record`] and `on_error` for each sentence whose
    /// header was valid but whose body failed to decode. Never blocks.
    ///
    /// Consumer-side only.
    pub fn work(
        &mut self,
        on_sentence: impl FnMut(&Record, Stats),
        on_error: impl FnMut(Talker, SentenceType, Stats),
    ) {
        self.framer.work(&mut self.ring, on_sentence, on_error);
    }

    pub fn stats(&self) -> Stats {
        self.framer.stats()
    }

    pub fn reset_stats(&mut self) {
        self.framer.reset_stats();
    }
}
