//! Framing state machine: finds sentence boundaries in a byte ring,
//! validates the checksum, and dispatches to the matching decoder.

use log::{trace, warn};
use nom::Parser;

use crate::record::{Payload, Record, SentenceType, Talker};
use crate::ring::Ring;
use crate::stats::Stats;

/// Maximum standard NMEA 0183 sentence length, including delimiters.
pub const DEFAULT_MAX_SENTENCE_LEN: usize = 82;

/// A [`Framer`] configured with the standard-mandated sentence length.
pub type DefaultFramer = Framer<DEFAULT_MAX_SENTENCE_LEN>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    FindStart,
    FindTalkerAndType,
    FindDataEnd,
    FindLineEnd,
    Complete,
}

/// Drains a [`Ring`] into sentence boundaries, one complete sentence at a
/// time, dispatching decoded records and decode failures to caller-supplied
/// callbacks.
///
/// `MAX_SENTENCE_LEN` bounds the linear scratch buffer this framer copies
/// ring-buffer bytes into before scanning; it must be at least large enough
/// to hold `"$TTSSS,*hh\r\n"` (11 bytes) plus the longest sentence body this
/// embedder expects to see.
pub struct Framer<const MAX_SENTENCE_LEN: usize = DEFAULT_MAX_SENTENCE_LEN> {
    scratch: [u8; MAX_SENTENCE_LEN],
    scratch_len: usize,
    parse_pos: usize,
    state: State,
    waiting_for_data: bool,
    has_checksum: bool,
    current_talker: Talker,
    current_type: SentenceType,
    data_end: usize,
    line_end: Option<usize>,
    /// Century last observed in a valid ZDA, used to back-fill RMC's
    /// two-digit year. Never regresses to zero once learned — see
    /// `post_process`.
    zda_century: u8,
    stats: Stats,
}

impl<const MAX_SENTENCE_LEN: usize> Default for Framer<MAX_SENTENCE_LEN> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const MAX_SENTENCE_LEN: usize> Framer<MAX_SENTENCE_LEN> {
    pub const fn new() -> Self {
        Framer {
            scratch: [0; MAX_SENTENCE_LEN],
            scratch_len: 0,
            parse_pos: 0,
            state: State::FindStart,
            waiting_for_data: false,
            has_checksum: false,
            current_talker: Talker::None,
            current_type: SentenceType::None,
            data_end: 0,
            line_end: None,
            zda_century: 0,
            stats: Stats::new(),
        }
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Drains `ring` into the scratch buffer and advances the state machine
    /// until the ring is exhausted and no further progress is possible.
    /// `on_sentence` fires once per successfully decoded sentence;
    /// `on_error` fires once per sentence whose header was valid but whose
    /// body failed to decode.
    pub fn work<const RING_N: usize>(
        &mut self,
        ring: &mut Ring<RING_N>,
        mut on_sentence: impl FnMut(&Record, Stats),
        mut on_error: impl FnMut(Talker, SentenceType, Stats),
    ) {
        loop {
            if ring.is_empty() && self.scratch_len <= self.parse_pos {
                break;
            }

            let bytes_avail = ring.len();
            if self.waiting_for_data && bytes_avail == 0 {
                break;
            }

            let space = MAX_SENTENCE_LEN - self.scratch_len;
            let to_pop = space.min(bytes_avail);
            if to_pop > 0 {
                let end = self.scratch_len + to_pop;
                let n = ring.pop(&mut self.scratch[self.scratch_len..end]);
                self.scratch_len += n;
            } else if space == 0 && self.waiting_for_data {
                self.stats.buffer_overflows += 1;
                warn!("nmea framer: working buffer full while waiting for more data, resyncing");
                self.reset_to_start();
            }

            self.waiting_for_data = false;

            if self.scratch_len == self.parse_pos {
                if ring.is_empty() {
                    break;
                }
                continue;
            }

            match self.state {
                State::FindStart => self.step_find_start(),
                State::FindTalkerAndType => self.step_find_talker_and_type(),
                State::FindDataEnd => self.step_find_data_end(),
                State::FindLineEnd => self.step_find_line_end(),
                State::Complete => self.step_complete(&mut on_sentence, &mut on_error),
            }
        }
    }

    fn discard(&mut self, amt: usize) {
        if amt >= self.scratch_len {
            self.scratch_len = 0;
            return;
        }
        self.scratch.copy_within(amt..self.scratch_len, 0);
        self.scratch_len -= amt;
    }

    fn reset_to_start(&mut self) {
        self.scratch_len = 0;
        self.parse_pos = 0;
        self.state = State::FindStart;
        self.line_end = None;
    }

    /// Reverts to `FindStart` without discarding the scratch buffer's
    /// contents — used when the unprocessed bytes still need a fresh scan
    /// from the top (e.g. after skipping one false-start byte).
    fn reset_keep_bytes(&mut self) {
        self.parse_pos = 0;
        self.state = State::FindStart;
        self.line_end = None;
    }

    fn step_find_start(&mut self) {
        self.has_checksum = false;
        let start = self.scratch[..self.scratch_len]
            .iter()
            .position(|&b| b == b'$' || b == b'!');

        match start {
            Some(offset) => {
                self.discard(offset);
                self.parse_pos = 1; // skip the start char
                self.state = State::FindTalkerAndType;
            }
            None => {
                // No start char anywhere in the scratch: none of it can ever
                // become a sentence, so it's discarded outright. Not an error.
                self.reset_to_start();
            }
        }
    }

    fn step_find_talker_and_type(&mut self) {
        if self.scratch_len - self.parse_pos < 6 {
            self.waiting_for_data = true;
            return;
        }

        let talker = Talker::from_slice(&self.scratch[1..3]);
        let sentence_type = SentenceType::from_slice(&self.scratch[3..6]);

        if talker == Talker::None || sentence_type == SentenceType::None || self.scratch[6] != b',' {
            self.stats.parse_errors += 1;
            trace!("nmea framer: invalid header, resyncing one byte forward");
            self.discard(1);
            self.reset_keep_bytes();
        } else {
            self.current_talker = talker;
            self.current_type = sentence_type;
            self.parse_pos += 6;
            self.state = State::FindDataEnd;
        }
    }

    fn step_find_data_end(&mut self) {
        let base = self.parse_pos;
        let remaining = &self.scratch[base..self.scratch_len];
        let asterisk = remaining.iter().position(|&b| b == b'*').map(|i| base + i);
        let line_end = earliest_terminator(remaining, base);

        let (has_checksum, data_end) = match (asterisk, line_end) {
            (Some(a), Some(l)) => (a < l, a.min(l)),
            (None, Some(l)) => (false, l),
            (Some(a), None) => (true, a),
            (None, None) => {
                self.await_more_or_fail();
                return;
            }
        };

        self.parse_pos = data_end;
        self.has_checksum = has_checksum;
        self.data_end = data_end;
        self.line_end = line_end;
        self.state = if has_checksum {
            State::FindLineEnd
        } else {
            State::Complete
        };
    }

    fn step_find_line_end(&mut self) {
        if self.line_end.is_none() {
            self.line_end = earliest_terminator(&self.scratch[self.parse_pos..self.scratch_len], self.parse_pos);
        }

        let Some(line_end) = self.line_end else {
            self.await_more_or_fail();
            return;
        };

        let hex_start = self.data_end + 1;
        if line_end <= hex_start || line_end - hex_start != 2 {
            self.stats.parse_errors += 1;
            trace!("nmea framer: checksum field has the wrong width");
            self.reset_to_start();
            return;
        }

        let Ok((_, received)) = parse_checksum_hex(&self.scratch[hex_start..hex_start + 2]) else {
            self.stats.parse_errors += 1;
            trace!("nmea framer: checksum field is not valid hex");
            self.reset_to_start();
            return;
        };

        let computed = self.scratch[1..self.data_end]
            .iter()
            .fold(0u8, |acc, &b| acc ^ b);

        if computed == received {
            self.state = State::Complete;
        } else {
            self.stats.checksum_errors += 1;
            warn!("nmea framer: checksum mismatch ({computed:#04x} != {received:#04x})");
            self.reset_to_start();
        }
    }

    /// Shared by `FindDataEnd`/`FindLineEnd`: either wait for more bytes, or,
    /// if the scratch buffer has grown past the configured cap without
    /// finding what it's looking for, give up on this sentence.
    fn await_more_or_fail(&mut self) {
        if self.parse_pos > MAX_SENTENCE_LEN {
            self.stats.parse_errors += 1;
            trace!("nmea framer: no terminator within the configured sentence length");
            self.discard(self.parse_pos);
            self.reset_keep_bytes();
        } else {
            self.parse_pos = self.scratch_len;
            self.waiting_for_data = true;
        }
    }

    fn step_complete(
        &mut self,
        on_sentence: &mut impl FnMut(&Record, Stats),
        on_error: &mut impl FnMut(Talker, SentenceType, Stats),
    ) {
        let data = &self.scratch[7..self.data_end];

        match crate::sentences::decode(self.current_type, self.current_talker, data) {
            Ok(payload) => {
                self.stats.sentences_parsed += 1;
                let mut record = Record {
                    talker: self.current_talker,
                    sentence_type: self.current_type,
                    payload,
                };
                self.post_process(&mut record);
                trace!("nmea framer: decoded {:?}", self.current_type);
                on_sentence(&record, self.stats);
            }
            Err(_) => {
                self.stats.parse_errors += 1;
                warn!("nmea framer: decode failed for {:?}", self.current_type);
                on_error(self.current_talker, self.current_type, self.stats);
            }
        }

        let mut sentence_end = self.line_end.unwrap_or(self.data_end);
        while sentence_end < self.scratch_len && matches!(self.scratch[sentence_end], b'\r' | b'\n' | 0) {
            sentence_end += 1;
        }
        self.discard(sentence_end);
        self.reset_keep_bytes();
    }

    /// ZDA sets the century observed for subsequent RMC year back-fill; RMC
    /// reads it. The century only ever advances to a newly observed nonzero
    /// value — a ZDA with an implausible sub-100 year doesn't erase a
    /// century already learned from an earlier ZDA.
    fn post_process(&mut self, record: &mut Record) {
        match &mut record.payload {
            Payload::Zda(zda) if zda.date.valid => {
                let century = (zda.date.year / 100) as u8;
                if century > 0 {
                    self.zda_century = century;
                }
            }
            Payload::Rmc(rmc) if self.zda_century > 0 => {
                rmc.date.year = self.zda_century as u16 * 100 + rmc.date.year_yy as u16;
            }
            _ => {}
        }
    }
}

fn earliest_terminator(haystack: &[u8], base: usize) -> Option<usize> {
    let cr = haystack.iter().position(|&b| b == b'\r').map(|i| base + i);
    let lf = haystack.iter().position(|&b| b == b'\n').map(|i| base + i);
    match (cr, lf) {
        (Some(c), Some(l)) => Some(c.min(l)),
        (Some(c), None) => Some(c),
        (None, Some(l)) => Some(l),
        (None, None) => None,
    }
}

fn parse_checksum_hex(input: &[u8]) -> nom::IResult<&[u8], u8> {
    use nom::bytes::complete::take;
    use nom::combinator::map_res;

    map_res(take(2usize), |digits: &[u8]| {
        core::str::from_utf8(digits)
            .map_err(|_| ())
            .and_then(|s| u8::from_str_radix(s, 16).map_err(|_| ()))
    })
    .parse(input)
}
