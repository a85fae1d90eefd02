//! Satellite tracker: accumulates GSV and GSA bursts into consolidated
//! snapshots delivered via caller-supplied callbacks.
//!
//! Unlike the framer, a [`SatTracker`] is not driven automatically — the
//! facade calls [`SatTracker::update_gsv`]/[`SatTracker::update_gsa`] (and the
//! time-advance hooks) explicitly for every decoded [`Record`] it cares to
//! track.

use heapless::Vec;
use log::warn;

use crate::record::{Constellation, Date, Satellite, Time};
use crate::sentences::{GsaData, GsvData};

/// Default cap on tracked GSV satellites across an in-progress view cycle.
pub const DEFAULT_MAX_TRACKED_GSV_SATS: usize = 64;
/// Default cap on tracked GSA satellites across an in-progress burst.
pub const DEFAULT_MAX_TRACKED_GSA_SATS: usize = 128;
/// Default GSA burst-completion threshold, in milliseconds of embedded time.
pub const DEFAULT_GSA_BURST_THRESHOLD_MS: u32 = 1000;

/// One bit per PRN (0-255) per constellation, enough to cover
/// [`u8::MAX`]-wide PRN numbering without a configurable max-PRN parameter.
const PRN_BITMAP_BYTES: usize = 32;
const CONSTELLATION_COUNT: usize = 5;

/// A PRN tagged with the constellation it was last seen on, as accumulated
/// in a GSA burst.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSatellite {
    pub prn: u8,
    pub constellation: Constellation,
}

fn set_bit(bitmask: &mut [u8; PRN_BITMAP_BYTES], prn: u8) {
    bitmask[prn as usize / 8] |= 1 << (prn % 8);
}

fn check_bit(bitmask: &[u8; PRN_BITMAP_BYTES], prn: u8) -> bool {
    bitmask[prn as usize / 8] & (1 << (prn % 8)) != 0
}

const DAY_IN_MS: i64 = 86_400_000;
const MAX_ROLLOVER_HRS: i64 = 16;

fn time_to_ms(t: &Time) -> i64 {
    t.hours as i64 * 3_600_000
        + t.minutes as i64 * 60_000
        + t.seconds as i64 * 1_000
        + t.microseconds as i64 / 1_000
}

/// Milliseconds elapsed between `(old_time, old_date)` and `(new_time,
/// new_date)`, handling a single midnight rollover heuristically when dates
/// aren't both known. Returns 0 if either time is marked invalid.
fn time_delta_ms(old_time: &Time, old_date: &Date, new_time: &Time, new_date: Option<&Date>) -> i64 {
    if !old_time.valid || !new_time.valid {
        return 0;
    }

    let old_ms = time_to_ms(old_time);
    let new_ms = time_to_ms(new_time);

    if old_date.valid {
        if let Some(new_date) = new_date {
            if new_date.valid {
                return if new_date.day == old_date.day {
                    new_ms - old_ms
                } else {
                    new_ms + DAY_IN_MS - old_ms
                };
            }
        }
    }

    if new_ms < old_ms {
        let rollover = new_ms + DAY_IN_MS - old_ms;
        if rollover < MAX_ROLLOVER_HRS * 3_600_000 {
            return rollover;
        }
        return new_ms - old_ms;
    }

    new_ms - old_ms
}

/// Accumulates GSV view cycles and GSA active-satellite bursts, firing
/// callbacks on completion.
///
/// `MAX_GSV`/`MAX_GSA` bound the accumulation buffers; satellites beyond the
/// cap within a single cycle/burst are silently dropped, matching the
/// original receiver.
pub struct SatTracker<
    const MAX_GSV: usize = DEFAULT_MAX_TRACKED_GSV_SATS,
    const MAX_GSA: usize = DEFAULT_MAX_TRACKED_GSA_SATS,
> {
    sats_active_bitmask: [[u8; PRN_BITMAP_BYTES]; CONSTELLATION_COUNT],
    sats_active_info: Vec<ActiveSatellite, MAX_GSA>,
    sats_active_update_time: Time,
    sats_active_update_date: Date,

    sats_in_view_info: Vec<Satellite, MAX_GSV>,
    sats_in_view_total_sentences: u8,
    sats_in_view_last_sentence: u8,

    gsa_burst_threshold_ms: u32,

    last_seen_time: Time,
    last_seen_date: Date,
}

/// A [`SatTracker`] configured with the standard-mandated accumulation caps.
pub type DefaultSatTracker = SatTracker<DEFAULT_MAX_TRACKED_GSV_SATS, DEFAULT_MAX_TRACKED_GSA_SATS>;

impl<const MAX_GSV: usize, const MAX_GSA: usize> Default for SatTracker<MAX_GSV, MAX_GSA> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const MAX_GSV: usize, const MAX_GSA: usize> SatTracker<MAX_GSV, MAX_GSA> {
    pub fn new() -> Self {
        SatTracker {
            sats_active_bitmask: [[0; PRN_BITMAP_BYTES]; CONSTELLATION_COUNT],
            sats_active_info: Vec::new(),
            sats_active_update_time: Time::default(),
            sats_active_update_date: Date::default(),
            sats_in_view_info: Vec::new(),
            sats_in_view_total_sentences: 0,
            sats_in_view_last_sentence: 0,
            gsa_burst_threshold_ms: DEFAULT_GSA_BURST_THRESHOLD_MS,
            last_seen_time: Time::default(),
            last_seen_date: Date::default(),
        }
    }

    /// Sets the GSA burst-completion threshold, in milliseconds of embedded
    /// (not wall-clock) time.
    pub fn set_burst_threshold_ms(&mut self, ms: u32) {
        self.gsa_burst_threshold_ms = ms;
    }

    fn reset_active_sats(&mut self) {
        for constellation in &mut self.sats_active_bitmask {
            *constellation = [0; PRN_BITMAP_BYTES];
        }
        self.sats_active_info.clear();
    }

    fn check_gsa_burst_completion(
        &mut self,
        new_time: &Time,
        new_date: Option<&Date>,
        on_active: &mut impl FnMut(&[ActiveSatellite], Date, Time),
    ) {
        let diff = time_delta_ms(
            &self.sats_active_update_time,
            &self.sats_active_update_date,
            new_time,
            new_date,
        );
        if diff > self.gsa_burst_threshold_ms as i64 {
            if !self.sats_active_info.is_empty() {
                on_active(
                    &self.sats_active_info,
                    self.sats_active_update_date,
                    self.sats_active_update_time,
                );
            }
            self.reset_active_sats();
        }
    }

    /// Advances the tracker's notion of current time and date, as observed on
    /// any time-and-date-bearing sentence (RMC, GNS, GBS, GST, ZDA). May fire
    /// the active-satellites callback if the GSA burst has timed out.
    pub fn update_datetime(
        &mut self,
        date: Date,
        time: Time,
        mut on_active: impl FnMut(&[ActiveSatellite], Date, Time),
    ) {
        self.check_gsa_burst_completion(&time, Some(&date), &mut on_active);
        self.last_seen_date = date;
        self.last_seen_time = time;
    }

    /// Advances the tracker's notion of current time only, as observed on a
    /// time-only sentence (GGA, GLL). The last known date is preserved.
    pub fn update_time(&mut self, time: Time, mut on_active: impl FnMut(&[ActiveSatellite], Date, Time)) {
        self.check_gsa_burst_completion(&time, None, &mut on_active);
        self.last_seen_time = time;
    }

    /// Folds one GSV sentence into the in-progress view cycle. Fires
    /// `on_view` with the accumulated satellites (without clearing them) once
    /// the final sentence of the cycle is seen.
    pub fn update_gsv(&mut self, gsv: &GsvData, on_view: impl FnOnce(&[Satellite], Date, Time)) {
        if gsv.sentence_num == 1 || gsv.total_sentences != self.sats_in_view_last_sentence {
            self.sats_in_view_info.clear();
            self.sats_in_view_last_sentence = 0;
            self.sats_in_view_total_sentences = gsv.total_sentences;
        }

        // A gap in the sentence sequence leaves the accumulated view
        // untrustworthy; drop it silently and wait for the next msg 1.
        if gsv.sentence_num != self.sats_in_view_last_sentence + 1 {
            self.sats_in_view_info.clear();
            self.sats_in_view_last_sentence = 0;
            return;
        }
        self.sats_in_view_last_sentence = gsv.sentence_num;

        for sat in &gsv.satellites {
            if self.sats_in_view_info.len() < MAX_GSV {
                let _ = self.sats_in_view_info.push(*sat);
            } else {
                warn!("nmea tracker: dropping GSV satellite, MAX_GSV tracked-satellite cap reached");
            }
        }

        if gsv.sentence_num == gsv.total_sentences {
            on_view(&self.sats_in_view_info, self.last_seen_date, self.last_seen_time);
        }
    }

    /// Folds one GSA sentence into the in-progress active-satellites burst.
    /// May fire `on_active` twice over the tracker's lifetime per burst: once
    /// if this GSA's PRNs conflict with the bitmask (the *prior* burst is
    /// delivered before the new one starts accumulating), and independently
    /// whenever [`Self::update_datetime`]/[`Self::update_time`] detects the
    /// burst has timed out.
    pub fn update_gsa(&mut self, gsa: &GsaData, mut on_active: impl FnMut(&[ActiveSatellite], Date, Time)) {
        let last_seen_time = self.last_seen_time;
        let last_seen_date = self.last_seen_date;
        self.check_gsa_burst_completion(&last_seen_time, Some(&last_seen_date), &mut on_active);

        let constellation = gsa.constellation;
        let bitmask = &self.sats_active_bitmask[constellation.index()];
        let conflict = gsa.prns.iter().any(|&prn| prn != 0 && check_bit(bitmask, prn));

        if conflict {
            if !self.sats_active_info.is_empty() {
                on_active(
                    &self.sats_active_info,
                    self.sats_active_update_date,
                    self.sats_active_update_time,
                );
            }
            self.reset_active_sats();
        }

        for &prn in &gsa.prns {
            if prn == 0 {
                continue;
            }
            set_bit(&mut self.sats_active_bitmask[constellation.index()], prn);
            if self.sats_active_info.len() < MAX_GSA {
                let _ = self.sats_active_info.push(ActiveSatellite { prn, constellation });
            } else {
                warn!("nmea tracker: dropping GSA satellite, MAX_GSA tracked-satellite cap reached");
            }
        }

        self.sats_active_update_time = last_seen_time;
        self.sats_active_update_date = last_seen_date;
    }
}
