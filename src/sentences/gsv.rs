//! GSV — Satellites in view.

use heapless::Vec;

use crate::error::Error;
use crate::record::{Satellite, Talker};
use crate::sentences::field;
use crate::tokenizer::parse_uint;

const MAX_FIELDS: usize = 20;
/// Per-sentence satellite-block cap. Wire reports beyond this cap (a
/// receiver packing more than 4 blocks into one GSV sentence) are silently
/// truncated rather than rejected.
const MAX_SATS_PER_SENTENCE: usize = 4;

/// `$--GSV,total,num,in_view,(prn,elev,azim,snr)...,signal_id*hh`
///
/// Absent elevation/azimuth/snr fields decode to the sentinel defaults on
/// [`Satellite`] rather than `Option`, matching how the original receiver
/// leaves its in-place fields untouched when the corresponding wire field is
/// empty.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq)]
pub struct GsvData {
    pub total_sentences: u8,
    pub sentence_num: u8,
    pub sats_in_view: u16,
    pub satellites: Vec<Satellite, MAX_SATS_PER_SENTENCE>,
    pub signal_id: Option<u8>,
}

pub fn decode(_talker: Talker, data: &[u8]) -> Result<GsvData, Error> {
    let fields: Vec<&[u8], MAX_FIELDS> = crate::tokenizer::tokenize(data);
    if fields.len() < 3 {
        return Err(Error::TooFewFields);
    }

    let mut satellites = Vec::new();
    for i in 0..MAX_SATS_PER_SENTENCE {
        let base = 3 + i * 4;
        let Some(prn) = parse_uint(field(&fields, base)) else {
            break;
        };
        let sat = Satellite {
            prn: prn as u8,
            elevation: parse_uint(field(&fields, base + 1))
                .map(|v| v as i16)
                .unwrap_or(Satellite::ELEVATION_ABSENT),
            azimuth: parse_uint(field(&fields, base + 2))
                .map(|v| v as i16)
                .unwrap_or(Satellite::AZIMUTH_ABSENT),
            snr: parse_uint(field(&fields, base + 3))
                .map(|v| v as i16)
                .unwrap_or(Satellite::SNR_ABSENT),
        };
        let _ = satellites.push(sat);
    }

    // The signal-ID field (NMEA 4.10+) sits right after the *actually
    // present* satellite blocks, not at a fixed wire offset.
    let signal_id_idx = 3 + satellites.len() * 4;

    Ok(GsvData {
        total_sentences: parse_uint(field(&fields, 0)).unwrap_or(0) as u8,
        sentence_num: parse_uint(field(&fields, 1)).unwrap_or(0) as u8,
        sats_in_view: parse_uint(field(&fields, 2)).unwrap_or(0) as u16,
        satellites,
        signal_id: parse_uint(field(&fields, signal_id_idx)).map(|v| v as u8),
    })
}
