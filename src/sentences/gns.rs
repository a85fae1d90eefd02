//! GNS — Fix data (multi-constellation mode indicator).

use arrayvec::ArrayString;
use heapless::Vec;

use crate::error::Error;
use crate::fixed::Fixed;
use crate::record::{Coord, NavStatus, Talker, Time};
use crate::sentences::field;
use crate::tokenizer::{parse_fixedpoint, parse_latitude, parse_longitude, parse_time, parse_uint};

const MAX_FIELDS: usize = 13;
const MAX_MODE_LEN: usize = 8;

/// `$--GNS,time,lat,N/S,lon,E/W,mode,sats,hdop,alt,sep,age,station,navstatus*hh`
///
/// `mode` is a byte-per-constellation mode-character string, clamped to the
/// constellation count this crate tracks.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq)]
pub struct GnsData {
    pub time: Time,
    pub latitude: Coord,
    pub longitude: Coord,
    pub mode: ArrayString<MAX_MODE_LEN>,
    pub satellites_used: u8,
    pub hdop: Fixed,
    pub altitude_m: Fixed,
    pub geoid_sep_m: Fixed,
    pub dgps_age: Fixed,
    pub dgps_station_id: u16,
    pub nav_status: Option<NavStatus>,
}

pub fn decode(_talker: Talker, data: &[u8]) -> Result<GnsData, Error> {
    let fields: Vec<&[u8], MAX_FIELDS> = crate::tokenizer::tokenize(data);
    if fields.len() < 12 {
        return Err(Error::TooFewFields);
    }

    let mode_bytes = field(&fields, 5);
    let mode_len = mode_bytes.len().min(MAX_MODE_LEN);
    let mut mode = ArrayString::<MAX_MODE_LEN>::new();
    for &b in &mode_bytes[..mode_len] {
        let _ = mode.try_push(b as char);
    }

    Ok(GnsData {
        time: parse_time(field(&fields, 0)).unwrap_or_default(),
        latitude: parse_latitude(field(&fields, 1), field(&fields, 2)).unwrap_or_default(),
        longitude: parse_longitude(field(&fields, 3), field(&fields, 4)).unwrap_or_default(),
        mode,
        satellites_used: parse_uint(field(&fields, 6)).unwrap_or(0) as u8,
        hdop: parse_fixedpoint(field(&fields, 7)).unwrap_or(Fixed::NONE),
        altitude_m: parse_fixedpoint(field(&fields, 8)).unwrap_or(Fixed::NONE),
        geoid_sep_m: parse_fixedpoint(field(&fields, 9)).unwrap_or(Fixed::NONE),
        dgps_age: parse_fixedpoint(field(&fields, 10)).unwrap_or(Fixed::NONE),
        dgps_station_id: parse_uint(field(&fields, 11)).unwrap_or(0) as u16,
        nav_status: field(&fields, 12).first().copied().and_then(NavStatus::from_char),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_mode_string_clamped_to_cap() {
        let data = b"123519,4807.038,N,01131.000,E,ANNNNNNNNNN,08,0.9,545.4,47.0,,,";
        let gns = decode(Talker::Gps, data).unwrap();
        assert_eq!(gns.mode.len(), MAX_MODE_LEN);
        assert_eq!(gns.satellites_used, 8);
    }

    #[test]
    fn too_few_fields_is_an_error() {
        let data = b"123519,4807.038,N,01131.000,E,ANNNNNNNNNN,08,0.9,545.4,47.0,";
        assert_eq!(decode(Talker::Gps, data), Err(Error::TooFewFields));
    }
}
