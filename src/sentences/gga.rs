//! GGA — Global Positioning System Fix Data.

use heapless::Vec;

use crate::error::Error;
use crate::fixed::Fixed;
use crate::record::{Coord, Talker, Time};
use crate::sentences::field;
use crate::tokenizer::{parse_fixedpoint, parse_latitude, parse_longitude, parse_time, parse_uint};

const MAX_FIELDS: usize = 14;

/// `$--GGA,time,lat,N/S,lon,E/W,quality,sats,hdop,alt,M,sep,M,age,station*hh`
///
/// `fix_quality` is stored as the raw wire value (0-8 per the documented
/// table) with no range validation — the original receiver casts the parsed
/// integer as-is, and so do we; use [`crate::record::FixQuality::from_code`]
/// to classify it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq)]
pub struct GgaData {
    pub time: Time,
    pub latitude: Coord,
    pub longitude: Coord,
    pub fix_quality: u8,
    pub satellites_used: u8,
    pub hdop: Fixed,
    pub altitude_m: Fixed,
    pub geoid_sep_m: Fixed,
    pub dgps_age: Fixed,
    pub dgps_station_id: u16,
}

pub fn decode(_talker: Talker, data: &[u8]) -> Result<GgaData, Error> {
    let fields: Vec<&[u8], MAX_FIELDS> = crate::tokenizer::tokenize(data);
    if fields.len() < 14 {
        return Err(Error::TooFewFields);
    }

    Ok(GgaData {
        time: parse_time(field(&fields, 0)).unwrap_or_default(),
        latitude: parse_latitude(field(&fields, 1), field(&fields, 2)).unwrap_or_default(),
        longitude: parse_longitude(field(&fields, 3), field(&fields, 4)).unwrap_or_default(),
        fix_quality: parse_uint(field(&fields, 5)).unwrap_or(0) as u8,
        satellites_used: parse_uint(field(&fields, 6)).unwrap_or(0) as u8,
        hdop: parse_fixedpoint(field(&fields, 7)).unwrap_or(Fixed::NONE),
        altitude_m: parse_fixedpoint(field(&fields, 8)).unwrap_or(Fixed::NONE),
        geoid_sep_m: parse_fixedpoint(field(&fields, 10)).unwrap_or(Fixed::NONE),
        dgps_age: parse_fixedpoint(field(&fields, 12)).unwrap_or(Fixed::NONE),
        dgps_station_id: parse_uint(field(&fields, 13)).unwrap_or(0) as u16,
    })
}
