//! RMC — Recommended Minimum Navigation Information.

use heapless::Vec;

use crate::error::Error;
use crate::fixed::Fixed;
use crate::record::{Coord, Date, FaaMode, NavStatus, Talker, Time};
use crate::sentences::field;
use crate::tokenizer::{parse_date, parse_fixedpoint, parse_latitude, parse_longitude, parse_time};

const MAX_FIELDS: usize = 13;

/// `$--RMC,time,status,lat,N/S,lon,E/W,speed,course,date,var,E/W,mode,navstatus*hh`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq)]
pub struct RmcData {
    pub time: Time,
    /// `true` for status 'A' (valid); `false` for 'V' (invalid) or unparsed.
    pub status_valid: bool,
    pub latitude: Coord,
    pub longitude: Coord,
    pub speed_knots: Fixed,
    pub course_true: Fixed,
    pub date: Date,
    pub mag_variation: Fixed,
    pub mag_variation_dir: u8,
    pub faa_mode: Option<FaaMode>,
    pub nav_status: Option<NavStatus>,
}

pub fn decode(_talker: Talker, data: &[u8]) -> Result<RmcData, Error> {
    let fields: Vec<&[u8], MAX_FIELDS> = crate::tokenizer::tokenize(data);
    if fields.len() < 11 {
        return Err(Error::TooFewFields);
    }

    Ok(RmcData {
        time: parse_time(field(&fields, 0)).unwrap_or_default(),
        status_valid: field(&fields, 1) == b"A",
        latitude: parse_latitude(field(&fields, 2), field(&fields, 3)).unwrap_or_default(),
        longitude: parse_longitude(field(&fields, 4), field(&fields, 5)).unwrap_or_default(),
        speed_knots: parse_fixedpoint(field(&fields, 6)).unwrap_or(Fixed::NONE),
        course_true: parse_fixedpoint(field(&fields, 7)).unwrap_or(Fixed::NONE),
        date: parse_date(field(&fields, 8)).unwrap_or_default(),
        mag_variation: parse_fixedpoint(field(&fields, 9)).unwrap_or(Fixed::NONE),
        mag_variation_dir: field(&fields, 10).first().copied().unwrap_or(0),
        faa_mode: field(&fields, 11).first().copied().and_then(FaaMode::from_char),
        nav_status: field(&fields, 12).first().copied().and_then(NavStatus::from_char),
    })
}
