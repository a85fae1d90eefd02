//! ZDA — Time and date.

use heapless::Vec;

use crate::error::Error;
use crate::record::{Date, Talker, Time};
use crate::sentences::field;
use crate::tokenizer::{parse_int, parse_time, parse_uint};

const MAX_FIELDS: usize = 6;

/// `$--ZDA,time,day,month,year,lzone_hh,lzone_mm*hh`
///
/// Unlike every other sentence this crate decodes, a malformed or missing
/// time or date here is a hard decode failure rather than a field left at
/// its zero default: ZDA exists solely to carry absolute time, so a decoder
/// that silently returned a zeroed `Date`/`Time` would make a consumer trust
/// a timestamp that was never actually transmitted.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq)]
pub struct ZdaData {
    pub time: Time,
    pub date: Date,
    pub local_zone_hours: i8,
    pub local_zone_minutes: i8,
}

pub fn decode(_talker: Talker, data: &[u8]) -> Result<ZdaData, Error> {
    let fields: Vec<&[u8], MAX_FIELDS> = crate::tokenizer::tokenize(data);
    if fields.len() < 6 {
        return Err(Error::TooFewFields);
    }

    let time = parse_time(field(&fields, 0)).ok_or(Error::InvalidTime)?;

    let day = parse_uint(field(&fields, 1)).ok_or(Error::InvalidDate)? as u8;
    let month = parse_uint(field(&fields, 2)).ok_or(Error::InvalidDate)? as u8;
    let year = parse_uint(field(&fields, 3)).ok_or(Error::InvalidDate)? as u16;
    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return Err(Error::InvalidDate);
    }

    let date = Date {
        day,
        month,
        year,
        year_yy: (year % 100) as u8,
        valid: true,
    };

    Ok(ZdaData {
        time,
        date,
        local_zone_hours: parse_int(field(&fields, 4)).unwrap_or(0) as i8,
        local_zone_minutes: parse_int(field(&fields, 5)).unwrap_or(0) as i8,
    })
}
