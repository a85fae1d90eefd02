//! GLL — Geographic position, latitude / longitude.

use heapless::Vec;

use crate::error::Error;
use crate::record::{Coord, FaaMode, Talker, Time};
use crate::sentences::field;
use crate::tokenizer::{parse_latitude, parse_longitude, parse_time};

const MAX_FIELDS: usize = 7;

/// `$--GLL,lat,N/S,lon,E/W,time,status,mode*hh`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq)]
pub struct GllData {
    pub latitude: Coord,
    pub longitude: Coord,
    pub time: Time,
    pub status_valid: bool,
    pub faa_mode: Option<FaaMode>,
}

pub fn decode(_talker: Talker, data: &[u8]) -> Result<GllData, Error> {
    let fields: Vec<&[u8], MAX_FIELDS> = crate::tokenizer::tokenize(data);
    if fields.len() < 6 {
        return Err(Error::TooFewFields);
    }

    Ok(GllData {
        latitude: parse_latitude(field(&fields, 0), field(&fields, 1)).unwrap_or_default(),
        longitude: parse_longitude(field(&fields, 2), field(&fields, 3)).unwrap_or_default(),
        time: parse_time(field(&fields, 4)).unwrap_or_default(),
        status_valid: field(&fields, 5) == b"A",
        faa_mode: field(&fields, 6).first().copied().and_then(FaaMode::from_char),
    })
}
