//! GSA — GPS DOP and active satellites.

use heapless::Vec;

use crate::error::Error;
use crate::fixed::Fixed;
use crate::record::{Constellation, GsaFixType, Talker};
use crate::sentences::field;
use crate::tokenizer::{parse_fixedpoint, parse_uint};

const MAX_FIELDS: usize = 18;
const MAX_PRNS: usize = 12;

/// `$--GSA,mode1,mode2,prn...(12),pdop,hdop,vdop,system*hh`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq)]
pub struct GsaData {
    pub manual_mode: bool,
    pub fix_type: Option<GsaFixType>,
    pub prns: Vec<u8, MAX_PRNS>,
    pub pdop: Fixed,
    pub hdop: Fixed,
    pub vdop: Fixed,
    /// System-ID field (NMEA 4.11+) if present, else derived from the talker.
    pub constellation: Constellation,
}

pub fn decode(talker: Talker, data: &[u8]) -> Result<GsaData, Error> {
    let fields: Vec<&[u8], MAX_FIELDS> = crate::tokenizer::tokenize(data);
    if fields.len() < 17 {
        return Err(Error::TooFewFields);
    }

    let mut prns = Vec::new();
    for i in 0..MAX_PRNS {
        if let Some(prn) = parse_uint(field(&fields, 2 + i)) {
            let _ = prns.push(prn as u8);
        }
    }

    let constellation = match parse_uint(field(&fields, 17)) {
        Some(id) => Constellation::from_system_id(id),
        None => Constellation::from_talker(talker),
    };

    Ok(GsaData {
        manual_mode: field(&fields, 0) == b"M",
        fix_type: parse_uint(field(&fields, 1)).and_then(|v| GsaFixType::from_code(v as u8)),
        prns,
        pdop: parse_fixedpoint(field(&fields, 14)).unwrap_or(Fixed::NONE),
        hdop: parse_fixedpoint(field(&fields, 15)).unwrap_or(Fixed::NONE),
        vdop: parse_fixedpoint(field(&fields, 16)).unwrap_or(Fixed::NONE),
        constellation,
    })
}
