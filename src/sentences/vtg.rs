//! VTG — Track made good and ground speed.

use heapless::Vec;

use crate::error::Error;
use crate::fixed::Fixed;
use crate::record::{FaaMode, Talker};
use crate::sentences::field;
use crate::tokenizer::parse_fixedpoint;

const MAX_FIELDS: usize = 9;

/// `$--VTG,course_t,T,course_m,M,speed_n,N,speed_k,K,mode*hh`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq)]
pub struct VtgData {
    pub course_true: Fixed,
    pub course_magnetic: Fixed,
    pub speed_knots: Fixed,
    pub speed_kph: Fixed,
    pub faa_mode: Option<FaaMode>,
}

pub fn decode(_talker: Talker, data: &[u8]) -> Result<VtgData, Error> {
    let fields: Vec<&[u8], MAX_FIELDS> = crate::tokenizer::tokenize(data);
    if fields.len() < 8 {
        return Err(Error::TooFewFields);
    }

    Ok(VtgData {
        course_true: parse_fixedpoint(field(&fields, 0)).unwrap_or(Fixed::NONE),
        course_magnetic: parse_fixedpoint(field(&fields, 2)).unwrap_or(Fixed::NONE),
        speed_knots: parse_fixedpoint(field(&fields, 4)).unwrap_or(Fixed::NONE),
        speed_kph: parse_fixedpoint(field(&fields, 6)).unwrap_or(Fixed::NONE),
        faa_mode: field(&fields, 8).first().copied().and_then(FaaMode::from_char),
    })
}
