//! GBS — GPS satellite fault detection (RAIM).

use heapless::Vec;

use crate::error::Error;
use crate::fixed::Fixed;
use crate::record::{Talker, Time};
use crate::sentences::field;
use crate::tokenizer::{parse_fixedpoint, parse_time, parse_uint};

const MAX_FIELDS: usize = 8;

/// `$--GBS,time,lat_err,lon_err,alt_err,failed_sat,prob,bias,bias_sd*hh`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq)]
pub struct GbsData {
    pub time: Time,
    pub lat_error_m: Fixed,
    pub lon_error_m: Fixed,
    pub alt_error_m: Fixed,
    pub failed_satellite_prn: Option<u8>,
    pub missed_detection_probability: Fixed,
    pub bias_estimate_m: Fixed,
    pub bias_std_dev_m: Fixed,
}

pub fn decode(_talker: Talker, data: &[u8]) -> Result<GbsData, Error> {
    let fields: Vec<&[u8], MAX_FIELDS> = crate::tokenizer::tokenize(data);
    if fields.len() < 8 {
        return Err(Error::TooFewFields);
    }

    Ok(GbsData {
        time: parse_time(field(&fields, 0)).unwrap_or_default(),
        lat_error_m: parse_fixedpoint(field(&fields, 1)).unwrap_or(Fixed::NONE),
        lon_error_m: parse_fixedpoint(field(&fields, 2)).unwrap_or(Fixed::NONE),
        alt_error_m: parse_fixedpoint(field(&fields, 3)).unwrap_or(Fixed::NONE),
        failed_satellite_prn: parse_uint(field(&fields, 4)).map(|v| v as u8),
        missed_detection_probability: parse_fixedpoint(field(&fields, 5)).unwrap_or(Fixed::NONE),
        bias_estimate_m: parse_fixedpoint(field(&fields, 6)).unwrap_or(Fixed::NONE),
        bias_std_dev_m: parse_fixedpoint(field(&fields, 7)).unwrap_or(Fixed::NONE),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_error_estimates() {
        let data = b",1.4,1.0,3.2,,0.0,,";
        let gbs = decode(Talker::Gps, data).unwrap();
        assert_eq!(gbs.lat_error_m, Fixed::new(14, 10));
        assert_eq!(gbs.alt_error_m, Fixed::new(32, 10));
        assert_eq!(gbs.failed_satellite_prn, None);
    }

    #[test]
    fn too_few_fields_is_an_error() {
        let data = b",1.4,1.0,3.2,,0.0,";
        assert_eq!(decode(Talker::Gps, data), Err(Error::TooFewFields));
    }
}
