//! GST — GPS pseudorange noise statistics.

use heapless::Vec;

use crate::error::Error;
use crate::fixed::Fixed;
use crate::record::{Talker, Time};
use crate::sentences::field;
use crate::tokenizer::{parse_fixedpoint, parse_time};

const MAX_FIELDS: usize = 8;

/// `$--GST,time,rms,major_sd,minor_sd,orientation,lat_sd,lon_sd,alt_sd*hh`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq)]
pub struct GstData {
    pub time: Time,
    pub rms_pseudorange_residual: Fixed,
    pub ellipse_semi_major_sd_m: Fixed,
    pub ellipse_semi_minor_sd_m: Fixed,
    pub ellipse_orientation_deg: Fixed,
    pub lat_error_sd_m: Fixed,
    pub lon_error_sd_m: Fixed,
    pub alt_error_sd_m: Fixed,
}

pub fn decode(_talker: Talker, data: &[u8]) -> Result<GstData, Error> {
    let fields: Vec<&[u8], MAX_FIELDS> = crate::tokenizer::tokenize(data);
    if fields.len() < 8 {
        return Err(Error::TooFewFields);
    }

    Ok(GstData {
        time: parse_time(field(&fields, 0)).unwrap_or_default(),
        rms_pseudorange_residual: parse_fixedpoint(field(&fields, 1)).unwrap_or(Fixed::NONE),
        ellipse_semi_major_sd_m: parse_fixedpoint(field(&fields, 2)).unwrap_or(Fixed::NONE),
        ellipse_semi_minor_sd_m: parse_fixedpoint(field(&fields, 3)).unwrap_or(Fixed::NONE),
        ellipse_orientation_deg: parse_fixedpoint(field(&fields, 4)).unwrap_or(Fixed::NONE),
        lat_error_sd_m: parse_fixedpoint(field(&fields, 5)).unwrap_or(Fixed::NONE),
        lon_error_sd_m: parse_fixedpoint(field(&fields, 6)).unwrap_or(Fixed::NONE),
        alt_error_sd_m: parse_fixedpoint(field(&fields, 7)).unwrap_or(Fixed::NONE),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_noise_statistics() {
        let data = b"182141.000,15.5,15.3,7.2,21.8,0.9,0.5,0.8";
        let gst = decode(Talker::Gps, data).unwrap();
        assert_eq!(gst.rms_pseudorange_residual, Fixed::new(155, 10));
        assert_eq!(gst.alt_error_sd_m, Fixed::new(8, 10));
    }

    #[test]
    fn too_few_fields_is_an_error() {
        assert_eq!(decode(Talker::Gps, b",,,"), Err(Error::TooFewFields));
    }
}
