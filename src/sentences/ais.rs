//! VDM/VDO — AIS VHF data-link messages.
//!
//! This crate only frames AIS messages; it does not de-armor the 6-bit
//! payload into AIS message types. Callers that need decoded AIS content
//! reassemble `payload` across `fragment_count`/`fragment_number` and hand
//! it to an AIS-specific decoder.

use arrayvec::ArrayString;

use crate::error::Error;
use crate::record::Talker;
use crate::sentences::field;
use crate::tokenizer::parse_uint;

const MAX_FIELDS: usize = 6;
/// Longest payload this crate will retain; AIS payloads rarely exceed a few
/// hundred 6-bit characters even for multi-part messages.
const MAX_PAYLOAD_LEN: usize = 64;

/// `$--VDM,count,number,seq_id,channel,payload,fill_bits*hh`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq)]
pub struct AisData {
    pub fragment_count: u8,
    pub fragment_number: u8,
    pub sequential_id: Option<u32>,
    pub channel: u8,
    /// Raw armored payload, truncated to `MAX_PAYLOAD_LEN` bytes if the
    /// sentence carries more than this crate retains.
    pub payload: ArrayString<MAX_PAYLOAD_LEN>,
    pub fill_bits: u8,
}

pub fn decode(_talker: Talker, data: &[u8]) -> Result<AisData, Error> {
    let fields: heapless::Vec<&[u8], MAX_FIELDS> = crate::tokenizer::tokenize(data);
    if fields.len() < 6 {
        return Err(Error::TooFewFields);
    }

    let payload_bytes = field(&fields, 4);
    let payload_len = payload_bytes.len().min(MAX_PAYLOAD_LEN);
    let mut payload = ArrayString::<MAX_PAYLOAD_LEN>::new();
    for &b in &payload_bytes[..payload_len] {
        let _ = payload.try_push(b as char);
    }

    Ok(AisData {
        fragment_count: parse_uint(field(&fields, 0)).unwrap_or(1) as u8,
        fragment_number: parse_uint(field(&fields, 1)).unwrap_or(1) as u8,
        sequential_id: parse_uint(field(&fields, 2)),
        channel: field(&fields, 3).first().copied().unwrap_or(0),
        payload,
        fill_bits: parse_uint(field(&fields, 5)).unwrap_or(0) as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_single_fragment_message() {
        let data = b"1,1,,A,15M67FC000G?ufbE`FepT@3n00Sa,0";
        let ais = decode(Talker::Ais, data).unwrap();
        assert_eq!(ais.fragment_count, 1);
        assert_eq!(ais.fragment_number, 1);
        assert_eq!(ais.sequential_id, None);
        assert_eq!(ais.channel, b'A');
        assert_eq!(ais.payload.as_str(), "15M67FC000G?ufbE`FepT@3n00Sa");
        assert_eq!(ais.fill_bits, 0);
    }

    #[test]
    fn too_few_fields_is_an_error() {
        assert_eq!(decode(Talker::Ais, b"1,1,,A"), Err(Error::TooFewFields));
    }
}
