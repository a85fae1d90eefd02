//! Per-sentence field decoders.
//!
//! Each decoder tokenizes its data slice (the bytes after `"$TTSSS,"`) into a
//! fixed-capacity array of fields and reads them by position. A field that
//! fails to parse is left at its zero/invalid default rather than failing the
//! whole decoder — only an overall field-count shortfall is an error.

mod ais;
mod gbs;
mod gga;
mod gll;
mod gns;
mod gsa;
mod gst;
mod gsv;
mod rmc;
mod vtg;
mod zda;

pub use ais::AisData;
pub use gbs::GbsData;
pub use gga::GgaData;
pub use gll::GllData;
pub use gns::GnsData;
pub use gsa::GsaData;
pub use gst::GstData;
pub use gsv::GsvData;
pub use rmc::RmcData;
pub use vtg::VtgData;
pub use zda::ZdaData;

use heapless::Vec;

use crate::error::Error;
use crate::record::{Payload, SentenceType, Talker};

/// Dispatches a tokenized sentence body to the decoder matching `sentence_type`.
pub(crate) fn decode(
    sentence_type: SentenceType,
    talker: Talker,
    data: &[u8],
) -> Result<Payload, Error> {
    match sentence_type {
        SentenceType::RMC => rmc::decode(talker, data).map(Payload::Rmc),
        SentenceType::GGA => gga::decode(talker, data).map(Payload::Gga),
        SentenceType::GNS => gns::decode(talker, data).map(Payload::Gns),
        SentenceType::GSA => gsa::decode(talker, data).map(Payload::Gsa),
        SentenceType::GSV => gsv::decode(talker, data).map(Payload::Gsv),
        SentenceType::VTG => vtg::decode(talker, data).map(Payload::Vtg),
        SentenceType::GLL => gll::decode(talker, data).map(Payload::Gll),
        SentenceType::ZDA => zda::decode(talker, data).map(Payload::Zda),
        SentenceType::GBS => gbs::decode(talker, data).map(Payload::Gbs),
        SentenceType::GST => gst::decode(talker, data).map(Payload::Gst),
        SentenceType::VDM | SentenceType::VDO => ais::decode(talker, data).map(Payload::Ais),
        SentenceType::None => Err(Error::Unsupported),
    }
}

/// Returns field `idx`, or an empty slice if the field was not present at
/// all (as opposed to present-but-empty, which tokenizes to `b""` too — the
/// two are indistinguishable here by design, matching optional trailing
/// NMEA fields that receivers commonly omit outright).
pub(crate) fn field<'a, const N: usize>(fields: &Vec<&'a [u8], N>, idx: usize) -> &'a [u8] {
    fields.get(idx).copied().unwrap_or(b"")
}
