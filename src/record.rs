//! Talker/sentence-type enums, the shared time/date/coordinate types, and the
//! tagged-union [`Record`] produced by the framer for each decoded sentence.

use crate::fixed::{self, Fixed};
use crate::sentences::{
    AisData, GbsData, GgaData, GllData, GnsData, GsaData, GstData, GsvData, RmcData, VtgData,
    ZdaData,
};

/// UTC time of day, as carried by most sentences.
///
/// Fractional seconds always normalize to microseconds by left-padding with
/// zeros; `seconds` admits 60 for a leap second.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Time {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub microseconds: u32,
    pub valid: bool,
}

/// Calendar date. RMC only ever supplies a two-digit year; `year` stays zero
/// until the framer backfills the century it last observed in a ZDA sentence.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Date {
    pub day: u8,
    pub month: u8,
    pub year: u16,
    pub year_yy: u8,
    pub valid: bool,
}

/// A raw NMEA coordinate (`DDMM.MMMM` form) plus its hemisphere byte.
///
/// Valid iff `hemisphere != 0` and `raw`'s scale is non-zero; an explicitly
/// present but wrong hemisphere character fails the whole field upstream in
/// the tokenizer, while an absent hemisphere quietly yields `hemisphere = 0`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coord {
    pub raw: Fixed,
    pub hemisphere: u8,
}

impl Coord {
    pub fn is_valid(self) -> bool {
        self.hemisphere != 0 && self.raw.is_valid()
    }

    /// Lossy conversion to signed decimal degrees; `NaN` if invalid.
    pub fn to_degrees(self) -> f64 {
        fixed::coord_to_degrees(self.raw, self.hemisphere)
    }

    /// Fixed-point degrees scaled by `1e7`, for integer-only consumers.
    pub fn to_fixed_degrees(self) -> Option<i64> {
        fixed::coord_to_fixed_degrees(self.raw, self.hemisphere)
    }
}

macro_rules! define_byte_enum {
    (
        $(#[$outer:meta])*
        enum $Name:ident {
            $($(#[$variant:meta])* $Variant:ident),* $(,)*
        }
    ) => {
        $(#[$outer])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $Name {
            $($(#[$variant])* $Variant),*,
            /// Unrecognized code.
            None,
        }

        impl $Name {
            pub(crate) fn from_slice(s: &[u8]) -> Self {
                $(
                    #[allow(nonstandard_style)]
                    const $Variant: &[u8] = stringify!($Variant).as_bytes();
                )*
                match s {
                    $($Variant => $Name::$Variant,)*
                    _ => $Name::None,
                }
            }
        }
    };
}

define_byte_enum!(
    /// Three-letter NMEA sentence type code.
    enum SentenceType {
        RMC, GGA, GNS, GSA, GSV, VTG, GLL, ZDA, GBS, GST, VDM, VDO,
    }
);

/// Two-letter talker code identifying the emitting system.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Talker {
    Gps,
    Glonass,
    Galileo,
    Beidou,
    /// Combined/multi-constellation (`GN`).
    Combined,
    Qzss,
    NavIc,
    /// AIS base talker (`AI`) and its subtypes (`AB`/`AD`/`AN`/`AR`/`AS`/`AT`/`AX`).
    Ais,
    None,
}

impl Talker {
    pub(crate) fn from_slice(s: &[u8]) -> Self {
        match s {
            b"GP" => Talker::Gps,
            b"GL" => Talker::Glonass,
            b"GA" => Talker::Galileo,
            b"GB" | b"BD" => Talker::Beidou,
            b"GN" => Talker::Combined,
            b"GQ" => Talker::Qzss,
            b"GI" => Talker::NavIc,
            b"AI" | b"AB" | b"AD" | b"AN" | b"AR" | b"AS" | b"AT" | b"AX" => Talker::Ais,
            _ => Talker::None,
        }
    }
}

/// Constellation identifying a PRN, derived either from an explicit NMEA 4.11
/// system-ID field or, failing that, from the talker ID.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constellation {
    Gps,
    Glonass,
    Galileo,
    Beidou,
    Combined,
}

impl Constellation {
    /// NMEA 4.11 GSA system-ID field: 1=GPS, 2=GLONASS, 3=Galileo, 4=BeiDou,
    /// anything else combined.
    pub fn from_system_id(id: u32) -> Self {
        match id {
            1 => Constellation::Gps,
            2 => Constellation::Glonass,
            3 => Constellation::Galileo,
            4 => Constellation::Beidou,
            _ => Constellation::Combined,
        }
    }

    pub fn from_talker(talker: Talker) -> Self {
        match talker {
            Talker::Gps => Constellation::Gps,
            Talker::Glonass => Constellation::Glonass,
            Talker::Galileo => Constellation::Galileo,
            Talker::Beidou => Constellation::Beidou,
            Talker::Combined => Constellation::Combined,
            _ => Constellation::Gps,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Constellation::Gps => 0,
            Constellation::Glonass => 1,
            Constellation::Galileo => 2,
            Constellation::Beidou => 3,
            Constellation::Combined => 4,
        }
    }
}

/// GGA fix-quality code (field 6). Stored as the raw wire value in
/// [`GgaData::fix_quality`]; this is only a lookup table, not a validator —
/// the decoder casts the parsed integer with no range check, mirroring the
/// original receiver behavior.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixQuality {
    Invalid = 0,
    Gps = 1,
    Dgps = 2,
    Pps = 3,
    Rtk = 4,
    RtkFloat = 5,
    Estimated = 6,
    Manual = 7,
    Simulation = 8,
}

impl FixQuality {
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => FixQuality::Invalid,
            1 => FixQuality::Gps,
            2 => FixQuality::Dgps,
            3 => FixQuality::Pps,
            4 => FixQuality::Rtk,
            5 => FixQuality::RtkFloat,
            6 => FixQuality::Estimated,
            7 => FixQuality::Manual,
            8 => FixQuality::Simulation,
            _ => return None,
        })
    }
}

/// FAA/GNS mode indicator (NMEA 2.3+).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaaMode {
    Autonomous,
    Differential,
    Estimated,
    RtkFloat,
    Manual,
    NotValid,
    Precise,
    RtkInteger,
    Simulator,
}

impl FaaMode {
    pub fn from_char(c: u8) -> Option<Self> {
        Some(match c {
            b'A' => FaaMode::Autonomous,
            b'D' => FaaMode::Differential,
            b'E' => FaaMode::Estimated,
            b'F' => FaaMode::RtkFloat,
            b'M' => FaaMode::Manual,
            b'N' => FaaMode::NotValid,
            b'P' => FaaMode::Precise,
            b'R' => FaaMode::RtkInteger,
            b'S' => FaaMode::Simulator,
            _ => return None,
        })
    }
}

/// GSA fix-type code (field 2).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GsaFixType {
    NoFix = 1,
    Fix2D = 2,
    Fix3D = 3,
}

impl GsaFixType {
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => GsaFixType::NoFix,
            2 => GsaFixType::Fix2D,
            3 => GsaFixType::Fix3D,
            _ => return None,
        })
    }
}

/// Navigational status code (NMEA 4.1+, RMC field 12).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavStatus {
    Safe,
    Caution,
    Unsafe,
    NotValid,
}

impl NavStatus {
    pub fn from_char(c: u8) -> Option<Self> {
        Some(match c {
            b'S' => NavStatus::Safe,
            b'C' => NavStatus::Caution,
            b'U' => NavStatus::Unsafe,
            b'V' => NavStatus::NotValid,
            _ => return None,
        })
    }
}

/// One satellite entry in a GSV block. Elevation/azimuth/SNR use the wire's
/// own "not reported" sentinels rather than `Option`, matching the original
/// receiver's in-place defaults.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Satellite {
    pub prn: u8,
    pub elevation: i16,
    pub azimuth: i16,
    pub snr: i16,
}

impl Satellite {
    pub const ELEVATION_ABSENT: i16 = -128;
    pub const AZIMUTH_ABSENT: i16 = -1;
    pub const SNR_ABSENT: i16 = -1;
}

/// A decoded sentence, tagged by talker and type.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub talker: Talker,
    pub sentence_type: SentenceType,
    pub payload: Payload,
}

/// The tagged-union payload. Exactly one variant is valid per [`Record`],
/// selected by `Record::sentence_type` — a sum type rather than the source's
/// C union-plus-enum-tag, so the tag and payload cannot diverge.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Rmc(RmcData),
    Gga(GgaData),
    Gns(GnsData),
    Gsa(GsaData),
    Gsv(GsvData),
    Vtg(VtgData),
    Gll(GllData),
    Zda(ZdaData),
    Gbs(GbsData),
    Gst(GstData),
    Ais(AisData),
}
