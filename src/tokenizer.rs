//! Comma tokenizer and primitive field parsers.
//!
//! Every parser here is a pure function over `&[u8]`; none of them route
//! through `f32`/`f64`, keeping decoding allocation-free and float-free as
//! required by the surrounding crate.

use heapless::Vec;

use crate::record::{Coord, Date, Time};

/// Splits `data` on commas into up to `N` `(ptr, len)` sub-slices. A trailing
/// comma yields a final empty field; zero-length input yields zero fields.
/// Fields beyond `N` are silently not collected — callers must size `N` to
/// the maximum field count they expect.
pub fn tokenize<const N: usize>(data: &[u8]) -> Vec<&[u8], N> {
    let mut fields = Vec::new();
    if data.is_empty() {
        return fields;
    }
    let mut start = 0;
    for (i, &b) in data.iter().enumerate() {
        if b == b',' {
            if fields.push(&data[start..i]).is_err() {
                return fields;
            }
            start = i + 1;
        }
    }
    let _ = fields.push(&data[start..]);
    fields
}

fn parse_uint_raw(s: &[u8]) -> Option<u32> {
    if s.is_empty() {
        return None;
    }
    let mut acc: u32 = 0;
    for &b in s {
        if !b.is_ascii_digit() {
            return None;
        }
        acc = acc.checked_mul(10)?.checked_add((b - b'0') as u32)?;
    }
    Some(acc)
}

/// Unsigned integer field: rejects empty input, requires every byte to be an
/// ASCII digit, and overflows to `None` rather than wrapping.
pub fn parse_uint(s: &[u8]) -> Option<u32> {
    parse_uint_raw(s)
}

/// Signed integer field: an optional leading `+`/`-`, then [`parse_uint`] on
/// the remainder. Range-checked asymmetrically like `i32`: the magnitude of a
/// negative value may reach `i32::MAX as u32 + 1` (i.e. `i32::MIN`).
pub fn parse_int(s: &[u8]) -> Option<i32> {
    if s.is_empty() {
        return None;
    }
    let (neg, rest) = match s[0] {
        b'+' => (false, &s[1..]),
        b'-' => (true, &s[1..]),
        _ => (false, s),
    };
    if rest.is_empty() {
        return None;
    }
    let uval = parse_uint_raw(rest)?;
    if neg {
        if uval > i32::MAX as u32 + 1 {
            return None;
        }
        Some((uval as i64).wrapping_neg() as i32)
    } else {
        if uval > i32::MAX as u32 {
            return None;
        }
        Some(uval as i32)
    }
}

/// Single-byte field: the first byte, or `None` if the field is empty.
pub fn parse_char(s: &[u8]) -> Option<u8> {
    s.first().copied()
}

/// Fixed-point decimal field.
///
/// Strips an optional sign, locates `.`, parses each side as an unsigned
/// integer (either side may be empty on its own), and sets `scale =
/// 10^(fractional digit count)`. Rejects `""`, `"."`, `"+"`, `"-"`.
///
/// When no `.` is present the *entire* field is parsed as the fractional
/// side, so e.g. `"123"` yields `{value: 123, scale: 1000}` rather than
/// `{value: 123, scale: 1}` — a direct artifact of the upstream receiver's
/// decimal-point branch never executing for integer-only input. Preserved
/// here exactly as observed rather than "fixed", since embedders may already
/// depend on the on-the-wire scale this produces.
pub fn parse_fixedpoint(s: &[u8]) -> Option<crate::fixed::Fixed> {
    use crate::fixed::Fixed;

    if s.is_empty() {
        return None;
    }
    let (neg, s) = match s[0] {
        b'+' => (false, &s[1..]),
        b'-' => (true, &s[1..]),
        _ => (false, s),
    };
    if s.is_empty() || s == b"." {
        return None;
    }

    let dot = s.iter().position(|&b| b == b'.');
    let (int_part, frac_part): (&[u8], &[u8]) = match dot {
        Some(i) => (&s[..i], &s[i + 1..]),
        None => (&[], s),
    };

    let int_val: i64 = if int_part.is_empty() {
        0
    } else {
        parse_uint_raw(int_part)? as i64
    };
    let frac_val: i64 = if frac_part.is_empty() {
        0
    } else {
        parse_uint_raw(frac_part)? as i64
    };
    let scale: i64 = 10i64.pow(frac_part.len() as u32);

    let combined = int_val.checked_mul(scale)?.checked_add(frac_val)?;
    if combined > i32::MAX as i64 {
        return None;
    }
    let value = if neg { -(combined as i32) } else { combined as i32 };
    Some(Fixed::new(value, scale as i32))
}

/// Time field: `HHMMSS` (at least 6 digits, leading) with `H<=23`, `M<=59`,
/// `S<=60` (60 admits a leap second), optionally followed by `.FFFFFF`
/// (1 to 6 digits), zero-padded on the right to microseconds.
pub fn parse_time(s: &[u8]) -> Option<Time> {
    if s.len() < 6 {
        return None;
    }
    let digits = &s[..6];
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let hours = (digits[0] - b'0') * 10 + (digits[1] - b'0');
    let minutes = (digits[2] - b'0') * 10 + (digits[3] - b'0');
    let seconds = (digits[4] - b'0') * 10 + (digits[5] - b'0');
    if hours > 23 || minutes > 59 || seconds > 60 {
        return None;
    }

    // A fraction is only attempted past a 7th byte equal to '.'; anything
    // else trailing the 6 integer digits (a bare 7-char "HHMMSS.", a
    // different separator, extra garbage) is ignored rather than rejected,
    // mirroring the original receiver's `parse_time`.
    let mut microseconds: u32 = 0;
    if s.len() > 7 && s[6] == b'.' {
        let mut v: u32 = 0;
        let mut digit_count = 0u32;
        for &b in &s[7..] {
            if digit_count >= 6 || !b.is_ascii_digit() {
                break;
            }
            v = v * 10 + (b - b'0') as u32;
            digit_count += 1;
        }
        for _ in digit_count..6 {
            v *= 10;
        }
        microseconds = v;
    }

    Some(Time {
        hours,
        minutes,
        seconds,
        microseconds,
        valid: true,
    })
}

/// Date field: at least 6 digits `DDMMYY`, `day` 1-31 and `month` 1-12. Only
/// the first 6 bytes are validated; anything past them is ignored, mirroring
/// the original receiver's `parse_date`. The full `year` is left at 0; the
/// framer backfills it once a century is known from a prior ZDA.
pub fn parse_date(s: &[u8]) -> Option<Date> {
    if s.len() < 6 {
        return None;
    }
    let digits = &s[..6];
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let day = (digits[0] - b'0') * 10 + (digits[1] - b'0');
    let month = (digits[2] - b'0') * 10 + (digits[3] - b'0');
    let year_yy = (digits[4] - b'0') * 10 + (digits[5] - b'0');
    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return None;
    }
    Some(Date {
        day,
        month,
        year: 0,
        year_yy,
        valid: true,
    })
}

fn parse_coord(raw: &[u8], dir: &[u8], pos: u8, neg: u8) -> Option<Coord> {
    let raw = parse_fixedpoint(raw)?;
    let hemisphere = if dir.is_empty() {
        0
    } else if dir.len() == 1 && (dir[0] == pos || dir[0] == neg) {
        dir[0]
    } else {
        // An explicitly present but wrong hemisphere character fails the
        // whole field; an absent one silently means "no fix".
        return None;
    };
    Some(Coord { raw, hemisphere })
}

/// Latitude: a fixed-point raw value plus a direction field restricted to
/// `{'N', 'S'}`.
pub fn parse_latitude(raw: &[u8], dir: &[u8]) -> Option<Coord> {
    parse_coord(raw, dir, b'N', b'S')
}

/// Longitude: a fixed-point raw value plus a direction field restricted to
/// `{'E', 'W'}`.
pub fn parse_longitude(raw: &[u8], dir: &[u8]) -> Option<Coord> {
    parse_coord(raw, dir, b'E', b'W')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::Fixed;
    use pretty_assertions::assert_eq;

    #[test]
    fn tokenize_basic() {
        let fields: Vec<&[u8], 8> = tokenize(b"a,bb,,ccc");
        assert_eq!(fields.as_slice(), &[b"a".as_slice(), b"bb", b"", b"ccc"]);
    }

    #[test]
    fn tokenize_empty_input_yields_no_fields() {
        let fields: Vec<&[u8], 8> = tokenize(b"");
        assert!(fields.is_empty());
    }

    #[test]
    fn tokenize_trailing_comma_yields_empty_final_field() {
        let fields: Vec<&[u8], 8> = tokenize(b"a,b,");
        assert_eq!(fields.as_slice(), &[b"a".as_slice(), b"b", b""]);
    }

    #[test]
    fn tokenize_truncates_cleanly_at_capacity() {
        let fields: Vec<&[u8], 2> = tokenize(b"a,b,c,d");
        assert_eq!(fields.as_slice(), &[b"a".as_slice(), b"b"]);
    }

    #[test]
    fn uint_rejects_empty_and_overflow() {
        assert_eq!(parse_uint(b""), None);
        assert_eq!(parse_uint(b"42"), Some(42));
        assert_eq!(parse_uint(b"4294967296"), None);
    }

    #[test]
    fn int_boundary_values() {
        assert_eq!(parse_int(b"-2147483648"), Some(i32::MIN));
        assert_eq!(parse_int(b"-2147483649"), None);
        assert_eq!(parse_int(b"+5"), Some(5));
        assert_eq!(parse_int(b"-"), None);
    }

    #[test]
    fn fixedpoint_integer_only_quirk_is_preserved() {
        assert_eq!(parse_fixedpoint(b"123"), Some(Fixed::new(123, 1000)));
    }

    #[test]
    fn fixedpoint_boundary_values() {
        assert_eq!(parse_fixedpoint(b".5"), Some(Fixed::new(5, 10)));
        assert_eq!(parse_fixedpoint(b"."), None);
        assert_eq!(parse_fixedpoint(b"+"), None);
        assert_eq!(parse_fixedpoint(b"-"), None);
        assert_eq!(parse_fixedpoint(b""), None);
    }

    #[test]
    fn time_accepts_leap_second_rejects_bad_hour() {
        assert!(parse_time(b"235960").is_some());
        assert!(parse_time(b"250000").is_none());
    }

    #[test]
    fn time_fractional_seconds_pad_to_microseconds() {
        let t = parse_time(b"225446.33").unwrap();
        assert_eq!(t.microseconds, 330_000);
    }

    #[test]
    fn time_bare_dot_with_no_fraction_is_zero_microseconds() {
        let t = parse_time(b"225446.").unwrap();
        assert_eq!(t.microseconds, 0);
    }

    #[test]
    fn time_more_than_six_fractional_digits_truncates_not_rejects() {
        let t = parse_time(b"225446.123456789").unwrap();
        assert_eq!(t.microseconds, 123_456);
    }

    #[test]
    fn time_trailing_garbage_after_digits_is_ignored() {
        assert!(parse_time(b"225446X").is_some());
        assert!(parse_time(b"225446.33X").is_some());
    }

    #[test]
    fn date_rejects_out_of_range_day_and_month() {
        assert!(parse_date(b"000125").is_none());
        assert!(parse_date(b"151325").is_none());
        assert!(parse_date(b"191194").is_some());
    }

    #[test]
    fn date_trailing_garbage_after_six_digits_is_ignored() {
        assert!(parse_date(b"191194X").is_some());
        assert!(parse_date(b"1911940").is_some());
    }

    #[test]
    fn latitude_wrong_hemisphere_char_fails_whole_field() {
        assert!(parse_latitude(b"4807.038", b"N").is_some());
        assert!(parse_latitude(b"4807.038", b"X").is_none());
    }

    #[test]
    fn latitude_empty_hemisphere_yields_zero_byte() {
        let c = parse_latitude(b"4807.038", b"").unwrap();
        assert_eq!(c.hemisphere, 0);
        assert!(!c.is_valid());
    }
}
