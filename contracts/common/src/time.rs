//! # Presentation-time formatting
//!
//! Ledger storage keeps timestamps as raw epoch seconds (UTC). Conversion to a
//! human-readable, zone-shifted string happens only when a value leaves the
//! contract, through [`to_human_readable`].
//!
//! The output is fixed-width ISO-8601 with an explicit offset:
//!
//! ```text
//! 2023-11-15T03:43:20+05:30
//! ```

use soroban_sdk::{Env, String};

/// Length in bytes of every string produced by [`format_iso8601`].
pub const ISO_8601_LEN: usize = 25;

/// Largest offset from UTC accepted by the formatter (UTC+14:00 / UTC-14:00).
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// 9999-12-31T23:59:59Z, the last instant with a four-digit year.
const MAX_EPOCH_SECS: i64 = 253_402_300_799;

const SECS_PER_DAY: i64 = 86_400;

/// Converts a day count relative to 1970-01-01 into `(year, month, day)`.
///
/// Proleptic Gregorian calendar; valid for negative day counts as well.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

fn put_digits(buf: &mut [u8], mut value: u32) {
    for slot in buf.iter_mut().rev() {
        *slot = b'0' + (value % 10) as u8;
        value /= 10;
    }
}

/// Formats `epoch_secs` shifted by `utc_offset_minutes` as
/// `YYYY-MM-DDTHH:MM:SS±HH:MM`.
///
/// The offset is clamped to ±[`MAX_UTC_OFFSET_MINUTES`] and the local time is
/// clamped to the year 9999 so the output width never changes.
pub fn format_iso8601(epoch_secs: u64, utc_offset_minutes: i32) -> [u8; ISO_8601_LEN] {
    let offset = utc_offset_minutes.clamp(-MAX_UTC_OFFSET_MINUTES, MAX_UTC_OFFSET_MINUTES);
    let utc = i64::try_from(epoch_secs)
        .unwrap_or(MAX_EPOCH_SECS)
        .min(MAX_EPOCH_SECS);
    let local = (utc + i64::from(offset) * 60).min(MAX_EPOCH_SECS);

    let days = local.div_euclid(SECS_PER_DAY);
    let secs_of_day = local.rem_euclid(SECS_PER_DAY) as u32;
    let (year, month, day) = civil_from_days(days);

    let mut buf = *b"0000-00-00T00:00:00+00:00";
    put_digits(&mut buf[0..4], year as u32);
    put_digits(&mut buf[5..7], month);
    put_digits(&mut buf[8..10], day);
    put_digits(&mut buf[11..13], secs_of_day / 3_600);
    put_digits(&mut buf[14..16], (secs_of_day / 60) % 60);
    put_digits(&mut buf[17..19], secs_of_day % 60);

    if offset < 0 {
        buf[19] = b'-';
    }
    let abs_offset = offset.unsigned_abs();
    put_digits(&mut buf[20..22], abs_offset / 60);
    put_digits(&mut buf[23..25], abs_offset % 60);
    buf
}

/// Soroban `String` form of [`format_iso8601`].
pub fn to_human_readable(env: &Env, epoch_secs: u64, utc_offset_minutes: i32) -> String {
    let buf = format_iso8601(epoch_secs, utc_offset_minutes);
    String::from_bytes(env, &buf)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(epoch: u64, offset: i32) -> [u8; ISO_8601_LEN] {
        format_iso8601(epoch, offset)
    }

    #[test]
    fn epoch_zero_is_unix_origin() {
        assert_eq!(&fmt(0, 0), b"1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn known_instant_in_utc_and_kolkata() {
        assert_eq!(&fmt(1_700_000_000, 0), b"2023-11-14T22:13:20+00:00");
        assert_eq!(&fmt(1_700_000_000, 330), b"2023-11-15T03:43:20+05:30");
    }

    #[test]
    fn leap_day_is_rendered() {
        assert_eq!(&fmt(951_782_400, 0), b"2000-02-29T00:00:00+00:00");
        assert_eq!(&fmt(1_709_208_000, 0), b"2024-02-29T12:00:00+00:00");
    }

    #[test]
    fn negative_offset_crosses_back_before_epoch() {
        assert_eq!(&fmt(0, -300), b"1969-12-31T19:00:00-05:00");
    }

    #[test]
    fn offset_is_clamped() {
        assert_eq!(&fmt(0, 10_000), b"1970-01-01T14:00:00+14:00");
        assert_eq!(&fmt(0, -10_000), b"1969-12-31T10:00:00-14:00");
    }

    #[test]
    fn far_future_saturates_at_year_9999() {
        assert_eq!(&fmt(u64::MAX, 0), b"9999-12-31T23:59:59+00:00");
        assert_eq!(&fmt(253_402_300_799, 60), b"9999-12-31T23:59:59+01:00");
    }

    #[test]
    fn soroban_string_matches_bytes() {
        let env = Env::default();
        let s = to_human_readable(&env, 1_700_000_000, 330);
        assert_eq!(s, String::from_str(&env, "2023-11-15T03:43:20+05:30"));
        assert_eq!(s.len() as usize, ISO_8601_LEN);
    }
}
