//! Sentinel handling for out-of-range sensor values.
//!
//! The decoder reports missing float channels with the `MISSING_DATA`
//! sentinel and corrupt payloads can carry implausibly large magnitudes.
//! [`float_or_missing`] maps both onto an explicit NaN at row-construction
//! time; [`scrub_sentinels`] is a separate, idempotent pass over a finished
//! bundle that catches the integer-style sentinel in columns appended raw
//! (event float channels in particular).

use crate::columns::RecordingBundle;

/// Decoder sentinel for a missing float channel.
pub const MISSING_DATA: f32 = -32768.0;

/// Values at or above this bound are treated as corrupt.
pub const GARBAGE_CEILING: f32 = 1e8;

/// Integer-style missing sentinel caught by the post-pass.
pub const MISSING_INT: f32 = -32767.0;

/// Converts a raw float channel value to NaN if it carries the missing
/// sentinel or is out of plausible range. All other values pass through.
#[inline]
pub fn float_or_missing(value: f32) -> f32 {
    if value <= MISSING_DATA || value >= GARBAGE_CEILING {
        f32::NAN
    } else {
        value
    }
}

/// Replaces integer-style sentinels in all float columns of a finished
/// bundle with NaN.
///
/// Applied after assembly, not during row construction; safe to run more
/// than once. Integer columns are left untouched since they cannot carry a
/// NaN marker.
pub fn scrub_sentinels(bundle: &mut RecordingBundle) {
    if let Some(events) = bundle.events.as_mut() {
        for column in events.float_columns_mut() {
            scrub_column(column);
        }
    }
    if let Some(samples) = bundle.samples.as_mut() {
        for column in samples.float_columns_mut() {
            scrub_column(column);
        }
    }
}

fn scrub_column(column: &mut [f32]) {
    for value in column.iter_mut() {
        if *value <= MISSING_INT || *value >= GARBAGE_CEILING {
            *value = f32::NAN;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sentinel_maps_to_nan() {
        assert!(float_or_missing(MISSING_DATA).is_nan());
        assert!(float_or_missing(-40000.0).is_nan());
        assert!(float_or_missing(GARBAGE_CEILING).is_nan());
        assert!(float_or_missing(1e9).is_nan());
    }

    #[test]
    fn test_in_range_values_pass_through() {
        assert_eq!(float_or_missing(0.0), 0.0);
        assert_eq!(float_or_missing(512.5), 512.5);
        assert_eq!(float_or_missing(-32767.0), -32767.0);
        assert_eq!(float_or_missing(1e8 - 1.0), 1e8 - 1.0);
    }

    #[test]
    fn test_idempotent() {
        for value in [MISSING_DATA, -1.5, 0.0, 999.25, 1e8] {
            let once = float_or_missing(value);
            let twice = float_or_missing(once);
            assert_eq!(once.is_nan(), twice.is_nan());
            if !once.is_nan() {
                assert_eq!(once, twice);
            }
        }
    }

    #[test]
    fn test_scrub_column() {
        let mut column = vec![-32767.0, 1e8, 100.0, f32::NAN, -32766.5];
        scrub_column(&mut column);
        assert!(column[0].is_nan());
        assert!(column[1].is_nan());
        assert_eq!(column[2], 100.0);
        assert!(column[3].is_nan());
        assert_eq!(column[4], -32766.5);
    }
}
