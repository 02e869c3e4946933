use hifitime::{Epoch, Unit};
use std::str::FromStr;

use crate::celestsp_errors::CelestspError;
use crate::constants::{Hour, Radian, DPI, MJD, SECONDS_PER_DAY, SIDEREAL_RATE, T2000};

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// This function implements the IAU 1982 polynomial formula for the mean sidereal
/// time at 0h UT1, plus the fractional-day correction due to Earth's rotation rate.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
///
/// # Details
/// 1. A cubic polynomial (coefficients C0–C3) gives GMST at 0h UT1 in seconds.
/// 2. The fraction of the day, scaled by [`SIDEREAL_RATE`], adds the rotation
///    accumulated since 0h.
///
/// UTC is accepted in place of UT1 by the callers of this crate: |UT1 − UTC| stays
/// below 0.9 s, far under the resolution of the horizon sampling grid.
pub fn gmst(tjm: MJD) -> Radian {
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Integer MJD (0h UT1) and Julian centuries since J2000
    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * DPI / SECONDS_PER_DAY;

    let h = tjm.fract() * DPI;
    (gmst0 + h * SIDEREAL_RATE).rem_euclid(DPI)
}

/// Parse a timezone offset such as `"+9"`, `"-3"` or `"+5.5"` into hours.
///
/// Errors
/// ----------
/// * [`CelestspError::InvalidTimezone`] when the string is not a number or lies
///   outside `[-14, +14]` hours.
pub fn parse_timezone_offset(tz: &str) -> Result<Hour, CelestspError> {
    let offset = f64::from_str(tz.trim())
        .map_err(|_| CelestspError::InvalidTimezone(tz.to_string()))?;

    if !offset.is_finite() || offset.abs() > 14.0 {
        return Err(CelestspError::InvalidTimezone(tz.to_string()));
    }
    Ok(offset)
}

/// Split an epoch into the `YYYY-MM-DD` and `HH:MM:SS` strings of its UTC calendar date.
pub fn utc_date_time_strings(epoch: &Epoch) -> (String, String) {
    let (y, m, d, hh, mm, ss, _) = epoch.to_gregorian_utc();
    (
        format!("{y:04}-{m:02}-{d:02}"),
        format!("{hh:02}:{mm:02}:{ss:02}"),
    )
}

/// Resolve the observation instant from calendar strings and a timezone offset.
///
/// When neither `date` nor `time` is given, the instant is `now` truncated to the second
/// and the timezone offset is **not** applied: the current time is already absolute.
/// As soon as one of them is supplied, the missing part defaults to the UTC calendar
/// value of `now`, the pair is read as local time, and the offset is subtracted to get UTC.
///
/// Arguments
/// -----------------
/// * `date`: Optional `YYYY-MM-DD`.
/// * `time`: Optional `HH:MM:SS`.
/// * `tz`: Offset of the local time from UTC in hours (e.g. `"+9"`).
/// * `now`: Reference "current" instant.
///
/// Return
/// ----------
/// * The absolute observation [`Epoch`] (UTC).
///
/// Errors
/// ----------
/// * [`CelestspError::InvalidDateTime`] if the calendar strings cannot be parsed.
/// * [`CelestspError::InvalidTimezone`] if the offset is malformed.
pub fn resolve_observation_instant(
    date: Option<&str>,
    time: Option<&str>,
    tz: &str,
    now: Epoch,
) -> Result<Epoch, CelestspError> {
    let (now_date, now_time) = utc_date_time_strings(&now);
    let use_now = date.is_none() && time.is_none();

    let date = date.unwrap_or(&now_date);
    let time = time.unwrap_or(&now_time);

    let iso = format!("{}T{} UTC", date.trim(), time.trim());
    let local = Epoch::from_str(&iso)
        .map_err(|_| CelestspError::InvalidDateTime(format!("{date} {time}")))?;

    if use_now {
        return Ok(local);
    }

    let offset = parse_timezone_offset(tz)?;
    Ok(local - Unit::Hour * offset)
}

/// Shift an epoch forward by a (possibly fractional) number of hours.
pub fn offset_by_hours(epoch: &Epoch, hours: Hour) -> Epoch {
    *epoch + Unit::Hour * hours
}

/// Elapsed time from `from` to `to`, in hours.
pub fn hours_between(from: &Epoch, to: &Epoch) -> Hour {
    (*to - *from).to_unit(Unit::Hour)
}

/// Evenly spaced offsets over `[0, window]`, both ends included.
///
/// `samples` values are produced; offset `k` is `k · window / (samples − 1)`.
/// A single sample yields `[0]` and zero samples yields nothing.
pub fn sample_offsets(samples: usize, window: Hour) -> impl Iterator<Item = Hour> {
    let step = if samples > 1 {
        window / (samples - 1) as f64
    } else {
        0.0
    };
    (0..samples).map(move |k| k as f64 * step)
}
