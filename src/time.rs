//! # Julian day helpers
//!
//! The engine takes dates as Julian days, either in universal time (`*_ut` operations) or in
//! ephemeris time (`calc`, `fixstar2`, `pheno`). These helpers build such batches from
//! [`hifitime::Epoch`] values or ISO 8601 strings. Ephemeris time is taken as TT.
use std::str::FromStr;

use hifitime::Epoch;

use crate::constants::JulianDay;
use crate::sweph_errors::SwephError;

/// Julian day (UT) of an epoch.
pub fn jd_ut(epoch: &Epoch) -> JulianDay {
    epoch.to_jde_utc_days()
}

/// Julian day (ET) of an epoch.
pub fn jd_et(epoch: &Epoch) -> JulianDay {
    epoch.to_jde_tt_days()
}

/// Epoch of a Julian day given in universal time.
pub fn epoch_from_jd_ut(jd: JulianDay) -> Epoch {
    Epoch::from_jde_utc(jd)
}

/// Julian days (UT) of a batch of epochs, same order.
pub fn jd_ut_batch(epochs: &[Epoch]) -> Vec<JulianDay> {
    epochs.iter().map(jd_ut).collect()
}

/// Julian days (ET) of a batch of epochs, same order.
pub fn jd_et_batch(epochs: &[Epoch]) -> Vec<JulianDay> {
    epochs.iter().map(jd_et).collect()
}

/// Parse ISO 8601 dates (`YYYY-MM-ddTHH:mm:ss`, UTC unless a scale suffix is given) into
/// Julian days (UT).
///
/// Return
/// ------
/// * the Julian days, or [`SwephError::InvalidDate`] naming the first string that does not parse.
pub fn dates_to_jd_ut(dates: &[&str]) -> Result<Vec<JulianDay>, SwephError> {
    dates
        .iter()
        .map(|date| {
            Epoch::from_str(date)
                .map(|epoch| jd_ut(&epoch))
                .map_err(|err| SwephError::InvalidDate(format!("{date}: {err}")))
        })
        .collect()
}

/// Calendar arguments of `julday` for an epoch: year, month, day and decimal UT hour.
pub fn julday_args(epoch: &Epoch) -> (i32, i32, i32, f64) {
    let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();
    let hours = f64::from(hour)
        + f64::from(minute) / 60.0
        + (f64::from(second) + f64::from(nanos) * 1e-9) / 3600.0;
    (year, i32::from(month), i32::from(day), hours)
}
