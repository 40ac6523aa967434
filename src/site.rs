//! # Auxiliary vectors: site, atmosphere, observer
//!
//! Several engine signatures read a fixed number of values through a raw pointer: a
//! geographic position (3 values), atmospheric conditions (4 values) and an observer
//! description (6 values). Handing the engine a shorter slice makes it read past the end,
//! so the lengths are checked **before** any engine contact and the values are copied into
//! fixed-size arrays the gateway can pass safely.
//!
//! Extra trailing values are accepted and ignored.
use serde::{Deserialize, Serialize};

use crate::constants::{
    Degree, Meter, ATMOSPHERE_MIN_LEN, GEOPOS_MIN_LEN, OBSERVER_MIN_LEN,
};
use crate::sweph_errors::SwephError;

pub(crate) fn check_len(
    values: &[f64],
    name: &'static str,
    description: &'static str,
    required: usize,
) -> Result<(), SwephError> {
    if values.len() < required {
        return Err(SwephError::AuxiliaryTooShort {
            name,
            description,
            required,
            actual: values.len(),
        });
    }
    Ok(())
}

pub(crate) fn take<const N: usize>(values: &[f64]) -> [f64; N] {
    let mut out = [0.0; N];
    out.copy_from_slice(&values[..N]);
    out
}

/// Geographic position of the observer: longitude, latitude (degrees) and height (meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition([f64; GEOPOS_MIN_LEN]);

impl GeoPosition {
    pub fn new(longitude: Degree, latitude: Degree, height: Meter) -> Self {
        GeoPosition([longitude, latitude, height])
    }

    /// Validate a host-side vector.
    ///
    /// Arguments
    /// -----------------
    /// * `name`: the argument name reported in the error (`"geopos"`, `"dgeo"`).
    /// * `values`: at least three values; extra values are ignored.
    pub fn from_slice(name: &'static str, values: &[f64]) -> Result<Self, SwephError> {
        check_len(values, name, "Geographic position", GEOPOS_MIN_LEN)?;
        Ok(GeoPosition(take(values)))
    }

    pub fn longitude(&self) -> Degree {
        self.0[0]
    }

    pub fn latitude(&self) -> Degree {
        self.0[1]
    }

    pub fn height(&self) -> Meter {
        self.0[2]
    }

    /// Copy suitable for a `double *` engine argument.
    pub fn to_array(self) -> [f64; GEOPOS_MIN_LEN] {
        self.0
    }
}

/// Atmospheric conditions: pressure (hPa), temperature (°C), relative humidity (%),
/// and visibility (meteorological range in km, or extinction coefficient when < 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere([f64; ATMOSPHERE_MIN_LEN]);

impl Atmosphere {
    pub fn new(pressure: f64, temperature: f64, humidity: f64, visibility: f64) -> Self {
        Atmosphere([pressure, temperature, humidity, visibility])
    }

    pub fn from_slice(name: &'static str, values: &[f64]) -> Result<Self, SwephError> {
        check_len(values, name, "Atmospheric conditions", ATMOSPHERE_MIN_LEN)?;
        Ok(Atmosphere(take(values)))
    }

    pub fn to_array(self) -> [f64; ATMOSPHERE_MIN_LEN] {
        self.0
    }
}

/// Observer description: age, Snellen ratio, then the optical instrument fields
/// (binocular flag, magnification, aperture, transmission).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverProfile([f64; OBSERVER_MIN_LEN]);

impl ObserverProfile {
    /// Naked-eye observer of the given age and Snellen ratio.
    pub fn naked_eye(age: f64, snellen_ratio: f64) -> Self {
        ObserverProfile([age, snellen_ratio, 0.0, 0.0, 0.0, 0.0])
    }

    pub fn from_slice(name: &'static str, values: &[f64]) -> Result<Self, SwephError> {
        check_len(values, name, "Observer description", OBSERVER_MIN_LEN)?;
        Ok(ObserverProfile(take(values)))
    }

    pub fn to_array(self) -> [f64; OBSERVER_MIN_LEN] {
        self.0
    }
}

/// The three auxiliary vectors of the heliacal operations, validated together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityConditions {
    pub geo: GeoPosition,
    pub atmosphere: Atmosphere,
    pub observer: ObserverProfile,
}

impl VisibilityConditions {
    /// Validate `dgeo`, `datm` and `dobs` in that order; the first short vector is reported.
    pub fn from_slices(dgeo: &[f64], datm: &[f64], dobs: &[f64]) -> Result<Self, SwephError> {
        Ok(VisibilityConditions {
            geo: GeoPosition::from_slice("dgeo", dgeo)?,
            atmosphere: Atmosphere::from_slice("datm", datm)?,
            observer: ObserverProfile::from_slice("dobs", dobs)?,
        })
    }
}

#[cfg(test)]
mod site_test {
    use super::*;

    #[test]
    fn test_geopos_too_short() {
        let err = GeoPosition::from_slice("geopos", &[6.0, 50.0]).unwrap_err();
        assert_eq!(
            err,
            SwephError::AuxiliaryTooShort {
                name: "geopos",
                description: "Geographic position",
                required: 3,
                actual: 2
            }
        );
        assert_eq!(
            err.to_string(),
            "Geographic position 'geopos' must have at least length 3 (got 2)"
        );
    }

    #[test]
    fn test_geopos_extra_values_ignored() {
        let geo = GeoPosition::from_slice("geopos", &[6.0, 50.0, 100.0, 42.0]).unwrap();
        assert_eq!(geo, GeoPosition::new(6.0, 50.0, 100.0));
        assert_eq!(geo.longitude(), 6.0);
        assert_eq!(geo.latitude(), 50.0);
        assert_eq!(geo.height(), 100.0);
    }

    #[test]
    fn test_visibility_reports_first_short_vector() {
        let err = VisibilityConditions::from_slices(
            &[0.0, 0.0, 0.0],
            &[1013.25, 15.0, 40.0],
            &[36.0],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SwephError::AuxiliaryTooShort { name: "datm", required: 4, actual: 3, .. }
        ));

        let err = VisibilityConditions::from_slices(
            &[0.0, 0.0, 0.0],
            &[1013.25, 15.0, 40.0, 0.0],
            &[36.0, 1.0, 0.0, 0.0, 0.0],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SwephError::AuxiliaryTooShort { name: "dobs", required: 6, actual: 5, .. }
        ));
    }

    #[test]
    fn test_naked_eye_profile() {
        assert_eq!(
            ObserverProfile::naked_eye(36.0, 1.0).to_array(),
            [36.0, 1.0, 0.0, 0.0, 0.0, 0.0]
        );
    }
}
