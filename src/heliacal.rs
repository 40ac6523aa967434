//! # Heliacal phenomena and visibility
//!
//! Every operation here reads three auxiliary vectors: the observer site `dgeo` (3 values),
//! the atmosphere `datm` (4 values) and the observer description `dobs` (6 values). They are
//! validated together through [`VisibilityConditions::from_slices`] before the engine is
//! contacted; the first short vector is the one reported.
//!
//! Object names are copied into a 41-byte slot and the name as the engine left it is
//! returned with the result.
use serde::Serialize;

use crate::batch::serde_array;
use crate::buffers::ErrorBuffer;
use crate::constants::{Flag, JulianDay, Status, HELIACAL_WIDTH};
use crate::engine::{Engine, SkyGeometry};
use crate::site::VisibilityConditions;
use crate::sweph::Sweph;
use crate::sweph_errors::SwephError;

/// 50-slot heliacal result, with the object name when the call takes one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeliacalResult {
    #[serde(rename = "return")]
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(with = "serde_array")]
    pub dret: [f64; HELIACAL_WIDTH],
    pub serr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcusVisionis {
    #[serde(rename = "return")]
    pub status: Status,
    /// Topocentric arcus visionis (degrees)
    pub tav: f64,
    pub serr: String,
}

/// Host-side auxiliary vectors of a heliacal call, unchecked.
#[derive(Debug, Clone, Copy)]
pub struct Conditions<'a> {
    pub dgeo: &'a [f64],
    pub datm: &'a [f64],
    pub dobs: &'a [f64],
}

impl<'a> Conditions<'a> {
    pub fn new(dgeo: &'a [f64], datm: &'a [f64], dobs: &'a [f64]) -> Self {
        Conditions { dgeo, datm, dobs }
    }

    fn validate(&self) -> Result<VisibilityConditions, SwephError> {
        VisibilityConditions::from_slices(self.dgeo, self.datm, self.dobs)
    }
}

impl<E: Engine> Sweph<E> {
    /// Next heliacal event of `object` after `jd_start` (`swe_heliacal_ut`).
    ///
    /// Arguments
    /// -----------------
    /// * `jd_start`: start of the search (UT).
    /// * `conditions`: site, atmosphere and observer vectors.
    /// * `object`: planet name or fixed star.
    /// * `event_type`: heliacal rising, setting, evening first or morning last.
    /// * `helflag`: ephemeris and visibility model flags.
    ///
    /// Return
    /// ----------
    /// * Start, optimum and end of visibility in `dret[0..3]`, the object name as rewritten
    ///   by the engine, or a validation error.
    pub fn heliacal_ut(
        &self,
        jd_start: JulianDay,
        conditions: Conditions<'_>,
        object: &str,
        event_type: Flag,
        helflag: Flag,
    ) -> Result<HeliacalResult, SwephError> {
        let cond = conditions.validate()?;
        let mut guard = self.lock()?;
        let mut name = guard.name_buffer(object)?;
        let mut dret = [0.0; HELIACAL_WIDTH];
        let mut serr = ErrorBuffer::new();
        let status = guard.engine.heliacal_ut(
            jd_start, &cond, &mut name, event_type, helflag, &mut dret, &mut serr,
        );
        Ok(HeliacalResult {
            status,
            object: Some(name.to_string_lossy()),
            dret,
            serr: serr.to_string_lossy(),
        })
    }

    /// Limiting visual magnitude and the object's own magnitude (`swe_vis_limit_mag`).
    pub fn vis_limit_mag(
        &self,
        jd_ut: JulianDay,
        conditions: Conditions<'_>,
        object: &str,
        helflag: Flag,
    ) -> Result<HeliacalResult, SwephError> {
        let cond = conditions.validate()?;
        let mut guard = self.lock()?;
        let mut name = guard.name_buffer(object)?;
        let mut dret = [0.0; HELIACAL_WIDTH];
        let mut serr = ErrorBuffer::new();
        let status = guard
            .engine
            .vis_limit_mag(jd_ut, &cond, &mut name, helflag, &mut dret, &mut serr);
        Ok(HeliacalResult {
            status,
            object: Some(name.to_string_lossy()),
            dret,
            serr: serr.to_string_lossy(),
        })
    }

    /// Detailed circumstances of a heliacal event (`swe_heliacal_pheno_ut`).
    pub fn heliacal_pheno_ut(
        &self,
        jd_ut: JulianDay,
        conditions: Conditions<'_>,
        object: &str,
        event_type: Flag,
        helflag: Flag,
    ) -> Result<HeliacalResult, SwephError> {
        let cond = conditions.validate()?;
        let mut guard = self.lock()?;
        let mut name = guard.name_buffer(object)?;
        let mut darr = [0.0; HELIACAL_WIDTH];
        let mut serr = ErrorBuffer::new();
        let status = guard.engine.heliacal_pheno_ut(
            jd_ut, &cond, &mut name, event_type, helflag, &mut darr, &mut serr,
        );
        Ok(HeliacalResult {
            status,
            object: Some(name.to_string_lossy()),
            dret: darr,
            serr: serr.to_string_lossy(),
        })
    }

    /// Topocentric arcus visionis for an object of magnitude `mag` (`swe_topo_arcus_visionis`).
    pub fn topo_arcus_visionis(
        &self,
        jd_ut: JulianDay,
        conditions: Conditions<'_>,
        helflag: Flag,
        mag: f64,
        sky: SkyGeometry,
    ) -> Result<ArcusVisionis, SwephError> {
        let cond = conditions.validate()?;
        let mut tav = 0.0;
        let mut serr = ErrorBuffer::new();
        let status = self.lock()?.engine.topo_arcus_visionis(
            jd_ut, &cond, helflag, mag, &sky, &mut tav, &mut serr,
        );
        Ok(ArcusVisionis {
            status,
            tav,
            serr: serr.to_string_lossy(),
        })
    }

    /// Heliacal angle, arcus visionis and sky brightness terms (`swe_heliacal_angle`).
    ///
    /// `sky.alt_object` is ignored.
    pub fn heliacal_angle(
        &self,
        jd_ut: JulianDay,
        conditions: Conditions<'_>,
        helflag: Flag,
        mag: f64,
        sky: SkyGeometry,
    ) -> Result<HeliacalResult, SwephError> {
        let cond = conditions.validate()?;
        let mut dret = [0.0; HELIACAL_WIDTH];
        let mut serr = ErrorBuffer::new();
        let status = self.lock()?.engine.heliacal_angle(
            jd_ut, &cond, helflag, mag, &sky, &mut dret, &mut serr,
        );
        Ok(HeliacalResult {
            status,
            object: None,
            dret,
            serr: serr.to_string_lossy(),
        })
    }
}

#[cfg(test)]
mod heliacal_test {
    use super::*;
    use approx::assert_relative_eq;
    use crate::buffers::NameOverflow;
    use crate::engine::stub::StubEngine;

    const DGEO: [f64; 3] = [8.55, 47.37, 400.0];
    const DATM: [f64; 4] = [1013.25, 15.0, 40.0, 0.0];
    const DOBS: [f64; 6] = [36.0, 1.0, 0.0, 0.0, 0.0, 0.0];

    #[test]
    fn test_short_observer_is_refused() {
        let engine = StubEngine::new();
        let counter = engine.counter();
        let sweph = Sweph::new(engine);
        let err = sweph
            .heliacal_ut(
                2451545.0,
                Conditions::new(&DGEO, &DATM, &DOBS[..2]),
                "Venus",
                1,
                0,
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Observer description 'dobs' must have at least length 6 (got 2)"
        );
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_first_short_vector_is_reported() {
        let sweph = Sweph::new(StubEngine::new());
        let err = sweph
            .vis_limit_mag(2451545.0, Conditions::new(&DGEO[..1], &DATM[..1], &DOBS), "Venus", 0)
            .unwrap_err();
        assert!(matches!(err, SwephError::AuxiliaryTooShort { name: "dgeo", .. }));
    }

    #[test]
    fn test_star_name_is_surfaced() {
        let sweph = Sweph::new(StubEngine::new());
        let result = sweph
            .heliacal_ut(2451545.0, Conditions::new(&DGEO, &DATM, &DOBS), "sirius", 1, 0)
            .unwrap();
        assert_eq!(result.status, 0);
        assert_eq!(result.object.as_deref(), Some("Sirius,alCMa"));
        assert_eq!(result.dret[0], 2451646.0);
    }

    #[test]
    fn test_vis_limit_mag_reads_atmosphere() {
        let sweph = Sweph::new(StubEngine::new());
        let result = sweph
            .vis_limit_mag(2451545.0, Conditions::new(&DGEO, &DATM, &DOBS), "Spica", 0)
            .unwrap();
        assert_relative_eq!(result.dret[0], 6.1);
        assert_eq!(result.dret[7], 0.97);
    }

    #[test]
    fn test_long_object_name_rejected_by_policy() {
        let sweph = Sweph::new(StubEngine::new());
        sweph.set_name_overflow(NameOverflow::Reject).unwrap();
        let long = "x".repeat(60);
        let err = sweph
            .heliacal_pheno_ut(2451545.0, Conditions::new(&DGEO, &DATM, &DOBS), &long, 1, 0)
            .unwrap_err();
        assert!(matches!(err, SwephError::NameTooLong { capacity: 41, .. }));
    }

    #[test]
    fn test_angles() {
        let sweph = Sweph::new(StubEngine::new());
        let sky = SkyGeometry {
            azi_object: 120.0,
            alt_object: 20.0,
            azi_sun: 100.0,
            ..SkyGeometry::default()
        };
        let conditions = Conditions::new(&DGEO, &DATM, &DOBS);
        let tav = sweph
            .topo_arcus_visionis(2451545.0, conditions, 0, 1.0, sky)
            .unwrap();
        assert_eq!(tav.tav, 13.0);
        let angle = sweph
            .heliacal_angle(2451545.0, conditions, 0, 1.0, sky)
            .unwrap();
        assert_eq!(&angle.dret[..3], &[11.0, 20.0, 13.0]);
        assert_eq!(angle.object, None);
    }
}
