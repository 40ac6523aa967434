//! # House cusps
//!
//! `swe_houses_ex` fills a 37-slot cusp array (slot 0 unused, 12 cusps for most systems,
//! 36 sectors for Gauquelin) and a 10-slot array of angles: ascendant, MC, ARMC, vertex,
//! equatorial ascendant and the co-ascendants and polar ascendant.
use serde::Serialize;

use crate::batch::serde_array;
use crate::constants::{Degree, Flag, JulianDay, Status, ASCMC_WIDTH, CUSPS_WIDTH};
use crate::engine::Engine;
use crate::sweph::Sweph;
use crate::sweph_errors::SwephError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseCusps {
    #[serde(rename = "return")]
    pub status: Status,
    #[serde(with = "serde_array")]
    pub cusps: [f64; CUSPS_WIDTH],
    #[serde(with = "serde_array")]
    pub ascmc: [f64; ASCMC_WIDTH],
}

impl HouseCusps {
    pub fn ascendant(&self) -> Degree {
        self.ascmc[0]
    }

    pub fn mc(&self) -> Degree {
        self.ascmc[1]
    }
}

impl<E: Engine> Sweph<E> {
    /// House cusps and angles for a site and a UT date.
    ///
    /// Arguments
    /// -----------------
    /// * `jd_ut`: Julian day, universal time.
    /// * `iflag`: 0, or sidereal / radians flags.
    /// * `geolat`, `geolon`: site latitude and longitude in degrees.
    /// * `hsys`: house system letter (`'P'` Placidus, `'K'` Koch, `'G'` Gauquelin, ...).
    ///
    /// Return
    /// ----------
    /// * The engine status with both arrays. An unknown letter is reported by the engine
    ///   through a negative status; a non-ASCII character never reaches it and yields
    ///   [`SwephError::InvalidHouseSystem`].
    pub fn houses_ex(
        &self,
        jd_ut: JulianDay,
        iflag: Flag,
        geolat: Degree,
        geolon: Degree,
        hsys: char,
    ) -> Result<HouseCusps, SwephError> {
        if !hsys.is_ascii() {
            return Err(SwephError::InvalidHouseSystem(hsys));
        }
        let mut cusps = [0.0; CUSPS_WIDTH];
        let mut ascmc = [0.0; ASCMC_WIDTH];
        let status = self.lock()?.engine.houses_ex(
            jd_ut,
            iflag,
            geolat,
            geolon,
            hsys as u8,
            &mut cusps,
            &mut ascmc,
        );
        if status < 0 {
            tracing::debug!(%hsys, status, "house calculation failed");
        }
        Ok(HouseCusps {
            status,
            cusps,
            ascmc,
        })
    }
}

#[cfg(test)]
mod houses_test {
    use super::*;
    use crate::constants::ERR;
    use crate::engine::stub::StubEngine;

    #[test]
    fn test_placidus_fills_twelve_cusps() {
        let sweph = Sweph::new(StubEngine::new());
        let houses = sweph.houses_ex(2451545.0, 0, 47.37, 8.55, 'P').unwrap();
        assert_eq!(houses.status, 0);
        assert_eq!(houses.cusps[0], 0.0);
        assert_eq!(houses.cusps[1], houses.ascendant());
        assert_ne!(houses.cusps[12], 0.0);
        assert_eq!(houses.cusps[13], 0.0);
    }

    #[test]
    fn test_gauquelin_fills_thirty_six_sectors() {
        let sweph = Sweph::new(StubEngine::new());
        let houses = sweph.houses_ex(2451545.0, 0, 47.37, 8.55, 'G').unwrap();
        assert!(houses.cusps[1..=36].iter().any(|c| *c != 0.0));
        assert_eq!(houses.cusps.len(), 37);
    }

    #[test]
    fn test_house_system_letters() {
        let engine = StubEngine::new();
        let counter = engine.counter();
        let sweph = Sweph::new(engine);
        assert_eq!(
            sweph.houses_ex(2451545.0, 0, 0.0, 0.0, 'é').unwrap_err(),
            SwephError::InvalidHouseSystem('é')
        );
        assert_eq!(counter.get(), 0);
        assert_eq!(sweph.houses_ex(2451545.0, 0, 0.0, 0.0, 'Z').unwrap().status, ERR);
    }
}
