//! # Eclipses, phenomena and horizon coordinates
//!
//! Scalar entry points around the eclipse and phenomenon families. Each one validates its
//! geographic position (at least 3 values) before the engine is contacted, allocates
//! zeroed output arrays of the family width and returns the engine status and diagnostic
//! untouched.
//!
//! | Operation | Outputs |
//! |---|---|
//! | [`Sweph::sol_eclipse_when_loc`], [`Sweph::lun_eclipse_when_loc`] | `tret[10]`, `attr[20]` |
//! | [`Sweph::sol_eclipse_when_glob`], [`Sweph::lun_eclipse_when`] | `tret[10]` |
//! | [`Sweph::sol_eclipse_where`] | `geopos[15]`, `attr[20]` |
//! | [`Sweph::sol_eclipse_how`], [`Sweph::lun_eclipse_how`], [`Sweph::pheno`], [`Sweph::pheno_ut`] | `attr[20]` |
//! | [`Sweph::rise_trans_true_hor`] | `tret`, rewritten star name |
//! | [`Sweph::azalt`], [`Sweph::azalt_rev`] | `[3]` |
//! | [`Sweph::refrac_extended`] | value, `dret[10]` |
use serde::Serialize;

use crate::batch::serde_array;
use crate::buffers::ErrorBuffer;
use crate::constants::{
    BodyId, Flag, JulianDay, Status, ATTRIBUTES_WIDTH, AZALT_WIDTH, ECLIPSE_PATH_WIDTH,
    ECLIPSE_TIMES_WIDTH, REFRACTION_WIDTH,
};
use crate::engine::Engine;
use crate::site::{check_len, take, GeoPosition};
use crate::sweph::Sweph;
use crate::sweph_errors::SwephError;

/// Local eclipse search result: timings and attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EclipseEvent {
    #[serde(rename = "return")]
    pub status: Status,
    #[serde(with = "serde_array")]
    pub tret: [f64; ECLIPSE_TIMES_WIDTH],
    #[serde(with = "serde_array")]
    pub attr: [f64; ATTRIBUTES_WIDTH],
    pub serr: String,
}

/// Global eclipse search result: timings only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EclipseTimes {
    #[serde(rename = "return")]
    pub status: Status,
    #[serde(with = "serde_array")]
    pub tret: [f64; ECLIPSE_TIMES_WIDTH],
    pub serr: String,
}

/// Attribute vector of an eclipse circumstance or a planetary phenomenon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attributes {
    #[serde(rename = "return")]
    pub status: Status,
    #[serde(with = "serde_array")]
    pub attr: [f64; ATTRIBUTES_WIDTH],
    pub serr: String,
}

/// Geographic position of maximum solar eclipse and its attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EclipsePath {
    #[serde(rename = "return")]
    pub status: Status,
    #[serde(with = "serde_array")]
    pub geopos: [f64; ECLIPSE_PATH_WIDTH],
    #[serde(with = "serde_array")]
    pub attr: [f64; ATTRIBUTES_WIDTH],
    pub serr: String,
}

/// Rise, set or transit time. `star` is the name as the engine left it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiseTransit {
    #[serde(rename = "return")]
    pub status: Status,
    pub star: String,
    pub tret: JulianDay,
    pub serr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Refraction {
    #[serde(rename = "return")]
    pub value: f64,
    #[serde(with = "serde_array")]
    pub dret: [f64; REFRACTION_WIDTH],
}

/// Atmospheric parameters of the rise/transit search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizon {
    /// Pressure (hPa)
    pub atpress: f64,
    /// Temperature (°C)
    pub attemp: f64,
    /// Height of the local horizon (degrees)
    pub horhgt: f64,
}

impl<E: Engine> Sweph<E> {
    /// Next (or previous) solar eclipse visible from `geopos` (`swe_sol_eclipse_when_loc`).
    pub fn sol_eclipse_when_loc(
        &self,
        jd_start: JulianDay,
        ephe_flag: Flag,
        geopos: &[f64],
        backward: bool,
    ) -> Result<EclipseEvent, SwephError> {
        let geo = GeoPosition::from_slice("geopos", geopos)?;
        let mut tret = [0.0; ECLIPSE_TIMES_WIDTH];
        let mut attr = [0.0; ATTRIBUTES_WIDTH];
        let mut serr = ErrorBuffer::new();
        let status = self.lock()?.engine.sol_eclipse_when_loc(
            jd_start, ephe_flag, &geo, &mut tret, &mut attr, backward, &mut serr,
        );
        Ok(EclipseEvent {
            status,
            tret,
            attr,
            serr: serr.to_string_lossy(),
        })
    }

    /// Next (or previous) solar eclipse anywhere on Earth (`swe_sol_eclipse_when_glob`).
    ///
    /// `ifltype` restricts the eclipse type; 0 accepts any.
    pub fn sol_eclipse_when_glob(
        &self,
        jd_start: JulianDay,
        ephe_flag: Flag,
        ifltype: Flag,
        backward: bool,
    ) -> Result<EclipseTimes, SwephError> {
        let mut tret = [0.0; ECLIPSE_TIMES_WIDTH];
        let mut serr = ErrorBuffer::new();
        let status = self.lock()?.engine.sol_eclipse_when_glob(
            jd_start, ephe_flag, ifltype, &mut tret, backward, &mut serr,
        );
        Ok(EclipseTimes {
            status,
            tret,
            serr: serr.to_string_lossy(),
        })
    }

    /// Where the central line of a solar eclipse lies at `jd_ut` (`swe_sol_eclipse_where`).
    pub fn sol_eclipse_where(
        &self,
        jd_ut: JulianDay,
        ephe_flag: Flag,
    ) -> Result<EclipsePath, SwephError> {
        let mut geopos = [0.0; ECLIPSE_PATH_WIDTH];
        let mut attr = [0.0; ATTRIBUTES_WIDTH];
        let mut serr = ErrorBuffer::new();
        let status = self
            .lock()?
            .engine
            .sol_eclipse_where(jd_ut, ephe_flag, &mut geopos, &mut attr, &mut serr);
        Ok(EclipsePath {
            status,
            geopos,
            attr,
            serr: serr.to_string_lossy(),
        })
    }

    /// Circumstances of a solar eclipse at `geopos` and `jd_ut` (`swe_sol_eclipse_how`).
    pub fn sol_eclipse_how(
        &self,
        jd_ut: JulianDay,
        ephe_flag: Flag,
        geopos: &[f64],
    ) -> Result<Attributes, SwephError> {
        let geo = GeoPosition::from_slice("geopos", geopos)?;
        let mut attr = [0.0; ATTRIBUTES_WIDTH];
        let mut serr = ErrorBuffer::new();
        let status = self
            .lock()?
            .engine
            .sol_eclipse_how(jd_ut, ephe_flag, &geo, &mut attr, &mut serr);
        Ok(Attributes {
            status,
            attr,
            serr: serr.to_string_lossy(),
        })
    }

    /// Next (or previous) lunar eclipse observable from `geopos` (`swe_lun_eclipse_when_loc`).
    pub fn lun_eclipse_when_loc(
        &self,
        jd_start: JulianDay,
        ephe_flag: Flag,
        geopos: &[f64],
        backward: bool,
    ) -> Result<EclipseEvent, SwephError> {
        let geo = GeoPosition::from_slice("geopos", geopos)?;
        let mut tret = [0.0; ECLIPSE_TIMES_WIDTH];
        let mut attr = [0.0; ATTRIBUTES_WIDTH];
        let mut serr = ErrorBuffer::new();
        let status = self.lock()?.engine.lun_eclipse_when_loc(
            jd_start, ephe_flag, &geo, &mut tret, &mut attr, backward, &mut serr,
        );
        Ok(EclipseEvent {
            status,
            tret,
            attr,
            serr: serr.to_string_lossy(),
        })
    }

    /// Next (or previous) lunar eclipse (`swe_lun_eclipse_when`).
    pub fn lun_eclipse_when(
        &self,
        jd_start: JulianDay,
        ephe_flag: Flag,
        ifltype: Flag,
        backward: bool,
    ) -> Result<EclipseTimes, SwephError> {
        let mut tret = [0.0; ECLIPSE_TIMES_WIDTH];
        let mut serr = ErrorBuffer::new();
        let status = self.lock()?.engine.lun_eclipse_when(
            jd_start, ephe_flag, ifltype, &mut tret, backward, &mut serr,
        );
        Ok(EclipseTimes {
            status,
            tret,
            serr: serr.to_string_lossy(),
        })
    }

    /// Circumstances of a lunar eclipse at `jd_ut` (`swe_lun_eclipse_how`).
    pub fn lun_eclipse_how(
        &self,
        jd_ut: JulianDay,
        ephe_flag: Flag,
        geopos: &[f64],
    ) -> Result<Attributes, SwephError> {
        let geo = GeoPosition::from_slice("geopos", geopos)?;
        let mut attr = [0.0; ATTRIBUTES_WIDTH];
        let mut serr = ErrorBuffer::new();
        let status = self
            .lock()?
            .engine
            .lun_eclipse_how(jd_ut, ephe_flag, &geo, &mut attr, &mut serr);
        Ok(Attributes {
            status,
            attr,
            serr: serr.to_string_lossy(),
        })
    }

    /// Rise, set or meridian transit of a body or star (`swe_rise_trans_true_hor`).
    ///
    /// Arguments
    /// -----------------
    /// * `ipl`: body identifier, ignored by the engine when `starname` is not empty.
    /// * `starname`: fixed star name, or `""` for a body.
    /// * `rsmi`: event selector (rise, set, upper or lower transit) and its modifiers.
    /// * `geopos`: longitude, latitude, height; at least 3 values.
    /// * `horizon`: pressure, temperature and local horizon height.
    #[allow(clippy::too_many_arguments)]
    pub fn rise_trans_true_hor(
        &self,
        jd_ut: JulianDay,
        ipl: BodyId,
        starname: &str,
        ephe_flag: Flag,
        rsmi: Flag,
        geopos: &[f64],
        horizon: Horizon,
    ) -> Result<RiseTransit, SwephError> {
        let geo = GeoPosition::from_slice("geopos", geopos)?;
        let mut guard = self.lock()?;
        let mut star = guard.name_buffer(starname)?;
        let mut tret = 0.0;
        let mut serr = ErrorBuffer::new();
        let status = guard.engine.rise_trans_true_hor(
            jd_ut,
            ipl,
            &mut star,
            ephe_flag,
            rsmi,
            &geo,
            horizon.atpress,
            horizon.attemp,
            horizon.horhgt,
            &mut tret,
            &mut serr,
        );
        Ok(RiseTransit {
            status,
            star: star.to_string_lossy(),
            tret,
            serr: serr.to_string_lossy(),
        })
    }

    /// Phase angle, phase, elongation, apparent diameter and magnitude (`swe_pheno`).
    pub fn pheno(&self, jd_et: JulianDay, ipl: BodyId, iflag: Flag) -> Result<Attributes, SwephError> {
        let mut attr = [0.0; ATTRIBUTES_WIDTH];
        let mut serr = ErrorBuffer::new();
        let status = self
            .lock()?
            .engine
            .pheno(jd_et, ipl, iflag, &mut attr, &mut serr);
        Ok(Attributes {
            status,
            attr,
            serr: serr.to_string_lossy(),
        })
    }

    /// Same as [`Sweph::pheno`] for a universal-time date (`swe_pheno_ut`).
    pub fn pheno_ut(
        &self,
        jd_ut: JulianDay,
        ipl: BodyId,
        iflag: Flag,
    ) -> Result<Attributes, SwephError> {
        let mut attr = [0.0; ATTRIBUTES_WIDTH];
        let mut serr = ErrorBuffer::new();
        let status = self
            .lock()?
            .engine
            .pheno_ut(jd_ut, ipl, iflag, &mut attr, &mut serr);
        Ok(Attributes {
            status,
            attr,
            serr: serr.to_string_lossy(),
        })
    }

    /// Ecliptic or equatorial coordinates to azimuth and altitudes (`swe_azalt`).
    ///
    /// `xin` needs at least 3 values (longitude, latitude, distance).
    pub fn azalt(
        &self,
        jd_ut: JulianDay,
        coord_flag: Flag,
        geopos: &[f64],
        atpress: f64,
        attemp: f64,
        xin: &[f64],
    ) -> Result<[f64; AZALT_WIDTH], SwephError> {
        let geo = GeoPosition::from_slice("geopos", geopos)?;
        let xin = coordinates::<3>("xin", "Input coordinates", xin)?;
        let mut xaz = [0.0; AZALT_WIDTH];
        self.lock()?
            .engine
            .azalt(jd_ut, coord_flag, &geo, atpress, attemp, &xin, &mut xaz);
        Ok(xaz)
    }

    /// Azimuth and true altitude back to ecliptic or equatorial coordinates (`swe_azalt_rev`).
    ///
    /// `xin` needs at least 2 values (azimuth, true altitude).
    pub fn azalt_rev(
        &self,
        jd_ut: JulianDay,
        coord_flag: Flag,
        geopos: &[f64],
        xin: &[f64],
    ) -> Result<[f64; AZALT_WIDTH], SwephError> {
        let geo = GeoPosition::from_slice("geopos", geopos)?;
        let xin = coordinates::<2>("xin", "Horizontal coordinates", xin)?;
        let mut xout = [0.0; AZALT_WIDTH];
        self.lock()?
            .engine
            .azalt_rev(jd_ut, coord_flag, &geo, &xin, &mut xout);
        Ok(xout)
    }

    /// Refraction for an observer at `geoheight` meters (`swe_refrac_extended`).
    pub fn refrac_extended(
        &self,
        in_alt: f64,
        geoheight: f64,
        atpress: f64,
        attemp: f64,
        lapse_rate: f64,
        calc_flag: Flag,
    ) -> Result<Refraction, SwephError> {
        let mut dret = [0.0; REFRACTION_WIDTH];
        let value = self.lock()?.engine.refrac_extended(
            in_alt, geoheight, atpress, attemp, lapse_rate, calc_flag, &mut dret,
        );
        Ok(Refraction { value, dret })
    }
}

fn coordinates<const N: usize>(
    name: &'static str,
    description: &'static str,
    values: &[f64],
) -> Result<[f64; N], SwephError> {
    check_len(values, name, description, N)?;
    Ok(take(values))
}
