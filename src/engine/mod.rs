//! # Engine gateway
//!
//! [`Engine`] is the call boundary to the astronomical computation engine. It mirrors the
//! engine's procedural C contract one method per signature:
//!
//! ```text
//! status = engine_op(scalar inputs…, auxiliary vectors…, out numeric buffer, out serr buffer)
//! ```
//!
//! The gateway owns no batch state and interprets nothing: status codes, numeric buffers
//! and diagnostic strings are handed back exactly as the engine produced them.
//!
//! ## Buffer contract
//!
//! Every output argument is a fixed-size array whose length is the worst case of the
//! operation family (see [`crate::constants`]). Sizes are encoded in the method
//! signatures, so an undersized buffer cannot be passed at all.
//!
//! | Family | Width | Methods |
//! |---|---|---|
//! | horizontal coordinates | 3 | `azalt`, `azalt_rev` |
//! | body position | 6 | `calc`, `calc_ut`, `fixstar2`, `fixstar2_ut` |
//! | eclipse timings / refraction | 10 | `*_eclipse_when*`, `refrac_extended` |
//! | eclipse geographic path | 15 | `sol_eclipse_where` |
//! | attributes | 20 | `*_eclipse_*`, `pheno`, `pheno_ut` |
//! | house cusps | 37 | `houses_ex` |
//! | heliacal arrays | 50 | `heliacal_ut`, `vis_limit_mag`, `heliacal_pheno_ut`, `heliacal_angle` |
//!
//! ## Engine state
//!
//! The engine keeps process-wide configuration (ephemeris path, tidal acceleration,
//! topocentric site, sidereal mode). Implementations take `&mut self` everywhere so that a
//! single owner, [`Sweph`](crate::sweph::Sweph), can serialize every call behind one lock.
//!
//! ## Implementations
//!
//! - [`stub::StubEngine`] – deterministic in-process engine, used by tests and benches.
//! - `ffi::SwissEph` – the Swiss Ephemeris C library (feature `swisseph`).
use crate::buffers::{ErrorBuffer, NameBuffer, PathBuffer};
use crate::constants::{
    BodyId, Flag, JulianDay, Status, ASCMC_WIDTH, ATTRIBUTES_WIDTH, AZALT_WIDTH, CUSPS_WIDTH,
    ECLIPSE_PATH_WIDTH, ECLIPSE_TIMES_WIDTH, HELIACAL_WIDTH, POSITION_WIDTH, REFRACTION_WIDTH,
};
use crate::site::{GeoPosition, VisibilityConditions};

#[cfg(feature = "swisseph")]
pub mod ffi;
pub mod stub;

/// Angles of the object, Sun and Moon used by the arcus visionis family.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SkyGeometry {
    pub azi_object: f64,
    pub alt_object: f64,
    pub azi_sun: f64,
    pub azi_moon: f64,
    pub alt_moon: f64,
}

/// One method per engine signature. See the module documentation for the buffer contract.
#[allow(clippy::too_many_arguments)]
pub trait Engine {
    // ---------------------------------------------------------------------------------------------
    // Planets and fixed stars
    // ---------------------------------------------------------------------------------------------

    fn calc(
        &mut self,
        tjd_et: JulianDay,
        ipl: BodyId,
        iflag: Flag,
        xx: &mut [f64; POSITION_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status;

    fn calc_ut(
        &mut self,
        tjd_ut: JulianDay,
        ipl: BodyId,
        iflag: Flag,
        xx: &mut [f64; POSITION_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status;

    /// `star` is an input-output slot: the engine may rewrite it with the catalog name.
    fn fixstar2(
        &mut self,
        star: &mut NameBuffer,
        tjd_et: JulianDay,
        iflag: Flag,
        xx: &mut [f64; POSITION_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status;

    fn fixstar2_ut(
        &mut self,
        star: &mut NameBuffer,
        tjd_ut: JulianDay,
        iflag: Flag,
        xx: &mut [f64; POSITION_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status;

    fn fixstar2_mag(&mut self, star: &mut NameBuffer, mag: &mut f64, serr: &mut ErrorBuffer)
        -> Status;

    fn get_planet_name(&mut self, ipl: BodyId, name: &mut NameBuffer);

    // ---------------------------------------------------------------------------------------------
    // Time
    // ---------------------------------------------------------------------------------------------

    fn julday(&mut self, year: i32, month: i32, day: i32, hour: f64, gregflag: i32) -> JulianDay;

    /// Monday = 0, …, Sunday = 6
    fn day_of_week(&mut self, jd: JulianDay) -> i32;

    fn deltat(&mut self, tjd_ut: JulianDay) -> f64;

    fn deltat_ex(&mut self, tjd_ut: JulianDay, ephe_flag: Flag, serr: &mut ErrorBuffer) -> f64;

    // ---------------------------------------------------------------------------------------------
    // Eclipses
    // ---------------------------------------------------------------------------------------------

    fn sol_eclipse_when_loc(
        &mut self,
        tjd_start: JulianDay,
        ifl: Flag,
        geopos: &GeoPosition,
        tret: &mut [f64; ECLIPSE_TIMES_WIDTH],
        attr: &mut [f64; ATTRIBUTES_WIDTH],
        backward: bool,
        serr: &mut ErrorBuffer,
    ) -> Status;

    fn sol_eclipse_when_glob(
        &mut self,
        tjd_start: JulianDay,
        ifl: Flag,
        ifltype: Flag,
        tret: &mut [f64; ECLIPSE_TIMES_WIDTH],
        backward: bool,
        serr: &mut ErrorBuffer,
    ) -> Status;

    fn sol_eclipse_where(
        &mut self,
        tjd_ut: JulianDay,
        ifl: Flag,
        geopos: &mut [f64; ECLIPSE_PATH_WIDTH],
        attr: &mut [f64; ATTRIBUTES_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status;

    fn sol_eclipse_how(
        &mut self,
        tjd_ut: JulianDay,
        ifl: Flag,
        geopos: &GeoPosition,
        attr: &mut [f64; ATTRIBUTES_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status;

    fn lun_eclipse_when_loc(
        &mut self,
        tjd_start: JulianDay,
        ifl: Flag,
        geopos: &GeoPosition,
        tret: &mut [f64; ECLIPSE_TIMES_WIDTH],
        attr: &mut [f64; ATTRIBUTES_WIDTH],
        backward: bool,
        serr: &mut ErrorBuffer,
    ) -> Status;

    fn lun_eclipse_when(
        &mut self,
        tjd_start: JulianDay,
        ifl: Flag,
        ifltype: Flag,
        tret: &mut [f64; ECLIPSE_TIMES_WIDTH],
        backward: bool,
        serr: &mut ErrorBuffer,
    ) -> Status;

    fn lun_eclipse_how(
        &mut self,
        tjd_ut: JulianDay,
        ifl: Flag,
        geopos: &GeoPosition,
        attr: &mut [f64; ATTRIBUTES_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status;

    // ---------------------------------------------------------------------------------------------
    // Horizon, refraction, phenomena
    // ---------------------------------------------------------------------------------------------

    fn rise_trans_true_hor(
        &mut self,
        tjd_ut: JulianDay,
        ipl: BodyId,
        star: &mut NameBuffer,
        ephe_flag: Flag,
        rsmi: Flag,
        geopos: &GeoPosition,
        atpress: f64,
        attemp: f64,
        horhgt: f64,
        tret: &mut f64,
        serr: &mut ErrorBuffer,
    ) -> Status;

    fn pheno(
        &mut self,
        tjd_et: JulianDay,
        ipl: BodyId,
        iflag: Flag,
        attr: &mut [f64; ATTRIBUTES_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status;

    fn pheno_ut(
        &mut self,
        tjd_ut: JulianDay,
        ipl: BodyId,
        iflag: Flag,
        attr: &mut [f64; ATTRIBUTES_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status;

    fn azalt(
        &mut self,
        tjd_ut: JulianDay,
        calc_flag: Flag,
        geopos: &GeoPosition,
        atpress: f64,
        attemp: f64,
        xin: &[f64; 3],
        xaz: &mut [f64; AZALT_WIDTH],
    );

    fn azalt_rev(
        &mut self,
        tjd_ut: JulianDay,
        calc_flag: Flag,
        geopos: &GeoPosition,
        xin: &[f64; 2],
        xout: &mut [f64; AZALT_WIDTH],
    );

    fn refrac_extended(
        &mut self,
        inalt: f64,
        geoalt: f64,
        atpress: f64,
        attemp: f64,
        lapse_rate: f64,
        calc_flag: Flag,
        dret: &mut [f64; REFRACTION_WIDTH],
    ) -> f64;

    // ---------------------------------------------------------------------------------------------
    // Heliacal phenomena
    // ---------------------------------------------------------------------------------------------

    fn heliacal_ut(
        &mut self,
        tjd_start: JulianDay,
        conditions: &VisibilityConditions,
        object: &mut NameBuffer,
        event_type: Flag,
        helflag: Flag,
        dret: &mut [f64; HELIACAL_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status;

    fn vis_limit_mag(
        &mut self,
        tjd_ut: JulianDay,
        conditions: &VisibilityConditions,
        object: &mut NameBuffer,
        helflag: Flag,
        dret: &mut [f64; HELIACAL_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status;

    fn heliacal_pheno_ut(
        &mut self,
        tjd_ut: JulianDay,
        conditions: &VisibilityConditions,
        object: &mut NameBuffer,
        event_type: Flag,
        helflag: Flag,
        darr: &mut [f64; HELIACAL_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status;

    fn topo_arcus_visionis(
        &mut self,
        tjd_ut: JulianDay,
        conditions: &VisibilityConditions,
        helflag: Flag,
        mag: f64,
        sky: &SkyGeometry,
        tav: &mut f64,
        serr: &mut ErrorBuffer,
    ) -> Status;

    /// `sky.alt_object` is not read by this signature.
    fn heliacal_angle(
        &mut self,
        tjd_ut: JulianDay,
        conditions: &VisibilityConditions,
        helflag: Flag,
        mag: f64,
        sky: &SkyGeometry,
        dret: &mut [f64; HELIACAL_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status;

    // ---------------------------------------------------------------------------------------------
    // Houses
    // ---------------------------------------------------------------------------------------------

    fn houses_ex(
        &mut self,
        tjd_ut: JulianDay,
        iflag: Flag,
        geolat: f64,
        geolon: f64,
        hsys: u8,
        cusps: &mut [f64; CUSPS_WIDTH],
        ascmc: &mut [f64; ASCMC_WIDTH],
    ) -> Status;

    // ---------------------------------------------------------------------------------------------
    // Process-wide configuration
    // ---------------------------------------------------------------------------------------------

    /// `None` restores the engine's default search path.
    fn set_ephe_path(&mut self, path: Option<&PathBuffer>);

    fn set_jpl_file(&mut self, file_name: &PathBuffer);

    fn set_tid_acc(&mut self, t_acc: f64);

    fn get_tid_acc(&mut self) -> f64;

    fn set_delta_t_userdef(&mut self, delta_t: f64);

    fn set_topo(&mut self, geolon: f64, geolat: f64, altitude: f64);

    fn set_sid_mode(&mut self, sid_mode: i32, t0: f64, ayan_t0: f64);

    fn version(&mut self, out: &mut PathBuffer);

    fn get_library_path(&mut self, out: &mut PathBuffer);

    /// Release files and caches held by the engine.
    fn close(&mut self);
}
