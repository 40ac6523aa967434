//! # Swiss Ephemeris C library binding
//!
//! Raw declarations of the `swe_*` functions and [`SwissEph`], the [`Engine`] implementation
//! that forwards to them. Enabled with the `swisseph` feature; the system library `libswe`
//! must be available at link time.
//!
//! The C library keeps all of its configuration in process-wide globals. [`SwissEph`] is
//! therefore a claimed singleton: [`SwissEph::acquire`] hands out at most one live handle
//! per process, and dropping it calls `swe_close` and releases the claim.
use std::ffi::{c_char, c_double, c_int};
use std::sync::atomic::{AtomicBool, Ordering};

use super::{Engine, SkyGeometry};
use crate::buffers::{ErrorBuffer, NameBuffer, PathBuffer};
use crate::constants::{
    BodyId, Flag, JulianDay, Status, ASCMC_WIDTH, ATTRIBUTES_WIDTH, AZALT_WIDTH, CUSPS_WIDTH,
    ECLIPSE_PATH_WIDTH, ECLIPSE_TIMES_WIDTH, HELIACAL_WIDTH, POSITION_WIDTH, REFRACTION_WIDTH,
};
use crate::site::{GeoPosition, VisibilityConditions};
use crate::sweph_errors::SwephError;

#[link(name = "swe")]
extern "C" {
    fn swe_calc(tjd: c_double, ipl: c_int, iflag: i32, xx: *mut c_double, serr: *mut c_char)
        -> i32;
    fn swe_calc_ut(
        tjd_ut: c_double,
        ipl: i32,
        iflag: i32,
        xx: *mut c_double,
        serr: *mut c_char,
    ) -> i32;
    fn swe_fixstar2(
        star: *mut c_char,
        tjd: c_double,
        iflag: i32,
        xx: *mut c_double,
        serr: *mut c_char,
    ) -> i32;
    fn swe_fixstar2_ut(
        star: *mut c_char,
        tjd_ut: c_double,
        iflag: i32,
        xx: *mut c_double,
        serr: *mut c_char,
    ) -> i32;
    fn swe_fixstar2_mag(star: *mut c_char, mag: *mut c_double, serr: *mut c_char) -> i32;
    fn swe_get_planet_name(ipl: c_int, spname: *mut c_char) -> *mut c_char;

    fn swe_julday(year: c_int, month: c_int, day: c_int, hour: c_double, gregflag: c_int)
        -> c_double;
    fn swe_day_of_week(jd: c_double) -> c_int;
    fn swe_deltat(tjd: c_double) -> c_double;
    fn swe_deltat_ex(tjd: c_double, iflag: i32, serr: *mut c_char) -> c_double;

    fn swe_sol_eclipse_when_loc(
        tjd_start: c_double,
        ifl: i32,
        geopos: *mut c_double,
        tret: *mut c_double,
        attr: *mut c_double,
        backward: i32,
        serr: *mut c_char,
    ) -> i32;
    fn swe_sol_eclipse_when_glob(
        tjd_start: c_double,
        ifl: i32,
        ifltype: i32,
        tret: *mut c_double,
        backward: i32,
        serr: *mut c_char,
    ) -> i32;
    fn swe_sol_eclipse_where(
        tjd: c_double,
        ifl: i32,
        geopos: *mut c_double,
        attr: *mut c_double,
        serr: *mut c_char,
    ) -> i32;
    fn swe_sol_eclipse_how(
        tjd: c_double,
        ifl: i32,
        geopos: *mut c_double,
        attr: *mut c_double,
        serr: *mut c_char,
    ) -> i32;
    fn swe_lun_eclipse_when_loc(
        tjd_start: c_double,
        ifl: i32,
        geopos: *mut c_double,
        tret: *mut c_double,
        attr: *mut c_double,
        backward: i32,
        serr: *mut c_char,
    ) -> i32;
    fn swe_lun_eclipse_when(
        tjd_start: c_double,
        ifl: i32,
        ifltype: i32,
        tret: *mut c_double,
        backward: i32,
        serr: *mut c_char,
    ) -> i32;
    fn swe_lun_eclipse_how(
        tjd_ut: c_double,
        ifl: i32,
        geopos: *mut c_double,
        attr: *mut c_double,
        serr: *mut c_char,
    ) -> i32;

    fn swe_rise_trans_true_hor(
        tjd_ut: c_double,
        ipl: i32,
        starname: *mut c_char,
        epheflag: i32,
        rsmi: i32,
        geopos: *mut c_double,
        atpress: c_double,
        attemp: c_double,
        horhgt: c_double,
        tret: *mut c_double,
        serr: *mut c_char,
    ) -> i32;
    fn swe_pheno(tjd: c_double, ipl: i32, iflag: i32, attr: *mut c_double, serr: *mut c_char)
        -> i32;
    fn swe_pheno_ut(
        tjd_ut: c_double,
        ipl: i32,
        iflag: i32,
        attr: *mut c_double,
        serr: *mut c_char,
    ) -> i32;
    fn swe_azalt(
        tjd_ut: c_double,
        calc_flag: i32,
        geopos: *mut c_double,
        atpress: c_double,
        attemp: c_double,
        xin: *mut c_double,
        xaz: *mut c_double,
    );
    fn swe_azalt_rev(
        tjd_ut: c_double,
        calc_flag: i32,
        geopos: *mut c_double,
        xin: *mut c_double,
        xout: *mut c_double,
    );
    fn swe_refrac_extended(
        inalt: c_double,
        geoalt: c_double,
        atpress: c_double,
        attemp: c_double,
        lapse_rate: c_double,
        calc_flag: i32,
        dret: *mut c_double,
    ) -> c_double;

    fn swe_heliacal_ut(
        tjdstart_ut: c_double,
        geopos: *mut c_double,
        datm: *mut c_double,
        dobs: *mut c_double,
        object_name: *mut c_char,
        type_event: i32,
        iflag: i32,
        dret: *mut c_double,
        serr: *mut c_char,
    ) -> i32;
    fn swe_vis_limit_mag(
        tjdut: c_double,
        dgeo: *mut c_double,
        datm: *mut c_double,
        dobs: *mut c_double,
        object_name: *mut c_char,
        helflag: i32,
        dret: *mut c_double,
        serr: *mut c_char,
    ) -> i32;
    fn swe_heliacal_pheno_ut(
        tjd_ut: c_double,
        geopos: *mut c_double,
        datm: *mut c_double,
        dobs: *mut c_double,
        object_name: *mut c_char,
        type_event: i32,
        helflag: i32,
        darr: *mut c_double,
        serr: *mut c_char,
    ) -> i32;
    fn swe_topo_arcus_visionis(
        tjdut: c_double,
        dgeo: *mut c_double,
        datm: *mut c_double,
        dobs: *mut c_double,
        helflag: i32,
        mag: c_double,
        azi_obj: c_double,
        alt_obj: c_double,
        azi_sun: c_double,
        azi_moon: c_double,
        alt_moon: c_double,
        dret: *mut c_double,
        serr: *mut c_char,
    ) -> i32;
    fn swe_heliacal_angle(
        tjdut: c_double,
        dgeo: *mut c_double,
        datm: *mut c_double,
        dobs: *mut c_double,
        helflag: i32,
        mag: c_double,
        azi_obj: c_double,
        azi_sun: c_double,
        azi_moon: c_double,
        alt_moon: c_double,
        dret: *mut c_double,
        serr: *mut c_char,
    ) -> i32;

    fn swe_houses_ex(
        tjd_ut: c_double,
        iflag: i32,
        geolat: c_double,
        geolon: c_double,
        hsys: c_int,
        cusps: *mut c_double,
        ascmc: *mut c_double,
    ) -> c_int;

    fn swe_set_ephe_path(path: *const c_char);
    fn swe_set_jpl_file(fname: *const c_char);
    fn swe_set_tid_acc(t_acc: c_double);
    fn swe_get_tid_acc() -> c_double;
    fn swe_set_delta_t_userdef(dt: c_double);
    fn swe_set_topo(geolon: c_double, geolat: c_double, geoalt: c_double);
    fn swe_set_sid_mode(sid_mode: i32, t0: c_double, ayan_t0: c_double);
    fn swe_version(s: *mut c_char) -> *mut c_char;
    fn swe_get_library_path(s: *mut c_char) -> *mut c_char;
    fn swe_close();
}

static CLAIMED: AtomicBool = AtomicBool::new(false);

/// Handle on the process-wide Swiss Ephemeris library.
#[derive(Debug)]
pub struct SwissEph {
    _claim: (),
}

impl SwissEph {
    /// Claim the library for this process.
    ///
    /// Return
    /// ----------
    /// * The handle, or [`SwephError::EngineUnavailable`] while another handle is alive.
    pub fn acquire() -> Result<Self, SwephError> {
        CLAIMED
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                SwephError::EngineUnavailable(
                    "the Swiss Ephemeris library is already owned by another handle".into(),
                )
            })?;
        Ok(SwissEph { _claim: () })
    }
}

impl Drop for SwissEph {
    fn drop(&mut self) {
        // SAFETY: no other handle exists, so no call can be in flight.
        unsafe { swe_close() };
        CLAIMED.store(false, Ordering::Release);
    }
}

// Every pointer below comes from a Rust array whose length is the engine's documented
// worst case for that argument, or from a NUL-terminated `CharBuffer`; all of them stay
// borrowed for the whole call and the engine keeps none of them afterwards.
impl Engine for SwissEph {
    fn calc(
        &mut self,
        tjd_et: JulianDay,
        ipl: BodyId,
        iflag: Flag,
        xx: &mut [f64; POSITION_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status {
        unsafe { swe_calc(tjd_et, ipl, iflag, xx.as_mut_ptr(), serr.as_mut_ptr()) }
    }

    fn calc_ut(
        &mut self,
        tjd_ut: JulianDay,
        ipl: BodyId,
        iflag: Flag,
        xx: &mut [f64; POSITION_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status {
        unsafe { swe_calc_ut(tjd_ut, ipl, iflag, xx.as_mut_ptr(), serr.as_mut_ptr()) }
    }

    fn fixstar2(
        &mut self,
        star: &mut NameBuffer,
        tjd_et: JulianDay,
        iflag: Flag,
        xx: &mut [f64; POSITION_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status {
        unsafe {
            swe_fixstar2(
                star.as_mut_ptr(),
                tjd_et,
                iflag,
                xx.as_mut_ptr(),
                serr.as_mut_ptr(),
            )
        }
    }

    fn fixstar2_ut(
        &mut self,
        star: &mut NameBuffer,
        tjd_ut: JulianDay,
        iflag: Flag,
        xx: &mut [f64; POSITION_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status {
        unsafe {
            swe_fixstar2_ut(
                star.as_mut_ptr(),
                tjd_ut,
                iflag,
                xx.as_mut_ptr(),
                serr.as_mut_ptr(),
            )
        }
    }

    fn fixstar2_mag(
        &mut self,
        star: &mut NameBuffer,
        mag: &mut f64,
        serr: &mut ErrorBuffer,
    ) -> Status {
        unsafe { swe_fixstar2_mag(star.as_mut_ptr(), mag, serr.as_mut_ptr()) }
    }

    fn get_planet_name(&mut self, ipl: BodyId, name: &mut NameBuffer) {
        unsafe { swe_get_planet_name(ipl, name.as_mut_ptr()) };
    }

    fn julday(&mut self, year: i32, month: i32, day: i32, hour: f64, gregflag: i32) -> JulianDay {
        unsafe { swe_julday(year, month, day, hour, gregflag) }
    }

    fn day_of_week(&mut self, jd: JulianDay) -> i32 {
        unsafe { swe_day_of_week(jd) }
    }

    fn deltat(&mut self, tjd_ut: JulianDay) -> f64 {
        unsafe { swe_deltat(tjd_ut) }
    }

    fn deltat_ex(&mut self, tjd_ut: JulianDay, ephe_flag: Flag, serr: &mut ErrorBuffer) -> f64 {
        unsafe { swe_deltat_ex(tjd_ut, ephe_flag, serr.as_mut_ptr()) }
    }

    fn sol_eclipse_when_loc(
        &mut self,
        tjd_start: JulianDay,
        ifl: Flag,
        geopos: &GeoPosition,
        tret: &mut [f64; ECLIPSE_TIMES_WIDTH],
        attr: &mut [f64; ATTRIBUTES_WIDTH],
        backward: bool,
        serr: &mut ErrorBuffer,
    ) -> Status {
        let mut geo = geopos.to_array();
        unsafe {
            swe_sol_eclipse_when_loc(
                tjd_start,
                ifl,
                geo.as_mut_ptr(),
                tret.as_mut_ptr(),
                attr.as_mut_ptr(),
                i32::from(backward),
                serr.as_mut_ptr(),
            )
        }
    }

    fn sol_eclipse_when_glob(
        &mut self,
        tjd_start: JulianDay,
        ifl: Flag,
        ifltype: Flag,
        tret: &mut [f64; ECLIPSE_TIMES_WIDTH],
        backward: bool,
        serr: &mut ErrorBuffer,
    ) -> Status {
        unsafe {
            swe_sol_eclipse_when_glob(
                tjd_start,
                ifl,
                ifltype,
                tret.as_mut_ptr(),
                i32::from(backward),
                serr.as_mut_ptr(),
            )
        }
    }

    fn sol_eclipse_where(
        &mut self,
        tjd_ut: JulianDay,
        ifl: Flag,
        geopos: &mut [f64; ECLIPSE_PATH_WIDTH],
        attr: &mut [f64; ATTRIBUTES_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status {
        unsafe {
            swe_sol_eclipse_where(
                tjd_ut,
                ifl,
                geopos.as_mut_ptr(),
                attr.as_mut_ptr(),
                serr.as_mut_ptr(),
            )
        }
    }

    fn sol_eclipse_how(
        &mut self,
        tjd_ut: JulianDay,
        ifl: Flag,
        geopos: &GeoPosition,
        attr: &mut [f64; ATTRIBUTES_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status {
        let mut geo = geopos.to_array();
        unsafe {
            swe_sol_eclipse_how(
                tjd_ut,
                ifl,
                geo.as_mut_ptr(),
                attr.as_mut_ptr(),
                serr.as_mut_ptr(),
            )
        }
    }

    fn lun_eclipse_when_loc(
        &mut self,
        tjd_start: JulianDay,
        ifl: Flag,
        geopos: &GeoPosition,
        tret: &mut [f64; ECLIPSE_TIMES_WIDTH],
        attr: &mut [f64; ATTRIBUTES_WIDTH],
        backward: bool,
        serr: &mut ErrorBuffer,
    ) -> Status {
        let mut geo = geopos.to_array();
        unsafe {
            swe_lun_eclipse_when_loc(
                tjd_start,
                ifl,
                geo.as_mut_ptr(),
                tret.as_mut_ptr(),
                attr.as_mut_ptr(),
                i32::from(backward),
                serr.as_mut_ptr(),
            )
        }
    }

    fn lun_eclipse_when(
        &mut self,
        tjd_start: JulianDay,
        ifl: Flag,
        ifltype: Flag,
        tret: &mut [f64; ECLIPSE_TIMES_WIDTH],
        backward: bool,
        serr: &mut ErrorBuffer,
    ) -> Status {
        unsafe {
            swe_lun_eclipse_when(
                tjd_start,
                ifl,
                ifltype,
                tret.as_mut_ptr(),
                i32::from(backward),
                serr.as_mut_ptr(),
            )
        }
    }

    fn lun_eclipse_how(
        &mut self,
        tjd_ut: JulianDay,
        ifl: Flag,
        geopos: &GeoPosition,
        attr: &mut [f64; ATTRIBUTES_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status {
        let mut geo = geopos.to_array();
        unsafe {
            swe_lun_eclipse_how(
                tjd_ut,
                ifl,
                geo.as_mut_ptr(),
                attr.as_mut_ptr(),
                serr.as_mut_ptr(),
            )
        }
    }

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
    ) -> Status {
        let mut geo = geopos.to_array();
        unsafe {
            swe_rise_trans_true_hor(
                tjd_ut,
                ipl,
                star.as_mut_ptr(),
                ephe_flag,
                rsmi,
                geo.as_mut_ptr(),
                atpress,
                attemp,
                horhgt,
                tret,
                serr.as_mut_ptr(),
            )
        }
    }

    fn pheno(
        &mut self,
        tjd_et: JulianDay,
        ipl: BodyId,
        iflag: Flag,
        attr: &mut [f64; ATTRIBUTES_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status {
        unsafe { swe_pheno(tjd_et, ipl, iflag, attr.as_mut_ptr(), serr.as_mut_ptr()) }
    }

    fn pheno_ut(
        &mut self,
        tjd_ut: JulianDay,
        ipl: BodyId,
        iflag: Flag,
        attr: &mut [f64; ATTRIBUTES_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status {
        unsafe { swe_pheno_ut(tjd_ut, ipl, iflag, attr.as_mut_ptr(), serr.as_mut_ptr()) }
    }

    fn azalt(
        &mut self,
        tjd_ut: JulianDay,
        calc_flag: Flag,
        geopos: &GeoPosition,
        atpress: f64,
        attemp: f64,
        xin: &[f64; 3],
        xaz: &mut [f64; AZALT_WIDTH],
    ) {
        let mut geo = geopos.to_array();
        let mut xin = *xin;
        unsafe {
            swe_azalt(
                tjd_ut,
                calc_flag,
                geo.as_mut_ptr(),
                atpress,
                attemp,
                xin.as_mut_ptr(),
                xaz.as_mut_ptr(),
            )
        }
    }

    fn azalt_rev(
        &mut self,
        tjd_ut: JulianDay,
        calc_flag: Flag,
        geopos: &GeoPosition,
        xin: &[f64; 2],
        xout: &mut [f64; AZALT_WIDTH],
    ) {
        let mut geo = geopos.to_array();
        let mut xin = *xin;
        unsafe {
            swe_azalt_rev(
                tjd_ut,
                calc_flag,
                geo.as_mut_ptr(),
                xin.as_mut_ptr(),
                xout.as_mut_ptr(),
            )
        }
    }

    fn refrac_extended(
        &mut self,
        inalt: f64,
        geoalt: f64,
        atpress: f64,
        attemp: f64,
        lapse_rate: f64,
        calc_flag: Flag,
        dret: &mut [f64; REFRACTION_WIDTH],
    ) -> f64 {
        unsafe {
            swe_refrac_extended(
                inalt,
                geoalt,
                atpress,
                attemp,
                lapse_rate,
                calc_flag,
                dret.as_mut_ptr(),
            )
        }
    }

    fn heliacal_ut(
        &mut self,
        tjd_start: JulianDay,
        conditions: &VisibilityConditions,
        object: &mut NameBuffer,
        event_type: Flag,
        helflag: Flag,
        dret: &mut [f64; HELIACAL_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status {
        let (mut geo, mut atm, mut obs) = raw_conditions(conditions);
        unsafe {
            swe_heliacal_ut(
                tjd_start,
                geo.as_mut_ptr(),
                atm.as_mut_ptr(),
                obs.as_mut_ptr(),
                object.as_mut_ptr(),
                event_type,
                helflag,
                dret.as_mut_ptr(),
                serr.as_mut_ptr(),
            )
        }
    }

    fn vis_limit_mag(
        &mut self,
        tjd_ut: JulianDay,
        conditions: &VisibilityConditions,
        object: &mut NameBuffer,
        helflag: Flag,
        dret: &mut [f64; HELIACAL_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status {
        let (mut geo, mut atm, mut obs) = raw_conditions(conditions);
        unsafe {
            swe_vis_limit_mag(
                tjd_ut,
                geo.as_mut_ptr(),
                atm.as_mut_ptr(),
                obs.as_mut_ptr(),
                object.as_mut_ptr(),
                helflag,
                dret.as_mut_ptr(),
                serr.as_mut_ptr(),
            )
        }
    }

    fn heliacal_pheno_ut(
        &mut self,
        tjd_ut: JulianDay,
        conditions: &VisibilityConditions,
        object: &mut NameBuffer,
        event_type: Flag,
        helflag: Flag,
        darr: &mut [f64; HELIACAL_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status {
        let (mut geo, mut atm, mut obs) = raw_conditions(conditions);
        unsafe {
            swe_heliacal_pheno_ut(
                tjd_ut,
                geo.as_mut_ptr(),
                atm.as_mut_ptr(),
                obs.as_mut_ptr(),
                object.as_mut_ptr(),
                event_type,
                helflag,
                darr.as_mut_ptr(),
                serr.as_mut_ptr(),
            )
        }
    }

    fn topo_arcus_visionis(
        &mut self,
        tjd_ut: JulianDay,
        conditions: &VisibilityConditions,
        helflag: Flag,
        mag: f64,
        sky: &SkyGeometry,
        tav: &mut f64,
        serr: &mut ErrorBuffer,
    ) -> Status {
        let (mut geo, mut atm, mut obs) = raw_conditions(conditions);
        unsafe {
            swe_topo_arcus_visionis(
                tjd_ut,
                geo.as_mut_ptr(),
                atm.as_mut_ptr(),
                obs.as_mut_ptr(),
                helflag,
                mag,
                sky.azi_object,
                sky.alt_object,
                sky.azi_sun,
                sky.azi_moon,
                sky.alt_moon,
                tav,
                serr.as_mut_ptr(),
            )
        }
    }

    fn heliacal_angle(
        &mut self,
        tjd_ut: JulianDay,
        conditions: &VisibilityConditions,
        helflag: Flag,
        mag: f64,
        sky: &SkyGeometry,
        dret: &mut [f64; HELIACAL_WIDTH],
        serr: &mut ErrorBuffer,
    ) -> Status {
        let (mut geo, mut atm, mut obs) = raw_conditions(conditions);
        unsafe {
            swe_heliacal_angle(
                tjd_ut,
                geo.as_mut_ptr(),
                atm.as_mut_ptr(),
                obs.as_mut_ptr(),
                helflag,
                mag,
                sky.azi_object,
                sky.azi_sun,
                sky.azi_moon,
                sky.alt_moon,
                dret.as_mut_ptr(),
                serr.as_mut_ptr(),
            )
        }
    }

    fn houses_ex(
        &mut self,
        tjd_ut: JulianDay,
        iflag: Flag,
        geolat: f64,
        geolon: f64,
        hsys: u8,
        cusps: &mut [f64; CUSPS_WIDTH],
        ascmc: &mut [f64; ASCMC_WIDTH],
    ) -> Status {
        unsafe {
            swe_houses_ex(
                tjd_ut,
                iflag,
                geolat,
                geolon,
                c_int::from(hsys),
                cusps.as_mut_ptr(),
                ascmc.as_mut_ptr(),
            )
        }
    }

    fn set_ephe_path(&mut self, path: Option<&PathBuffer>) {
        let ptr = path.map_or(std::ptr::null(), PathBuffer::as_ptr);
        unsafe { swe_set_ephe_path(ptr) }
    }

    fn set_jpl_file(&mut self, file_name: &PathBuffer) {
        unsafe { swe_set_jpl_file(file_name.as_ptr()) }
    }

    fn set_tid_acc(&mut self, t_acc: f64) {
        unsafe { swe_set_tid_acc(t_acc) }
    }

    fn get_tid_acc(&mut self) -> f64 {
        unsafe { swe_get_tid_acc() }
    }

    fn set_delta_t_userdef(&mut self, delta_t: f64) {
        unsafe { swe_set_delta_t_userdef(delta_t) }
    }

    fn set_topo(&mut self, geolon: f64, geolat: f64, altitude: f64) {
        unsafe { swe_set_topo(geolon, geolat, altitude) }
    }

    fn set_sid_mode(&mut self, sid_mode: i32, t0: f64, ayan_t0: f64) {
        unsafe { swe_set_sid_mode(sid_mode, t0, ayan_t0) }
    }

    fn version(&mut self, out: &mut PathBuffer) {
        unsafe { swe_version(out.as_mut_ptr()) };
    }

    fn get_library_path(&mut self, out: &mut PathBuffer) {
        unsafe { swe_get_library_path(out.as_mut_ptr()) };
    }

    fn close(&mut self) {
        unsafe { swe_close() }
    }
}

type RawConditions = ([f64; 3], [f64; 4], [f64; 6]);

fn raw_conditions(conditions: &VisibilityConditions) -> RawConditions {
    (
        conditions.geo.to_array(),
        conditions.atmosphere.to_array(),
        conditions.observer.to_array(),
    )
}
