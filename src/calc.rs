//! # Batched positions of planets and fixed stars
//!
//! Vectorized entry points over the 6-wide position family and the per-date time helpers.
//! Every batched operation follows the same shape:
//!
//! - lengths of the parallel inputs are checked first ([`validate_lengths`]); a mismatch
//!   aborts before the engine is touched,
//! - star names are copied into 41-byte slots up front, so a [`NameOverflow::Reject`]
//!   policy also fails before any engine call,
//! - the engine is called once per element with fresh buffers, in input order,
//! - per-element status and diagnostic are returned verbatim next to the numbers.
//!
//! Star operations return the names as the engine rewrote them (`",alTau"` comes back as
//! `"Aldebaran,alTau"`), not the caller's input.
//!
//! [`NameOverflow::Reject`]: crate::buffers::NameOverflow::Reject
use crate::batch::{
    dispatch, validate_lengths, BatchResult, MagnitudeBatch, NamedBatchResult, ValueBatch,
};
use crate::buffers::NameBuffer;
use crate::constants::{BodyId, Flag, JulianDay, Status, OK, POSITION_WIDTH};
use crate::engine::Engine;
use crate::sweph::{Inner, Sweph};
use crate::sweph_errors::SwephError;

/// Which time scale the Julian days of a batch are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scale {
    Ephemeris,
    Universal,
}

impl Scale {
    fn jd_name(self) -> &'static str {
        match self {
            Scale::Ephemeris => "jd_et",
            Scale::Universal => "jd_ut",
        }
    }
}

impl<E: Engine> Sweph<E> {
    /// Positions of bodies at ephemeris-time dates (`swe_calc`).
    ///
    /// Arguments
    /// -----------------
    /// * `jd_et`: one ET Julian day per element.
    /// * `ipl`: one body identifier per element; must have the same length as `jd_et`.
    /// * `iflag`: calculation flags shared by the whole batch.
    ///
    /// Return
    /// ----------
    /// * A [`BatchResult`] of width 6, or [`SwephError::LengthMismatch`].
    pub fn calc(
        &self,
        jd_et: &[JulianDay],
        ipl: &[BodyId],
        iflag: Flag,
    ) -> Result<BatchResult, SwephError> {
        self.planets(Scale::Ephemeris, jd_et, ipl, iflag)
    }

    /// Positions of bodies at universal-time dates (`swe_calc_ut`).
    ///
    /// See [`Sweph::calc`] for the argument and result contract.
    pub fn calc_ut(
        &self,
        jd_ut: &[JulianDay],
        ipl: &[BodyId],
        iflag: Flag,
    ) -> Result<BatchResult, SwephError> {
        self.planets(Scale::Universal, jd_ut, ipl, iflag)
    }

    fn planets(
        &self,
        scale: Scale,
        jd: &[JulianDay],
        ipl: &[BodyId],
        iflag: Flag,
    ) -> Result<BatchResult, SwephError> {
        let n = validate_lengths(&[(scale.jd_name(), jd.len()), ("ipl", ipl.len())])?;
        let mut guard = self.lock()?;
        let engine = &mut guard.engine;

        let calls = dispatch::<POSITION_WIDTH, _>(scale.jd_name(), n, |i, scratch| match scale {
            Scale::Ephemeris => {
                engine.calc(jd[i], ipl[i], iflag, &mut scratch.values, &mut scratch.serr)
            }
            Scale::Universal => {
                engine.calc_ut(jd[i], ipl[i], iflag, &mut scratch.values, &mut scratch.serr)
            }
        });
        Ok(BatchResult::assemble(calls))
    }

    /// Positions of fixed stars at ephemeris-time dates (`swe_fixstar2`).
    ///
    /// Arguments
    /// -----------------
    /// * `star`: one star name per element, traditional (`"Spica"`) or nomenclature
    ///   (`",alVir"`).
    /// * `jd_et`: one ET Julian day per element.
    /// * `iflag`: calculation flags shared by the whole batch.
    ///
    /// Return
    /// ----------
    /// * A [`NamedBatchResult`] whose `names` hold the engine-normalized star names.
    pub fn fixstar2(
        &self,
        star: &[&str],
        jd_et: &[JulianDay],
        iflag: Flag,
    ) -> Result<NamedBatchResult, SwephError> {
        self.stars(Scale::Ephemeris, star, jd_et, iflag)
    }

    /// Positions of fixed stars at universal-time dates (`swe_fixstar2_ut`).
    pub fn fixstar2_ut(
        &self,
        star: &[&str],
        jd_ut: &[JulianDay],
        iflag: Flag,
    ) -> Result<NamedBatchResult, SwephError> {
        self.stars(Scale::Universal, star, jd_ut, iflag)
    }

    fn stars(
        &self,
        scale: Scale,
        star: &[&str],
        jd: &[JulianDay],
        iflag: Flag,
    ) -> Result<NamedBatchResult, SwephError> {
        let n = validate_lengths(&[("star", star.len()), (scale.jd_name(), jd.len())])?;
        let mut guard = self.lock()?;
        let mut names = name_buffers(&guard, star)?;
        let engine = &mut guard.engine;

        let calls = dispatch::<POSITION_WIDTH, _>("fixstar2", n, |i, scratch| {
            let name = &mut names[i];
            match scale {
                Scale::Ephemeris => engine.fixstar2(
                    name,
                    jd[i],
                    iflag,
                    &mut scratch.values,
                    &mut scratch.serr,
                ),
                Scale::Universal => engine.fixstar2_ut(
                    name,
                    jd[i],
                    iflag,
                    &mut scratch.values,
                    &mut scratch.serr,
                ),
            }
        });

        Ok(NamedBatchResult {
            names: names.iter().map(NameBuffer::to_string_lossy).collect(),
            result: BatchResult::assemble(calls),
        })
    }

    /// Visual magnitudes of fixed stars (`swe_fixstar2_mag`).
    pub fn fixstar2_mag(&self, star: &[&str]) -> Result<MagnitudeBatch, SwephError> {
        let mut guard = self.lock()?;
        let mut names = name_buffers(&guard, star)?;
        let engine = &mut guard.engine;

        let calls = dispatch::<1, _>("fixstar2_mag", star.len(), |i, scratch| {
            let mut mag = 0.0;
            let status: Status = engine.fixstar2_mag(&mut names[i], &mut mag, &mut scratch.serr);
            scratch.values[0] = mag;
            status
        });

        let result = BatchResult::assemble(calls);
        Ok(MagnitudeBatch {
            status: result.status,
            names: names.iter().map(NameBuffer::to_string_lossy).collect(),
            magnitudes: result.values.iter().copied().collect(),
            serr: result.serr,
        })
    }

    /// ΔT (days) for each universal-time date, using the engine's default model.
    pub fn deltat(&self, jd_ut: &[JulianDay]) -> Result<Vec<f64>, SwephError> {
        let mut guard = self.lock()?;
        let engine = &mut guard.engine;
        let calls = dispatch::<1, _>("deltat", jd_ut.len(), |i, scratch| {
            scratch.values[0] = engine.deltat(jd_ut[i]);
            OK
        });
        Ok(calls.iter().map(|call| call.values[0]).collect())
    }

    /// ΔT (days) for each universal-time date, consistent with the ephemeris `ephe_flag`.
    ///
    /// The engine reports no status here; a non-empty diagnostic signals a fallback.
    pub fn deltat_ex(&self, jd_ut: &[JulianDay], ephe_flag: Flag) -> Result<ValueBatch, SwephError> {
        let mut guard = self.lock()?;
        let engine = &mut guard.engine;
        let calls = dispatch::<1, _>("deltat_ex", jd_ut.len(), |i, scratch| {
            scratch.values[0] = engine.deltat_ex(jd_ut[i], ephe_flag, &mut scratch.serr);
            OK
        });
        let result = BatchResult::assemble(calls);
        Ok(ValueBatch {
            values: result.values.iter().copied().collect(),
            serr: result.serr,
        })
    }

    /// Day of week for each Julian day (Monday = 0, …, Sunday = 6).
    pub fn day_of_week(&self, jd: &[JulianDay]) -> Result<Vec<i32>, SwephError> {
        let mut guard = self.lock()?;
        let engine = &mut guard.engine;
        let calls = dispatch::<1, _>("day_of_week", jd.len(), |i, scratch| {
            scratch.values[0] = f64::from(engine.day_of_week(jd[i]));
            OK
        });
        Ok(calls.iter().map(|call| call.values[0] as i32).collect())
    }

    /// Name of a body, e.g. `"Moon"` for 1.
    pub fn get_planet_name(&self, ipl: BodyId) -> Result<String, SwephError> {
        let mut name = NameBuffer::new();
        self.lock()?.engine.get_planet_name(ipl, &mut name);
        Ok(name.to_string_lossy())
    }

    /// Julian day of a calendar date; `gregflag` selects Gregorian (1) or Julian (0).
    pub fn julday(
        &self,
        year: i32,
        month: i32,
        day: i32,
        hour: f64,
        gregflag: i32,
    ) -> Result<JulianDay, SwephError> {
        Ok(self.lock()?.engine.julday(year, month, day, hour, gregflag))
    }
}

fn name_buffers<E>(inner: &Inner<E>, names: &[&str]) -> Result<Vec<NameBuffer>, SwephError> {
    names.iter().map(|name| inner.name_buffer(name)).collect()
}
