//! # Sweph: engine ownership and configuration
//!
//! This module defines [`Sweph`], the façade every operation goes through. It wires together:
//!
//! 1. **The engine** – any [`Engine`] implementation, owned exclusively.
//! 2. **The configuration snapshot** – the [`EngineConfig`] last applied to that engine.
//!
//! Both live behind a single [`Mutex`]. A batch holds the lock from validation to its last
//! element, so configuration writes issued from another thread can only land between
//! batches, never inside one. The engine itself is never called concurrently.
//!
//! The operations are implemented next to their families:
//!
//! - [`calc`](crate::calc) – batched planet and fixed-star positions, ΔT, weekdays.
//! - [`eclipse`](crate::eclipse) – eclipses, phenomena, horizon and refraction.
//! - [`heliacal`](crate::heliacal) – heliacal events and visibility.
//! - [`houses`](crate::houses) – house cusps.
//!
//! ## Typical usage
//!
//! ```rust
//! use sweph_batch::{engine::stub::StubEngine, EngineConfig, Sweph, SE_SUN, SEFLG_SPEED};
//!
//! let sweph = Sweph::with_config(StubEngine::new(), EngineConfig::default().with_tid_acc(-25.8))?;
//! let result = sweph.calc_ut(&[2451545.0], &[SE_SUN], SEFLG_SPEED)?;
//! assert_eq!(result.collapse().dim(), vec![6]);
//! # Ok::<(), sweph_batch::SwephError>(())
//! ```
//!
//! ## See also
//! ------------
//! * [`Engine`] – The gateway contract implemented by the engine.
//! * [`EngineConfig`] – Configuration fields and builder.
use std::sync::{Mutex, MutexGuard};

use camino::Utf8Path;

use crate::buffers::{NameBuffer, NameOverflow, PathBuffer};
use crate::config::{EngineConfig, SiderealMode, Topocentric};
use crate::engine::Engine;
use crate::sweph_errors::SwephError;

#[derive(Debug)]
pub(crate) struct Inner<E> {
    pub(crate) engine: E,
    pub(crate) config: EngineConfig,
}

impl<E> Inner<E> {
    /// Name slot for `name`, honoring the configured overflow policy.
    pub(crate) fn name_buffer(&self, name: &str) -> Result<NameBuffer, SwephError> {
        NameBuffer::from_str_with(name, self.config.name_overflow)
    }
}

#[derive(Debug)]
pub struct Sweph<E> {
    inner: Mutex<Inner<E>>,
}

impl<E: Engine> Sweph<E> {
    /// Wrap an engine, leaving its defaults untouched.
    pub fn new(engine: E) -> Self {
        Sweph {
            inner: Mutex::new(Inner {
                engine,
                config: EngineConfig::default(),
            }),
        }
    }

    /// Wrap an engine and apply every field set in `config`.
    ///
    /// Arguments
    /// -----------------
    /// * `engine`: the engine to own.
    /// * `config`: settings to push to the engine, in the order path, JPL file, tidal
    ///   acceleration, user ΔT, topocentric site, sidereal mode.
    ///
    /// Return
    /// ----------
    /// * The façade, or [`SwephError::InvalidPath`] if a path or file name contains a NUL byte.
    pub fn with_config(engine: E, config: EngineConfig) -> Result<Self, SwephError> {
        let sweph = Self::new(engine);
        {
            let mut inner = sweph.lock()?;
            if let Some(path) = &config.ephe_path {
                let buffer = path_buffer(path.as_str())?;
                inner.engine.set_ephe_path(Some(&buffer));
            }
            if let Some(file_name) = &config.jpl_file {
                let buffer = path_buffer(file_name)?;
                inner.engine.set_jpl_file(&buffer);
            }
            if let Some(t_acc) = config.tid_acc {
                inner.engine.set_tid_acc(t_acc);
            }
            if let Some(delta_t) = config.delta_t_userdef {
                inner.engine.set_delta_t_userdef(delta_t);
            }
            if let Some(topo) = config.topo {
                inner
                    .engine
                    .set_topo(topo.longitude, topo.latitude, topo.altitude);
            }
            if let Some(sidereal) = config.sidereal {
                inner
                    .engine
                    .set_sid_mode(sidereal.mode, sidereal.t0, sidereal.ayan_t0);
            }
            tracing::debug!(?config, "engine configured");
            inner.config = config;
        }
        Ok(sweph)
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Inner<E>>, SwephError> {
        self.inner
            .lock()
            .map_err(|err| SwephError::EngineUnavailable(err.to_string()))
    }

    /// Snapshot of the configuration currently applied.
    pub fn config(&self) -> Result<EngineConfig, SwephError> {
        Ok(self.lock()?.config.clone())
    }

    /// Give the engine back, e.g. to inspect a test double.
    pub fn into_engine(self) -> Result<E, SwephError> {
        self.inner
            .into_inner()
            .map(|inner| inner.engine)
            .map_err(|err| SwephError::EngineUnavailable(err.to_string()))
    }

    /// Set the ephemeris directory; `None` restores the engine default.
    pub fn set_ephe_path(&self, path: Option<&Utf8Path>) -> Result<(), SwephError> {
        let buffer = path.map(|p| path_buffer(p.as_str())).transpose()?;
        let mut inner = self.lock()?;
        inner.engine.set_ephe_path(buffer.as_ref());
        inner.config.ephe_path = path.map(Utf8Path::to_path_buf);
        tracing::debug!(?path, "ephemeris path set");
        Ok(())
    }

    pub fn set_jpl_file(&self, file_name: &str) -> Result<(), SwephError> {
        let buffer = path_buffer(file_name)?;
        let mut inner = self.lock()?;
        inner.engine.set_jpl_file(&buffer);
        inner.config.jpl_file = Some(file_name.to_string());
        tracing::debug!(file_name, "JPL file set");
        Ok(())
    }

    pub fn set_tid_acc(&self, t_acc: f64) -> Result<(), SwephError> {
        let mut inner = self.lock()?;
        inner.engine.set_tid_acc(t_acc);
        inner.config.tid_acc = Some(t_acc);
        tracing::debug!(t_acc, "tidal acceleration set");
        Ok(())
    }

    /// Tidal acceleration as the engine reports it.
    pub fn get_tid_acc(&self) -> Result<f64, SwephError> {
        Ok(self.lock()?.engine.get_tid_acc())
    }

    pub fn set_delta_t_userdef(&self, delta_t: f64) -> Result<(), SwephError> {
        let mut inner = self.lock()?;
        inner.engine.set_delta_t_userdef(delta_t);
        inner.config.delta_t_userdef = Some(delta_t);
        tracing::debug!(delta_t, "user ΔT set");
        Ok(())
    }

    pub fn set_topo(&self, topo: Topocentric) -> Result<(), SwephError> {
        let mut inner = self.lock()?;
        inner
            .engine
            .set_topo(topo.longitude, topo.latitude, topo.altitude);
        inner.config.topo = Some(topo);
        tracing::debug!(?topo, "topocentric site set");
        Ok(())
    }

    pub fn set_sid_mode(&self, sidereal: SiderealMode) -> Result<(), SwephError> {
        let mut inner = self.lock()?;
        inner
            .engine
            .set_sid_mode(sidereal.mode, sidereal.t0, sidereal.ayan_t0);
        inner.config.sidereal = Some(sidereal);
        tracing::debug!(?sidereal, "sidereal mode set");
        Ok(())
    }

    pub fn set_name_overflow(&self, policy: NameOverflow) -> Result<(), SwephError> {
        self.lock()?.config.name_overflow = policy;
        Ok(())
    }

    pub fn version(&self) -> Result<String, SwephError> {
        let mut out = PathBuffer::new();
        self.lock()?.engine.version(&mut out);
        Ok(out.to_string_lossy())
    }

    /// Path of the loaded engine library.
    pub fn library_path(&self) -> Result<String, SwephError> {
        let mut out = PathBuffer::new();
        self.lock()?.engine.get_library_path(&mut out);
        Ok(out.to_string_lossy())
    }

    /// Release the engine's open files and caches. The snapshot is kept.
    pub fn close(&self) -> Result<(), SwephError> {
        self.lock()?.engine.close();
        Ok(())
    }
}

/// Copy a path into a 256-byte slot; longer paths are cut with a warning.
fn path_buffer(path: &str) -> Result<PathBuffer, SwephError> {
    if path.contains('\0') {
        return Err(SwephError::InvalidPath(path.replace('\0', "\\0")));
    }
    let (buffer, truncated) = PathBuffer::from_str_truncated(path);
    if truncated {
        tracing::warn!(path, capacity = PathBuffer::MAX_CONTENT, "path truncated to buffer capacity");
    }
    Ok(buffer)
}

#[cfg(test)]
mod sweph_test {
    use super::*;
    use crate::engine::stub::{StubEngine, STUB_DEFAULT_TID_ACC};

    #[test]
    fn test_with_config_applies_every_field() {
        let config = EngineConfig::default()
            .with_ephe_path("/data/ephe")
            .with_jpl_file("de440.eph")
            .with_tid_acc(-25.936)
            .with_delta_t_userdef(0.001)
            .with_topo(Topocentric::new(8.55, 47.37, 400.0))
            .with_sidereal(SiderealMode::predefined(1));

        let sweph = Sweph::with_config(StubEngine::new(), config.clone()).unwrap();
        assert_eq!(sweph.config().unwrap(), config);

        let engine = sweph.into_engine().unwrap();
        assert_eq!(engine.state.ephe_path.as_deref(), Some("/data/ephe"));
        assert_eq!(engine.state.jpl_file.as_deref(), Some("de440.eph"));
        assert_eq!(engine.state.tid_acc, -25.936);
        assert_eq!(engine.state.delta_t_userdef, Some(0.001));
        assert_eq!(engine.state.topo, Some([8.55, 47.37, 400.0]));
        assert_eq!(engine.state.sid_mode, Some((1, 0.0, 0.0)));
    }

    #[test]
    fn test_setters_update_engine_and_snapshot() {
        let sweph = Sweph::new(StubEngine::new());
        assert_eq!(sweph.get_tid_acc().unwrap(), STUB_DEFAULT_TID_ACC);

        sweph.set_tid_acc(-26.0).unwrap();
        assert_eq!(sweph.get_tid_acc().unwrap(), -26.0);
        assert_eq!(sweph.config().unwrap().tid_acc, Some(-26.0));

        sweph.set_ephe_path(Some(Utf8Path::new("/tmp/se"))).unwrap();
        sweph.set_ephe_path(None).unwrap();
        assert_eq!(sweph.config().unwrap().ephe_path, None);

        sweph.close().unwrap();
        assert!(sweph.into_engine().unwrap().state.closed);
    }

    #[test]
    fn test_configuration_does_not_count_as_computation() {
        let engine = StubEngine::new();
        let counter = engine.counter();
        let sweph = Sweph::with_config(engine, EngineConfig::default().with_tid_acc(-25.0)).unwrap();
        sweph.set_topo(Topocentric::new(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_path_with_nul_is_rejected() {
        let sweph = Sweph::new(StubEngine::new());
        let err = sweph.set_jpl_file("de4\u{0}40.eph").unwrap_err();
        assert!(matches!(err, SwephError::InvalidPath(_)));
    }

    #[test]
    fn test_long_path_is_truncated() {
        let sweph = Sweph::new(StubEngine::new());
        let long = format!("/{}", "d".repeat(300));
        sweph.set_ephe_path(Some(Utf8Path::new(&long))).unwrap();
        let engine = sweph.into_engine().unwrap();
        assert_eq!(engine.state.ephe_path.map(|p| p.len()), Some(255));
    }

    #[test]
    fn test_version_strings() {
        let sweph = Sweph::new(StubEngine::new());
        assert_eq!(sweph.version().unwrap(), "2.10.03-stub");
        assert!(sweph.library_path().unwrap().ends_with("libswe.so"));
    }
}
