//! # Engine configuration context
//!
//! The engine reads several process-wide settings implicitly on every computation call.
//! [`EngineConfig`] makes that state explicit: it is built by the caller, handed to
//! [`Sweph::with_config`](crate::sweph::Sweph::with_config), applied once, and kept as a
//! snapshot that individual setters update.
//!
//! Every field is optional; an unset field leaves the engine default in place.
//!
//! ```rust
//! use sweph_batch::config::{EngineConfig, Topocentric};
//!
//! let config = EngineConfig::default()
//!     .with_ephe_path("/usr/share/sweph")
//!     .with_tid_acc(-25.8)
//!     .with_topo(Topocentric::new(6.1, 50.8, 210.0));
//!
//! assert_eq!(config.ephe_path.as_deref().map(|p| p.as_str()), Some("/usr/share/sweph"));
//! ```
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::buffers::NameOverflow;
use crate::constants::{Degree, Meter};

/// Observer location used by topocentric calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Topocentric {
    pub longitude: Degree,
    pub latitude: Degree,
    pub altitude: Meter,
}

impl Topocentric {
    pub fn new(longitude: Degree, latitude: Degree, altitude: Meter) -> Self {
        Topocentric {
            longitude,
            latitude,
            altitude,
        }
    }
}

/// Sidereal zodiac selection: predefined mode number, or a user epoch and ayanamsha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiderealMode {
    pub mode: i32,
    /// Reference epoch (JD) of a user-defined ayanamsha, 0 otherwise
    pub t0: f64,
    /// Ayanamsha at `t0` (degrees), 0 otherwise
    pub ayan_t0: f64,
}

impl SiderealMode {
    pub fn predefined(mode: i32) -> Self {
        SiderealMode {
            mode,
            t0: 0.0,
            ayan_t0: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory searched for ephemeris files
    pub ephe_path: Option<Utf8PathBuf>,
    /// JPL ephemeris file name, looked up in `ephe_path`
    pub jpl_file: Option<String>,
    /// Tidal acceleration of the Moon (arcsec/cy²)
    pub tid_acc: Option<f64>,
    /// Fixed ΔT (days) overriding the engine model
    pub delta_t_userdef: Option<f64>,
    pub topo: Option<Topocentric>,
    pub sidereal: Option<SiderealMode>,
    /// Handling of star / object names longer than their buffer
    pub name_overflow: NameOverflow,
}

impl EngineConfig {
    pub fn with_ephe_path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.ephe_path = Some(path.into());
        self
    }

    pub fn with_jpl_file(mut self, file_name: impl Into<String>) -> Self {
        self.jpl_file = Some(file_name.into());
        self
    }

    pub fn with_tid_acc(mut self, t_acc: f64) -> Self {
        self.tid_acc = Some(t_acc);
        self
    }

    pub fn with_delta_t_userdef(mut self, delta_t: f64) -> Self {
        self.delta_t_userdef = Some(delta_t);
        self
    }

    pub fn with_topo(mut self, topo: Topocentric) -> Self {
        self.topo = Some(topo);
        self
    }

    pub fn with_sidereal(mut self, sidereal: SiderealMode) -> Self {
        self.sidereal = Some(sidereal);
        self
    }

    pub fn with_name_overflow(mut self, policy: NameOverflow) -> Self {
        self.name_overflow = policy;
        self
    }
}
