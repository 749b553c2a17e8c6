//! Solver configuration types.

use lpbind_core::Model;
use lpbind_core::params::presolve;

/// Backend selected for a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackendKind {
    /// Pure-Rust simplex with branch and bound.
    #[default]
    Microlp,
    /// HiGHS through its C API. Requires the `highs` feature.
    Highs,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::Microlp => "microlp",
            BackendKind::Highs => "highs",
        }
    }

    /// Parse a backend name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "microlp" => Some(BackendKind::Microlp),
            "highs" => Some(BackendKind::Highs),
            _ => None,
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration options for a solve.
///
/// Every field is optional; `None` leaves the backend default in place.
/// [`SolverConfig::from_model`] derives a configuration from the parameters
/// stored on a model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverConfig {
    /// Time limit in seconds.
    pub time_limit: Option<f64>,
    /// Absolute MIP gap.
    pub mip_gap_abs: Option<f64>,
    /// Relative MIP gap.
    pub mip_gap_rel: Option<f64>,
    /// Verbosity code, 0 to 6.
    pub verbosity: Option<u32>,
    pub presolve: Option<bool>,
    pub threads: Option<u32>,
    /// Feasibility tolerance.
    pub tolerance: Option<f64>,
    pub log_to_console: Option<bool>,
    pub backend: Option<BackendKind>,
}

impl SolverConfig {
    /// Create a new configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration taken from the parameters stored on `model`.
    pub fn from_model(model: &Model) -> Self {
        let params = model.params();
        let mut config = Self::new()
            .with_mip_gap_abs(params.mip_gap_abs)
            .with_mip_gap_rel(params.mip_gap_rel)
            .with_verbosity(model.get_verbose().code().unsigned_abs())
            .with_presolve(params.presolve != presolve::NONE);
        if params.timeout > 0 {
            config.time_limit = Some(params.timeout as f64);
        }
        if params.trace {
            config.log_to_console = Some(true);
        }
        config
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    pub fn with_mip_gap_abs(mut self, gap: f64) -> Self {
        self.mip_gap_abs = Some(gap);
        self
    }

    pub fn with_mip_gap_rel(mut self, gap: f64) -> Self {
        self.mip_gap_rel = Some(gap);
        self
    }

    pub fn with_verbosity(mut self, level: u32) -> Self {
        self.verbosity = Some(level);
        self
    }

    pub fn with_presolve(mut self, enabled: bool) -> Self {
        self.presolve = Some(enabled);
        self
    }

    pub fn with_threads(mut self, count: u32) -> Self {
        self.threads = Some(count);
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = Some(tol);
        self
    }

    pub fn with_log_to_console(mut self, enabled: bool) -> Self {
        self.log_to_console = Some(enabled);
        self
    }

    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Check if this configuration is completely empty (all defaults).
    pub fn is_empty(&self) -> bool {
        self.time_limit.is_none()
            && self.mip_gap_abs.is_none()
            && self.mip_gap_rel.is_none()
            && self.verbosity.is_none()
            && self.presolve.is_none()
            && self.threads.is_none()
            && self.tolerance.is_none()
            && self.log_to_console.is_none()
            && self.backend.is_none()
    }
}
