//! Parameter accessors and the diagnostic channel.

use crate::diagnostics::{Diagnostics, LogSink};
use crate::params::{Params, simplex};
use crate::types::Verbosity;

use super::Model;
use super::error::ModelError;

impl Model {
    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Emit a diagnostic through the model's channel.
    pub fn report(&self, severity: Verbosity, message: &str) {
        self.diagnostics.report(severity, message);
    }

    /// Install or remove the message sink.
    pub fn set_log_sink(&mut self, sink: Option<LogSink>) {
        self.diagnostics.set_sink(sink);
    }

    /// Set the verbosity threshold from its numeric code (0..=6).
    pub fn set_verbose(&mut self, level: i64) -> Result<(), ModelError> {
        let verbosity = Verbosity::from_code(level).ok_or(ModelError::InvalidParameter {
            name: "verbose",
            value: level.to_string(),
        })?;
        self.diagnostics.set_verbosity(verbosity);
        Ok(())
    }

    pub fn get_verbose(&self) -> Verbosity {
        self.diagnostics.verbosity()
    }

    /// Wall-clock limit in seconds; 0 disables it.
    pub fn set_timeout(&mut self, seconds: i64) -> Result<(), ModelError> {
        if seconds < 0 {
            return Err(ModelError::InvalidParameter {
                name: "timeout",
                value: seconds.to_string(),
            });
        }
        self.params.timeout = seconds;
        Ok(())
    }

    pub fn get_timeout(&self) -> i64 {
        self.params.timeout
    }

    pub fn set_scaling(&mut self, mode: i32) -> Result<(), ModelError> {
        if mode < 0 {
            return Err(invalid("scaling", mode));
        }
        self.params.scaling = mode;
        Ok(())
    }

    pub fn get_scaling(&self) -> i32 {
        self.params.scaling
    }

    /// Only the four simplex phase combinations are accepted.
    pub fn set_simplextype(&mut self, simplex_type: i32) -> Result<(), ModelError> {
        if !simplex::ALL.contains(&simplex_type) {
            return Err(invalid("simplex_type", simplex_type));
        }
        self.params.simplex_type = simplex_type;
        Ok(())
    }

    pub fn get_simplextype(&self) -> i32 {
        self.params.simplex_type
    }

    pub fn set_bb_rule(&mut self, rule: i32) -> Result<(), ModelError> {
        if rule < 0 {
            return Err(invalid("bb_rule", rule));
        }
        self.params.bb_rule = rule;
        Ok(())
    }

    pub fn get_bb_rule(&self) -> i32 {
        self.params.bb_rule
    }

    pub fn set_bb_depthlimit(&mut self, limit: i32) {
        self.params.bb_depth_limit = limit;
    }

    pub fn get_bb_depthlimit(&self) -> i32 {
        self.params.bb_depth_limit
    }

    pub fn set_solutionlimit(&mut self, limit: i32) -> Result<(), ModelError> {
        if limit < 1 {
            return Err(invalid("solution_limit", limit));
        }
        self.params.solution_limit = limit;
        Ok(())
    }

    pub fn get_solutionlimit(&self) -> i32 {
        self.params.solution_limit
    }

    pub fn set_presolve(&mut self, mode: i32, max_loops: i32) -> Result<(), ModelError> {
        if mode < 0 {
            return Err(invalid("presolve", mode));
        }
        self.params.presolve = mode;
        self.params.presolve_loops = max_loops;
        Ok(())
    }

    pub fn get_presolve(&self) -> i32 {
        self.params.presolve
    }

    pub fn get_presolveloops(&self) -> i32 {
        self.params.presolve_loops
    }

    /// Set the absolute (`absolute = true`) or relative MIP gap.
    pub fn set_mip_gap(&mut self, absolute: bool, gap: f64) -> Result<(), ModelError> {
        if !(gap.is_finite() && gap >= 0.0) {
            return Err(ModelError::InvalidParameter {
                name: "mip_gap",
                value: gap.to_string(),
            });
        }
        if absolute {
            self.params.mip_gap_abs = gap;
        } else {
            self.params.mip_gap_rel = gap;
        }
        Ok(())
    }

    pub fn get_mip_gap(&self, absolute: bool) -> f64 {
        if absolute {
            self.params.mip_gap_abs
        } else {
            self.params.mip_gap_rel
        }
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.params.debug = debug;
    }

    pub fn is_debug(&self) -> bool {
        self.params.debug
    }

    pub fn set_trace(&mut self, trace: bool) {
        self.params.trace = trace;
    }

    pub fn is_trace(&self) -> bool {
        self.params.trace
    }
}

fn invalid(name: &'static str, value: i32) -> ModelError {
    ModelError::InvalidParameter {
        name,
        value: value.to_string(),
    }
}
