//! Solver parameters stored on the model and their lp_solve codes.

use serde::{Deserialize, Serialize};

use crate::types::DEFAULT_INFINITY;

/// Scaling algorithm codes and modifier flags.
pub mod scale {
    pub const NONE: i32 = 0;
    pub const EXTREME: i32 = 1;
    pub const RANGE: i32 = 2;
    pub const MEAN: i32 = 3;
    pub const GEOMETRIC: i32 = 4;
    pub const CURTISREID: i32 = 7;
    pub const QUADRATIC: i32 = 8;
    pub const LOGARITHMIC: i32 = 16;
    pub const USERWEIGHT: i32 = 31;
    pub const POWER2: i32 = 32;
    pub const EQUILIBRATE: i32 = 64;
    pub const INTEGERS: i32 = 128;
    pub const DYNUPDATE: i32 = 256;
    pub const ROWSONLY: i32 = 512;
    pub const COLSONLY: i32 = 1024;
}

/// Simplex phase combinations.
pub mod simplex {
    pub const PRIMAL_PRIMAL: i32 = 5;
    pub const DUAL_PRIMAL: i32 = 6;
    pub const PRIMAL_DUAL: i32 = 9;
    pub const DUAL_DUAL: i32 = 10;

    pub const ALL: [i32; 4] = [PRIMAL_PRIMAL, DUAL_PRIMAL, PRIMAL_DUAL, DUAL_DUAL];
}

/// Branch-and-bound node selection rules and mode flags.
pub mod node {
    pub const FIRSTSELECT: i32 = 0;
    pub const GAPSELECT: i32 = 1;
    pub const RANGESELECT: i32 = 2;
    pub const FRACTIONSELECT: i32 = 3;
    pub const PSEUDOCOSTSELECT: i32 = 4;
    pub const PSEUDONONINTSELECT: i32 = 5;
    pub const PSEUDOFEASSELECT: i32 = PSEUDONONINTSELECT + WEIGHTREVERSEMODE;
    pub const PSEUDORATIOSELECT: i32 = 6;
    pub const USERSELECT: i32 = 7;
    pub const STRATEGYMASK: i32 = WEIGHTREVERSEMODE - 1;
    pub const WEIGHTREVERSEMODE: i32 = 8;
    pub const BRANCHREVERSEMODE: i32 = 16;
    pub const GREEDYMODE: i32 = 32;
    pub const PSEUDOCOSTMODE: i32 = 64;
    pub const DEPTHFIRSTMODE: i32 = 128;
    pub const RANDOMIZEMODE: i32 = 256;
    pub const GUBMODE: i32 = 512;
    pub const DYNAMICMODE: i32 = 1024;
    pub const RESTARTMODE: i32 = 2048;
    pub const BREADTHFIRSTMODE: i32 = 4096;
    pub const AUTOORDER: i32 = 8192;
    pub const RCOSTFIXING: i32 = 16384;
    pub const STRONGINIT: i32 = 32768;
}

/// Presolve bitmask flags.
pub mod presolve {
    pub const NONE: i32 = 0;
    pub const ROWS: i32 = 1;
    pub const COLS: i32 = 2;
    pub const LINDEP: i32 = 4;
    pub const SOS: i32 = 32;
    pub const REDUCEMIP: i32 = 64;
    pub const KNAPSACK: i32 = 128;
    pub const ELIMEQ2: i32 = 256;
    pub const IMPLIEDFREE: i32 = 512;
    pub const REDUCEGCD: i32 = 1024;
    pub const PROBEFIX: i32 = 2048;
    pub const PROBEREDUCE: i32 = 4096;
    pub const ROWDOMINATE: i32 = 8192;
    pub const COLDOMINATE: i32 = 16384;
    pub const MERGEROWS: i32 = 32768;
    pub const IMPLIEDSLK: i32 = 65536;
    pub const COLFIXDUAL: i32 = 131072;
    pub const BOUNDS: i32 = 262144;
    pub const LASTMASKMODE: i32 = DUALS - 1;
    pub const DUALS: i32 = 524288;
    pub const SENSDUALS: i32 = 1048576;
}

/// Parameters that steer the solve. Defaults follow lp_solve 5.5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Wall-clock limit in seconds; 0 disables it.
    pub timeout: i64,
    pub scaling: i32,
    pub simplex_type: i32,
    pub bb_rule: i32,
    /// Negative values are relative to the number of integer columns.
    pub bb_depth_limit: i32,
    pub solution_limit: i32,
    pub presolve: i32,
    pub presolve_loops: i32,
    pub mip_gap_abs: f64,
    pub mip_gap_rel: f64,
    pub infinity: f64,
    pub debug: bool,
    pub trace: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            timeout: 0,
            scaling: scale::GEOMETRIC + scale::EQUILIBRATE + scale::INTEGERS,
            simplex_type: simplex::DUAL_PRIMAL,
            bb_rule: node::FIRSTSELECT,
            bb_depth_limit: -50,
            solution_limit: 1,
            presolve: presolve::NONE,
            presolve_loops: -1,
            mip_gap_abs: 1e-11,
            mip_gap_rel: 1e-9,
            infinity: DEFAULT_INFINITY,
            debug: false,
            trace: false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_lp_solve() {
        let params = Params::default();
        assert_eq!(params.scaling, 196);
        assert_eq!(params.simplex_type, simplex::DUAL_PRIMAL);
        assert_eq!(params.bb_depth_limit, -50);
        assert_eq!(params.solution_limit, 1);
        assert_eq!(params.infinity, 1e30);
    }

    #[test]
    fn test_derived_codes() {
        assert_eq!(node::PSEUDOFEASSELECT, 13);
        assert_eq!(node::STRATEGYMASK, 7);
        assert_eq!(presolve::LASTMASKMODE, 524287);
    }
}
