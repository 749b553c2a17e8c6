//! Symbolic constants exposed to scripting hosts.

use lpbind_core::params::{node, presolve, scale, simplex};

/// `(name, value)` pairs in lp_solve naming.
pub static CONSTANTS: &[(&str, i64)] = &[
    // relations
    ("FR", 0),
    ("LE", 1),
    ("GE", 2),
    ("EQ", 3),
    ("OF", 4),
    // verbosity
    ("NEUTRAL", 0),
    ("CRITICAL", 1),
    ("SEVERE", 2),
    ("IMPORTANT", 3),
    ("NORMAL", 4),
    ("DETAILED", 5),
    ("FULL", 6),
    // branch-and-bound node selection
    ("NODE_FIRSTSELECT", node::FIRSTSELECT as i64),
    ("NODE_GAPSELECT", node::GAPSELECT as i64),
    ("NODE_RANGESELECT", node::RANGESELECT as i64),
    ("NODE_FRACTIONSELECT", node::FRACTIONSELECT as i64),
    ("NODE_PSEUDOCOSTSELECT", node::PSEUDOCOSTSELECT as i64),
    ("NODE_PSEUDONONINTSELECT", node::PSEUDONONINTSELECT as i64),
    ("NODE_PSEUDOFEASSELECT", node::PSEUDOFEASSELECT as i64),
    ("NODE_PSEUDORATIOSELECT", node::PSEUDORATIOSELECT as i64),
    ("NODE_USERSELECT", node::USERSELECT as i64),
    ("NODE_STRATEGYMASK", node::STRATEGYMASK as i64),
    ("NODE_WEIGHTREVERSEMODE", node::WEIGHTREVERSEMODE as i64),
    ("NODE_BRANCHREVERSEMODE", node::BRANCHREVERSEMODE as i64),
    ("NODE_GREEDYMODE", node::GREEDYMODE as i64),
    ("NODE_PSEUDOCOSTMODE", node::PSEUDOCOSTMODE as i64),
    ("NODE_DEPTHFIRSTMODE", node::DEPTHFIRSTMODE as i64),
    ("NODE_RANDOMIZEMODE", node::RANDOMIZEMODE as i64),
    ("NODE_GUBMODE", node::GUBMODE as i64),
    ("NODE_DYNAMICMODE", node::DYNAMICMODE as i64),
    ("NODE_RESTARTMODE", node::RESTARTMODE as i64),
    ("NODE_BREADTHFIRSTMODE", node::BREADTHFIRSTMODE as i64),
    ("NODE_AUTOORDER", node::AUTOORDER as i64),
    ("NODE_RCOSTFIXING", node::RCOSTFIXING as i64),
    ("NODE_STRONGINIT", node::STRONGINIT as i64),
    // presolve
    ("PRESOLVE_NONE", presolve::NONE as i64),
    ("PRESOLVE_ROWS", presolve::ROWS as i64),
    ("PRESOLVE_COLS", presolve::COLS as i64),
    ("PRESOLVE_LINDEP", presolve::LINDEP as i64),
    ("PRESOLVE_SOS", presolve::SOS as i64),
    ("PRESOLVE_REDUCEMIP", presolve::REDUCEMIP as i64),
    ("PRESOLVE_KNAPSACK", presolve::KNAPSACK as i64),
    ("PRESOLVE_ELIMEQ2", presolve::ELIMEQ2 as i64),
    ("PRESOLVE_IMPLIEDFREE", presolve::IMPLIEDFREE as i64),
    ("PRESOLVE_REDUCEGCD", presolve::REDUCEGCD as i64),
    ("PRESOLVE_PROBEFIX", presolve::PROBEFIX as i64),
    ("PRESOLVE_PROBEREDUCE", presolve::PROBEREDUCE as i64),
    ("PRESOLVE_ROWDOMINATE", presolve::ROWDOMINATE as i64),
    ("PRESOLVE_COLDOMINATE", presolve::COLDOMINATE as i64),
    ("PRESOLVE_MERGEROWS", presolve::MERGEROWS as i64),
    ("PRESOLVE_IMPLIEDSLK", presolve::IMPLIEDSLK as i64),
    ("PRESOLVE_COLFIXDUAL", presolve::COLFIXDUAL as i64),
    ("PRESOLVE_BOUNDS", presolve::BOUNDS as i64),
    ("PRESOLVE_LASTMASKMODE", presolve::LASTMASKMODE as i64),
    ("PRESOLVE_DUALS", presolve::DUALS as i64),
    ("PRESOLVE_SENSDUALS", presolve::SENSDUALS as i64),
    // scaling
    ("SCALE_NONE", scale::NONE as i64),
    ("SCALE_EXTREME", scale::EXTREME as i64),
    ("SCALE_RANGE", scale::RANGE as i64),
    ("SCALE_MEAN", scale::MEAN as i64),
    ("SCALE_GEOMETRIC", scale::GEOMETRIC as i64),
    ("SCALE_CURTISREID", scale::CURTISREID as i64),
    ("SCALE_QUADRATIC", scale::QUADRATIC as i64),
    ("SCALE_LOGARITHMIC", scale::LOGARITHMIC as i64),
    ("SCALE_USERWEIGHT", scale::USERWEIGHT as i64),
    ("SCALE_POWER2", scale::POWER2 as i64),
    ("SCALE_EQUILIBRATE", scale::EQUILIBRATE as i64),
    ("SCALE_INTEGERS", scale::INTEGERS as i64),
    ("SCALE_DYNUPDATE", scale::DYNUPDATE as i64),
    ("SCALE_ROWSONLY", scale::ROWSONLY as i64),
    ("SCALE_COLSONLY", scale::COLSONLY as i64),
    // simplex
    ("SIMPLEX_PRIMAL_PRIMAL", simplex::PRIMAL_PRIMAL as i64),
    ("SIMPLEX_DUAL_PRIMAL", simplex::DUAL_PRIMAL as i64),
    ("SIMPLEX_PRIMAL_DUAL", simplex::PRIMAL_DUAL as i64),
    ("SIMPLEX_DUAL_DUAL", simplex::DUAL_DUAL as i64),
    // solve results
    ("NOMEMORY", -2),
    ("NOTRUN", -1),
    ("OPTIMAL", 0),
    ("SUBOPTIMAL", 1),
    ("INFEASIBLE", 2),
    ("UNBOUNDED", 3),
    ("DEGENERATE", 4),
    ("NUMFAILURE", 5),
    ("USERABORT", 6),
    ("TIMEOUT", 7),
    ("RUNNING", 8),
    ("PRESOLVED", 9),
    ("PROCFAIL", 10),
    ("PROCBREAK", 11),
    ("FEASFOUND", 12),
    ("NOFEASFOUND", 13),
    ("FATHOMED", 14),
];

/// Value of a named constant.
pub fn lookup(name: &str) -> Option<i64> {
    CONSTANTS
        .iter()
        .find_map(|&(candidate, value)| (candidate == name).then_some(value))
}
