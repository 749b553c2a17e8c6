use serde::{Deserialize, Serialize};

/// Value treated as infinite for bounds and right-hand sides.
pub const DEFAULT_INFINITY: f64 = 1e30;

/// Relation code of row 0; never accepted as a constraint relation.
pub const OBJECTIVE_RELATION_CODE: i32 = 4;

/// Constraint relation of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// Unrestricted row (`FR`).
    Free,
    /// `row <= rhs` (`LE`).
    LessEqual,
    /// `row >= rhs` (`GE`).
    GreaterEqual,
    /// `row = rhs` (`EQ`).
    Equal,
}

impl Relation {
    /// Decode a relation from its numeric code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Relation::Free),
            1 => Some(Relation::LessEqual),
            2 => Some(Relation::GreaterEqual),
            3 => Some(Relation::Equal),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Relation::Free => 0,
            Relation::LessEqual => 1,
            Relation::GreaterEqual => 2,
            Relation::Equal => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Free => "FR",
            Relation::LessEqual => "LE",
            Relation::GreaterEqual => "GE",
            Relation::Equal => "EQ",
        }
    }

    /// Operator used by the LP text format and reports.
    pub fn operator(self) -> &'static str {
        match self {
            Relation::Free | Relation::GreaterEqual => ">=",
            Relation::LessEqual => "<=",
            Relation::Equal => "=",
        }
    }

    /// True for the three relations a constraint may be added with.
    pub fn is_ordering(self) -> bool {
        !matches!(self, Relation::Free)
    }
}

/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sense {
    #[default]
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "min",
            Sense::Maximize => "max",
        }
    }
}

/// Message severity and verbosity threshold.
///
/// Lower values are more severe. A message is delivered to the sink when its
/// severity is at or below the model's verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Verbosity {
    Neutral = 0,
    Critical = 1,
    Severe = 2,
    Important = 3,
    Normal = 4,
    Detailed = 5,
    Full = 6,
}

impl Verbosity {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Verbosity::Neutral),
            1 => Some(Verbosity::Critical),
            2 => Some(Verbosity::Severe),
            3 => Some(Verbosity::Important),
            4 => Some(Verbosity::Normal),
            5 => Some(Verbosity::Detailed),
            6 => Some(Verbosity::Full),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verbosity::Neutral => "NEUTRAL",
            Verbosity::Critical => "CRITICAL",
            Verbosity::Severe => "SEVERE",
            Verbosity::Important => "IMPORTANT",
            Verbosity::Normal => "NORMAL",
            Verbosity::Detailed => "DETAILED",
            Verbosity::Full => "FULL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_codes_round_trip() {
        for code in 0..4 {
            let relation = Relation::from_code(code).expect("known relation");
            assert_eq!(i64::from(relation.code()), code);
        }
        assert_eq!(Relation::from_code(i64::from(OBJECTIVE_RELATION_CODE)), None);
        assert_eq!(Relation::from_code(-1), None);
    }

    #[test]
    fn test_only_free_is_not_ordering() {
        assert!(!Relation::Free.is_ordering());
        assert!(Relation::LessEqual.is_ordering());
        assert!(Relation::Equal.is_ordering());
    }

    #[test]
    fn test_verbosity_ordering_matches_codes() {
        assert!(Verbosity::Critical < Verbosity::Important);
        assert_eq!(Verbosity::from_code(3), Some(Verbosity::Important));
        assert_eq!(Verbosity::from_code(7), None);
        assert_eq!(Verbosity::Full.code(), 6);
    }
}
