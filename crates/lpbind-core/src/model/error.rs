//! Model error types.

/// Errors that can occur during model operations
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Column ordinal outside `1..=columns`
    InvalidColumn { column: i64, columns: usize },
    /// Row ordinal outside the accepted range
    InvalidRow { row: i64, rows: usize },
    /// Lower bound above upper bound, or NaN
    InvalidBounds { lower: f64, upper: f64 },
    /// Relation code not accepted by the operation
    InvalidRelation { code: i64 },
    /// Coefficient or right-hand side that is not a finite number
    InvalidNumber { value: f64 },
    /// Index and value buffers of different length
    LengthMismatch { indices: usize, values: usize },
    /// SOS type below 1
    InvalidSosType { sos_type: i32 },
    /// SOS member rejected by the type rules
    InvalidSosMember { column: i32, reason: &'static str },
    /// Operation not allowed while rows are being added
    RowModeActive { operation: &'static str },
    /// Parameter value outside its domain
    InvalidParameter { name: &'static str, value: String },
    /// Dense text row could not be parsed
    InvalidText { reason: String },
    /// Report or dump file could not be written
    Io { path: String, reason: String },
    /// No solve has produced results yet
    NoResults,
    /// Result index outside the recorded vector
    InvalidResultIndex { index: i64, len: usize },
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::InvalidColumn { .. } => "COLUMN_INVALID_INDEX",
            ModelError::InvalidRow { .. } => "ROW_INVALID_INDEX",
            ModelError::InvalidBounds { .. } => "BOUNDS_INVALID",
            ModelError::InvalidRelation { .. } => "RELATION_INVALID",
            ModelError::InvalidNumber { .. } => "NUMBER_INVALID",
            ModelError::LengthMismatch { .. } => "LENGTH_MISMATCH",
            ModelError::InvalidSosType { .. } => "SOS_INVALID_TYPE",
            ModelError::InvalidSosMember { .. } => "SOS_INVALID_MEMBER",
            ModelError::RowModeActive { .. } => "ROW_MODE_ACTIVE",
            ModelError::InvalidParameter { .. } => "PARAMETER_INVALID",
            ModelError::InvalidText { .. } => "PARSE_ERROR",
            ModelError::Io { .. } => "IO_ERROR",
            ModelError::NoResults => "RESULTS_UNAVAILABLE",
            ModelError::InvalidResultIndex { .. } => "RESULT_INVALID_INDEX",
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidColumn { column, columns } => write!(
                f,
                "[{}] Column {} out of range (columns = {})",
                self.code(),
                column,
                columns
            ),
            ModelError::InvalidRow { row, rows } => write!(
                f,
                "[{}] Row {} out of range (rows = {})",
                self.code(),
                row,
                rows
            ),
            ModelError::InvalidBounds { lower, upper } => write!(
                f,
                "[{}] Bounds invalid: lower ({}) > upper ({})",
                self.code(),
                lower,
                upper
            ),
            ModelError::InvalidRelation { code } => {
                write!(f, "[{}] Relation code {} is not allowed", self.code(), code)
            }
            ModelError::InvalidNumber { value } => {
                write!(f, "[{}] Value {} is not a finite number", self.code(), value)
            }
            ModelError::LengthMismatch { indices, values } => write!(
                f,
                "[{}] indices length ({}) must match values length ({})",
                self.code(),
                indices,
                values
            ),
            ModelError::InvalidSosType { sos_type } => write!(
                f,
                "[{}] SOS type must be at least 1 (got {})",
                self.code(),
                sos_type
            ),
            ModelError::InvalidSosMember { column, reason } => write!(
                f,
                "[{}] SOS member column {}: {}",
                self.code(),
                column,
                reason
            ),
            ModelError::RowModeActive { operation } => write!(
                f,
                "[{}] {} is not available while add_rowmode is on",
                self.code(),
                operation
            ),
            ModelError::InvalidParameter { name, value } => {
                write!(f, "[{}] Invalid value {} for {}", self.code(), value, name)
            }
            ModelError::InvalidText { reason } => {
                write!(f, "[{}] Invalid numeric row text: {}", self.code(), reason)
            }
            ModelError::Io { path, reason } => {
                write!(f, "[{}] Cannot write {}: {}", self.code(), path, reason)
            }
            ModelError::NoResults => {
                write!(f, "[{}] Model has no solve results", self.code())
            }
            ModelError::InvalidResultIndex { index, len } => write!(
                f,
                "[{}] Result index {} out of range (len = {})",
                self.code(),
                index,
                len
            ),
        }
    }
}

impl std::error::Error for ModelError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_code() {
        let err = ModelError::InvalidColumn {
            column: 99,
            columns: 2,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("[COLUMN_INVALID_INDEX]"));
        assert!(msg.contains("99"));
    }

    #[test]
    fn test_codes() {
        assert_eq!(
            ModelError::RowModeActive { operation: "get_mat" }.code(),
            "ROW_MODE_ACTIVE"
        );
        assert_eq!(
            ModelError::InvalidSosType { sos_type: 0 }.code(),
            "SOS_INVALID_TYPE"
        );
        assert_eq!(
            ModelError::LengthMismatch {
                indices: 1,
                values: 2
            }
            .code(),
            "LENGTH_MISMATCH"
        );
    }
}
