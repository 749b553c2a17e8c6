//! Binding error types.

use lpbind_core::{FormatError, ModelError};
use lpbind_solver::SolverError;

/// Failure category of a binding call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Argument has the wrong dynamic type
    TypeMismatch,
    /// Index, relation or integer outside its accepted range
    RangeViolation,
    /// Empty sequence, wrong tuple arity or wrong argument count
    ShapeViolation,
    /// The wrapped primitive rejected the call
    PrimitiveFailure,
    /// Handle was destroyed
    InvalidHandle,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 5] = [
        ErrorKind::TypeMismatch,
        ErrorKind::RangeViolation,
        ErrorKind::ShapeViolation,
        ErrorKind::PrimitiveFailure,
        ErrorKind::InvalidHandle,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::TypeMismatch => "TYPE_MISMATCH",
            ErrorKind::RangeViolation => "RANGE_VIOLATION",
            ErrorKind::ShapeViolation => "SHAPE_VIOLATION",
            ErrorKind::PrimitiveFailure => "PRIMITIVE_FAILURE",
            ErrorKind::InvalidHandle => "INVALID_HANDLE",
        }
    }
}

/// Errors returned by marshaled and forwarded calls.
#[derive(Debug, Clone, PartialEq)]
pub enum BindError {
    TypeMismatch {
        operation: &'static str,
        detail: String,
    },
    RangeViolation {
        operation: &'static str,
        detail: String,
    },
    ShapeViolation {
        operation: &'static str,
        detail: String,
    },
    PrimitiveFailure {
        operation: &'static str,
        detail: String,
    },
    InvalidHandle {
        operation: &'static str,
        detail: String,
    },
}

impl BindError {
    pub fn new(kind: ErrorKind, operation: &'static str, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        match kind {
            ErrorKind::TypeMismatch => BindError::TypeMismatch { operation, detail },
            ErrorKind::RangeViolation => BindError::RangeViolation { operation, detail },
            ErrorKind::ShapeViolation => BindError::ShapeViolation { operation, detail },
            ErrorKind::PrimitiveFailure => BindError::PrimitiveFailure { operation, detail },
            ErrorKind::InvalidHandle => BindError::InvalidHandle { operation, detail },
        }
    }

    pub fn type_mismatch(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch, operation, detail)
    }

    pub fn range(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::RangeViolation, operation, detail)
    }

    pub fn shape(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::ShapeViolation, operation, detail)
    }

    pub fn primitive(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::PrimitiveFailure, operation, detail)
    }

    pub fn invalid_handle(operation: &'static str) -> Self {
        Self::new(
            ErrorKind::InvalidHandle,
            operation,
            "model handle has been destroyed",
        )
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BindError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            BindError::RangeViolation { .. } => ErrorKind::RangeViolation,
            BindError::ShapeViolation { .. } => ErrorKind::ShapeViolation,
            BindError::PrimitiveFailure { .. } => ErrorKind::PrimitiveFailure,
            BindError::InvalidHandle { .. } => ErrorKind::InvalidHandle,
        }
    }

    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Name of the binding operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            BindError::TypeMismatch { operation, .. }
            | BindError::RangeViolation { operation, .. }
            | BindError::ShapeViolation { operation, .. }
            | BindError::PrimitiveFailure { operation, .. }
            | BindError::InvalidHandle { operation, .. } => operation,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            BindError::TypeMismatch { detail, .. }
            | BindError::RangeViolation { detail, .. }
            | BindError::ShapeViolation { detail, .. }
            | BindError::PrimitiveFailure { detail, .. }
            | BindError::InvalidHandle { detail, .. } => detail,
        }
    }

    pub(crate) fn from_model(operation: &'static str, err: &ModelError) -> Self {
        Self::primitive(operation, err.to_string())
    }

    pub(crate) fn from_format(operation: &'static str, err: &FormatError) -> Self {
        Self::primitive(operation, err.to_string())
    }

    pub(crate) fn from_solver(operation: &'static str, err: &SolverError) -> Self {
        Self::primitive(operation, err.to_string())
    }
}

impl std::fmt::Display for BindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code(), self.operation(), self.detail())
    }
}

impl std::error::Error for BindError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_code_and_operation() {
        let err = BindError::shape("add_constraintex", "row coefficients array is empty");
        assert_eq!(
            err.to_string(),
            "[SHAPE_VIOLATION] add_constraintex: row coefficients array is empty"
        );
        assert_eq!(err.kind(), ErrorKind::ShapeViolation);
    }

    #[test]
    fn test_new_matches_kind() {
        for kind in ErrorKind::ALL {
            let err = BindError::new(kind, "op", "detail");
            assert_eq!(err.kind(), kind);
            assert_eq!(err.code(), kind.code());
        }
    }

    #[test]
    fn test_primitive_wraps_model_error() {
        let err = BindError::from_model(
            "set_upbo",
            &ModelError::InvalidColumn {
                column: 9,
                columns: 2,
            },
        );
        assert_eq!(err.code(), "PRIMITIVE_FAILURE");
        assert!(err.detail().contains("COLUMN_INVALID_INDEX"));
    }
}
