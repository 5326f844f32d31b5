use crate::common::ConfigError;
use crate::quadrature::{QuadratureError, QuadratureErrorKind};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure class at the process boundary; each maps to a fixed exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    InputValidationError,
    IoSystemError,
    ComputationError,
}

impl ErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ComputationError => "ComputationError",
        }
    }
}

/// Boundary error: a category with a stable exit code, a placeholder token
/// naming the failing check and a human readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SphbesError {
    category: ErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl SphbesError {
    pub fn new(
        category: ErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn input_validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::InputValidationError, placeholder, message)
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn computation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::ComputationError, placeholder, message)
    }

    pub const fn category(&self) -> ErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder, self.message)
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}

impl Display for SphbesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.name(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for SphbesError {}

impl From<QuadratureError> for SphbesError {
    fn from(error: QuadratureError) -> Self {
        let message = error.to_string();
        match error.kind() {
            QuadratureErrorKind::ShapeMismatch => {
                Self::input_validation("INPUT.SHAPE_MISMATCH", message)
            }
            QuadratureErrorKind::UnsupportedConfiguration => {
                Self::input_validation("INPUT.UNSUPPORTED_CONFIGURATION", message)
            }
            QuadratureErrorKind::UnknownMode => {
                Self::input_validation("INPUT.UNKNOWN_MODE", message)
            }
            QuadratureErrorKind::DegenerateGrid => {
                Self::input_validation("INPUT.DEGENERATE_GRID", message)
            }
            QuadratureErrorKind::NonFiniteResult => {
                Self::computation("COMPUTE.NON_FINITE_RESULT", message)
            }
        }
    }
}

impl From<ConfigError> for SphbesError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::Read { .. } => Self::io_system("IO.CONFIG_READ", error.to_string()),
            ConfigError::Parse { .. } => {
                Self::input_validation("INPUT.CONFIG_PARSE", error.to_string())
            }
        }
    }
}
