pub mod analytic;
pub mod driver;
pub mod pipeline;
pub mod samples;
pub mod trapezoidal;

pub use analytic::{integrate_analytic, integrate_cos, integrate_sin};
pub use driver::{integrate, integrate_by_name, IntegrationRequest};
pub use pipeline::{
    integrate_hybrid, spherical_bessel_transform, transform_on_grid, HybridInput, HybridIntegral,
};
pub use samples::{SampleGrid, Samples, StridedSamples, TrigTables};
pub use trapezoidal::{
    integrate_trapezoidal, integrate_trapezoidal_with, TrapezoidalInput, TrapezoidalOutcome,
};

use crate::domain::IntegrationMode;
use thiserror::Error;

/// Coarse classification reported at the library boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuadratureErrorKind {
    ShapeMismatch,
    UnsupportedConfiguration,
    UnknownMode,
    DegenerateGrid,
    NonFiniteResult,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadratureError {
    #[error("array '{field}' has length {actual}, expected {expected}")]
    ShapeMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("sample grid must contain at least one point")]
    EmptyGrid,
    #[error(
        "strided view offset={offset} stride={stride} len={len} does not fit a buffer of {buffer_len} elements"
    )]
    StrideOutOfBounds {
        offset: usize,
        stride: usize,
        len: usize,
        buffer_len: usize,
    },
    #[error("column {column} is out of range for a table with {columns} columns")]
    ColumnOutOfRange { column: usize, columns: usize },
    #[error("flat buffer of {buffer_len} elements does not split into rows of {columns} columns")]
    RaggedTable { buffer_len: usize, columns: usize },
    #[error("integration range [{ibegin}, {iend}) is not a non-empty window of a {len}-point grid")]
    InvalidRange {
        ibegin: usize,
        iend: usize,
        len: usize,
    },
    #[error("mode '{mode}' requires the '{table}' table")]
    MissingTrigTable {
        mode: IntegrationMode,
        table: &'static str,
    },
    #[error("{context} supports only order l=0, got l={order}")]
    UnsupportedOrder { context: &'static str, order: usize },
    #[error("power n={power} exceeds the supported maximum {max}")]
    UnsupportedPower { power: u32, max: u32 },
    #[error("parameter '{field}' must be finite, got {value}")]
    NonFiniteParameter { field: &'static str, value: f64 },
    #[error("wave number must be positive and finite, got {value}")]
    NonPositiveWaveNumber { value: f64 },
    #[error("unknown integration mode '{name}' (expected trapezoidal, sin_integ or cos_integ)")]
    UnknownMode { name: String },
    #[error("radius at index {index} is not finite: {value}")]
    NonFiniteRadius { index: usize, value: f64 },
    #[error("radii must increase strictly: r[{index}]={current} follows {previous}")]
    NonIncreasingRadius {
        index: usize,
        previous: f64,
        current: f64,
    },
    #[error("segment ending at index {index} has zero width in kr (kr={kr})")]
    ZeroWidthSegment { index: usize, kr: f64 },
    #[error("the n=0 tail divides f by kr, which vanishes at index {index}")]
    SingularTail { index: usize },
    #[error("{quantity} is not finite: {value}")]
    NonFiniteResult { quantity: &'static str, value: f64 },
}

impl QuadratureError {
    pub fn kind(&self) -> QuadratureErrorKind {
        match self {
            Self::ShapeMismatch { .. }
            | Self::EmptyGrid
            | Self::StrideOutOfBounds { .. }
            | Self::ColumnOutOfRange { .. }
            | Self::RaggedTable { .. } => QuadratureErrorKind::ShapeMismatch,
            Self::InvalidRange { .. }
            | Self::MissingTrigTable { .. }
            | Self::UnsupportedOrder { .. }
            | Self::UnsupportedPower { .. }
            | Self::NonFiniteParameter { .. }
            | Self::NonPositiveWaveNumber { .. } => QuadratureErrorKind::UnsupportedConfiguration,
            Self::UnknownMode { .. } => QuadratureErrorKind::UnknownMode,
            Self::NonFiniteRadius { .. }
            | Self::NonIncreasingRadius { .. }
            | Self::ZeroWidthSegment { .. }
            | Self::SingularTail { .. } => QuadratureErrorKind::DegenerateGrid,
            Self::NonFiniteResult { .. } => QuadratureErrorKind::NonFiniteResult,
        }
    }
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<(), QuadratureError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(QuadratureError::NonFiniteParameter { field, value })
    }
}

/// Validates `[ibegin, iend)` against a grid of `len` points.
pub(crate) fn ensure_window(ibegin: usize, iend: usize, len: usize) -> Result<(), QuadratureError> {
    if ibegin < iend && iend <= len {
        Ok(())
    } else {
        Err(QuadratureError::InvalidRange { ibegin, iend, len })
    }
}
