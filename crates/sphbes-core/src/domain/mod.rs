pub mod errors;

pub use errors::{ErrorCategory, SphbesError};

use crate::quadrature::QuadratureError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Integration strategy selected for a single driver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegrationMode {
    /// Trapezoidal rule against the exact `j_l(kr)` kernel.
    Trapezoidal,
    /// Piecewise-linear data integrated exactly against `sin(kr)`.
    SinInteg,
    /// Piecewise-linear data integrated exactly against `cos(kr)`.
    CosInteg,
}

impl IntegrationMode {
    pub const ALL: [Self; 3] = [Self::Trapezoidal, Self::SinInteg, Self::CosInteg];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trapezoidal => "trapezoidal",
            Self::SinInteg => "sin_integ",
            Self::CosInteg => "cos_integ",
        }
    }

    pub const fn is_analytic(self) -> bool {
        matches!(self, Self::SinInteg | Self::CosInteg)
    }
}

impl Display for IntegrationMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

impl FromStr for IntegrationMode {
    type Err = QuadratureError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == name)
            .ok_or_else(|| QuadratureError::UnknownMode {
                name: name.to_string(),
            })
    }
}

/// Result of one driver call. `value` is the contribution of this call only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationOutcome {
    pub stop_index: usize,
    pub value: f64,
}

impl IntegrationOutcome {
    pub const fn new(stop_index: usize, value: f64) -> Self {
        Self { stop_index, value }
    }
}
