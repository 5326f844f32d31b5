//! Hybrid quadrature of spherical-Bessel integrals over tabulated radial data.
//!
//! The near field is integrated with the trapezoidal rule against the exact
//! spherical Bessel kernel; past a crossover argument the sampled function is
//! treated as piecewise linear in `kr` and integrated in closed form against
//! `sin(kr)` or `cos(kr)`.

pub mod common;
pub mod domain;
pub mod numerics;
pub mod quadrature;

pub use domain::{ErrorCategory, IntegrationMode, IntegrationOutcome, SphbesError};
pub use quadrature::{
    integrate, integrate_cos, integrate_hybrid, integrate_sin, integrate_trapezoidal,
    spherical_bessel_transform, transform_on_grid, HybridInput, HybridIntegral,
    IntegrationRequest, QuadratureError, QuadratureErrorKind, SampleGrid, Samples,
    StridedSamples, TrapezoidalInput, TrigTables,
};
