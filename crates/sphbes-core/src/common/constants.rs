//! Shared numerical constants.

pub const PI: f64 = 3.141_592_653_589_793_238_462_643_383_279_5_f64;
pub const HALF_PI: f64 = PI / 2.0;
pub const FOUR_PI: f64 = 4.0 * PI;

/// Default crossover argument `kr_max` between the trapezoidal near field and
/// the analytic tail.
pub const DEFAULT_CROSSOVER: f64 = 10.0;

/// Highest power `n` the analytic tail supports; the moment kernels stop at
/// degree `n + 1 = 3`.
pub const MAX_ANALYTIC_POWER: u32 = 2;

/// Highest power `n` the trapezoidal pass accepts; the transform raises `k`
/// to `n + 1`, which must still fit an `i32` exponent.
pub const MAX_TRAPEZOIDAL_POWER: u32 = (i32::MAX - 1) as u32;
