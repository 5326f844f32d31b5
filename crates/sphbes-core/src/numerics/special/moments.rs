//! Closed-form antiderivatives of `x^n sin(x)` and `x^n cos(x)` for `n <= 3`.
//!
//! `sin(x)` and `cos(x)` are passed in rather than recomputed so the analytic
//! tail integrator stays consistent with the trig tables its caller supplied.

/// Antiderivative of `x^n sin(x)` or `x^n cos(x)` as a function of
/// `(x, sin(x), cos(x))`.
pub type MomentFn = fn(f64, f64, f64) -> f64;

/// `∫ sin(x) dx`
#[inline]
pub fn sin_integ0(_x: f64, _sinx: f64, cosx: f64) -> f64 {
    -cosx
}

/// `∫ x sin(x) dx`
#[inline]
pub fn sin_integ1(x: f64, sinx: f64, cosx: f64) -> f64 {
    sinx - x * cosx
}

/// `∫ x^2 sin(x) dx`
#[inline]
pub fn sin_integ2(x: f64, sinx: f64, cosx: f64) -> f64 {
    (2.0 - x * x) * cosx + 2.0 * x * sinx
}

/// `∫ x^3 sin(x) dx`
#[inline]
pub fn sin_integ3(x: f64, sinx: f64, cosx: f64) -> f64 {
    3.0 * (x * x - 2.0) * sinx - x * (x * x - 6.0) * cosx
}

/// `∫ cos(x) dx`
#[inline]
pub fn cos_integ0(_x: f64, sinx: f64, _cosx: f64) -> f64 {
    sinx
}

/// `∫ x cos(x) dx`
#[inline]
pub fn cos_integ1(x: f64, sinx: f64, cosx: f64) -> f64 {
    x * sinx + cosx
}

/// `∫ x^2 cos(x) dx`
#[inline]
pub fn cos_integ2(x: f64, sinx: f64, cosx: f64) -> f64 {
    (x * x - 2.0) * sinx + 2.0 * x * cosx
}

/// `∫ x^3 cos(x) dx`
#[inline]
pub fn cos_integ3(x: f64, sinx: f64, cosx: f64) -> f64 {
    (3.0 * x * x - 6.0) * cosx + (x * x * x - 6.0 * x) * sinx
}

const SIN_MOMENTS: [MomentFn; 4] = [sin_integ0, sin_integ1, sin_integ2, sin_integ3];
const COS_MOMENTS: [MomentFn; 4] = [cos_integ0, cos_integ1, cos_integ2, cos_integ3];

/// Oscillatory weight of the analytic tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrigKernel {
    Sin,
    Cos,
}

impl TrigKernel {
    pub const MAX_DEGREE: u32 = 3;

    /// Antiderivative of `x^degree` times this kernel, `None` past degree 3.
    pub fn antiderivative(self, degree: u32) -> Option<MomentFn> {
        let table = match self {
            Self::Sin => &SIN_MOMENTS,
            Self::Cos => &COS_MOMENTS,
        };
        table.get(degree as usize).copied()
    }

    /// Kernel value at `x` given the tabulated `sin(x)` and `cos(x)`.
    pub fn weight(self, sinx: f64, cosx: f64) -> f64 {
        match self {
            Self::Sin => sinx,
            Self::Cos => cosx,
        }
    }
}
