//! Trapezoidal near-field pass over `j_l(kr) (kr)^n f(r)`.

use super::samples::{SampleGrid, Samples};
use crate::numerics::{NativeSphericalBessel, SphericalBesselKernel};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapezoidalInput {
    pub wave_number: f64,
    pub order: usize,
    pub power: u32,
    /// Crossover argument `kr_max`; `f64::INFINITY` integrates the whole grid.
    pub crossover: f64,
}

impl TrapezoidalInput {
    pub const fn new(wave_number: f64, order: usize, power: u32, crossover: f64) -> Self {
        Self {
            wave_number,
            order,
            power,
            crossover,
        }
    }
}

/// `stop_index` is the first index with `k r > kr_max` (its segment is
/// included in `integral`), or the end of the window when none crosses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapezoidalOutcome {
    pub stop_index: usize,
    pub integral: f64,
}

pub fn integrate_trapezoidal<S: Samples>(
    grid: &SampleGrid<S>,
    input: TrapezoidalInput,
) -> TrapezoidalOutcome {
    integrate_trapezoidal_with(&NativeSphericalBessel, grid, input)
}

pub fn integrate_trapezoidal_with<K, S>(
    kernel: &K,
    grid: &SampleGrid<S>,
    input: TrapezoidalInput,
) -> TrapezoidalOutcome
where
    K: SphericalBesselKernel + ?Sized,
    S: Samples,
{
    integrate_trapezoidal_window(kernel, grid, input, 0, grid.len())
}

/// Window form used by the driver; `[ibegin, iend)` must already be a valid
/// non-empty window of `grid`.
pub(crate) fn integrate_trapezoidal_window<K, S>(
    kernel: &K,
    grid: &SampleGrid<S>,
    input: TrapezoidalInput,
    ibegin: usize,
    iend: usize,
) -> TrapezoidalOutcome
where
    K: SphericalBesselKernel + ?Sized,
    S: Samples,
{
    debug_assert!(ibegin < iend && iend <= grid.len());

    let exponent = i32::try_from(input.power).ok();
    let weight = |kr: f64| match exponent {
        Some(exponent) => kr.powi(exponent),
        None => kr.powf(f64::from(input.power)),
    };
    let integrand = |kr: f64, value: f64| kernel.evaluate(input.order, kr) * weight(kr) * value;

    let mut kr1 = input.wave_number * grid.radius(ibegin);
    let mut y1 = integrand(kr1, grid.value(ibegin));
    let mut integral = 0.0;

    for index in (ibegin + 1)..iend {
        let kr2 = input.wave_number * grid.radius(index);
        let y2 = integrand(kr2, grid.value(index));
        integral += 0.5 * (y1 + y2) * (kr2 - kr1);

        if kr2 > input.crossover {
            trace!(stop_index = index, kr = kr2, "trapezoidal pass crossed kr_max");
            return TrapezoidalOutcome {
                stop_index: index,
                integral,
            };
        }

        kr1 = kr2;
        y1 = y2;
    }

    TrapezoidalOutcome {
        stop_index: iend,
        integral,
    }
}
