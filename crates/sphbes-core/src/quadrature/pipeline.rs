//! Two-phase hybrid integral and the spherical Bessel transform built on it.
//!
//! Phase one runs the trapezoidal pass up to the crossover. Phase two uses
//! `j_0(x) = sin(x) / x` to fold the tail into a `sin_integ` call: for
//! `n >= 1` the tail integrand is `(kr)^(n-1) f sin(kr)`, for `n = 0` it is
//! `(f / kr) sin(kr)`.

use super::driver::{integrate, IntegrationRequest};
use super::samples::Samples;
use super::{ensure_finite, QuadratureError};
use crate::common::constants::{FOUR_PI, MAX_ANALYTIC_POWER, MAX_TRAPEZOIDAL_POWER};
use crate::domain::IntegrationMode;
use num_complex::Complex64;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridInput {
    pub wave_number: f64,
    pub order: usize,
    pub power: u32,
    /// `None` integrates the whole grid with the trapezoidal rule.
    pub crossover: Option<f64>,
}

impl HybridInput {
    pub const fn new(wave_number: f64, order: usize, power: u32, crossover: Option<f64>) -> Self {
        Self {
            wave_number,
            order,
            power,
            crossover,
        }
    }

    pub const fn with_wave_number(self, wave_number: f64) -> Self {
        Self {
            wave_number,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridIntegral {
    pub near_field: f64,
    pub far_field: f64,
    /// Index where the analytic tail starts; the grid length when there is
    /// no tail.
    pub crossover_index: usize,
}

impl HybridIntegral {
    pub fn total(&self) -> f64 {
        self.near_field + self.far_field
    }
}

/// `∫ j_l(kr) (kr)^n f(r) d(kr)` over the whole grid.
pub fn integrate_hybrid<S: Samples + Copy>(
    radii: S,
    values: S,
    input: HybridInput,
) -> Result<HybridIntegral, QuadratureError> {
    ensure_finite("k", input.wave_number)?;

    let crossover = match input.crossover {
        None => f64::INFINITY,
        Some(crossover) => {
            if input.order != 0 {
                return Err(QuadratureError::UnsupportedOrder {
                    context: "the analytic tail",
                    order: input.order,
                });
            }
            if input.power > MAX_ANALYTIC_POWER + 1 {
                return Err(QuadratureError::UnsupportedPower {
                    power: input.power,
                    max: MAX_ANALYTIC_POWER + 1,
                });
            }
            crossover
        }
    };

    let near = integrate(
        IntegrationMode::Trapezoidal,
        IntegrationRequest::new(input.wave_number, radii, values)
            .with_order(input.order)
            .with_power(input.power)
            .with_crossover(crossover),
    )?;

    let len = radii.len();
    if near.stop_index >= len {
        ensure_finite_result("hybrid integral", near.value)?;
        return Ok(HybridIntegral {
            near_field: near.value,
            far_field: 0.0,
            crossover_index: len,
        });
    }

    let start = near.stop_index;
    let tail_radii: Vec<f64> = (start..len).map(|index| radii.element(index)).collect();
    let tail_kr: Vec<f64> = tail_radii.iter().map(|r| input.wave_number * r).collect();
    let (tail_values, tail_power): (Vec<f64>, u32) = if input.power == 0 {
        if let Some(offset) = tail_kr.iter().position(|kr| *kr == 0.0) {
            return Err(QuadratureError::SingularTail {
                index: start + offset,
            });
        }
        let scaled = (start..len)
            .zip(&tail_kr)
            .map(|(index, kr)| values.element(index) / kr)
            .collect();
        (scaled, 0)
    } else {
        let tail = (start..len).map(|index| values.element(index)).collect();
        (tail, input.power - 1)
    };
    let sin: Vec<f64> = tail_kr.iter().map(|kr| kr.sin()).collect();
    let cos: Vec<f64> = tail_kr.iter().map(|kr| kr.cos()).collect();

    debug!(
        crossover_index = start,
        kr = tail_kr[0],
        tail_points = tail_kr.len(),
        "handing tail to the analytic sin pass"
    );

    let far = integrate(
        IntegrationMode::SinInteg,
        IntegrationRequest::new(input.wave_number, &tail_radii[..], &tail_values[..])
            .with_trig_tables(&sin[..], &cos[..])
            .with_power(tail_power),
    )?;

    let integral = HybridIntegral {
        near_field: near.value,
        far_field: far.value,
        crossover_index: start,
    };
    ensure_finite_result("hybrid integral", integral.total())?;
    Ok(integral)
}

/// `4π (-i)^l ∫ r^n j_l(kr) f(r) dr`, evaluated as
/// `4π (-i)^l k^-(n+1) ∫ (kr)^n j_l(kr) f d(kr)`.
pub fn spherical_bessel_transform<S: Samples + Copy>(
    radii: S,
    values: S,
    input: HybridInput,
) -> Result<Complex64, QuadratureError> {
    let k = input.wave_number;
    if !(k.is_finite() && k > 0.0) {
        return Err(QuadratureError::NonPositiveWaveNumber { value: k });
    }

    let exponent = i32::try_from(input.power)
        .ok()
        .and_then(|power| power.checked_add(1))
        .ok_or(QuadratureError::UnsupportedPower {
            power: input.power,
            max: MAX_TRAPEZOIDAL_POWER,
        })?;

    let integral = integrate_hybrid(radii, values, input)?.total();
    let magnitude = FOUR_PI * integral / k.powi(exponent);
    ensure_finite_result("spherical Bessel transform", magnitude)?;
    Ok(phase(input.order) * magnitude)
}

fn ensure_finite_result(quantity: &'static str, value: f64) -> Result<(), QuadratureError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(QuadratureError::NonFiniteResult { quantity, value })
    }
}

/// Transform evaluated at every wave number in `wave_numbers`; `template`
/// supplies order, power and crossover.
pub fn transform_on_grid<S: Samples + Copy>(
    radii: S,
    values: S,
    template: HybridInput,
    wave_numbers: &[f64],
) -> Result<Vec<Complex64>, QuadratureError> {
    wave_numbers
        .iter()
        .map(|&k| spherical_bessel_transform(radii, values, template.with_wave_number(k)))
        .collect()
}

/// `(-i)^l`
fn phase(order: usize) -> Complex64 {
    match order % 4 {
        0 => Complex64::new(1.0, 0.0),
        1 => Complex64::new(0.0, -1.0),
        2 => Complex64::new(-1.0, 0.0),
        _ => Complex64::new(0.0, 1.0),
    }
}
