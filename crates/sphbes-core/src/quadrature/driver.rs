//! Mode-dispatching entry point.

use super::analytic::integrate_analytic;
use super::samples::{SampleGrid, Samples, TrigTables};
use super::trapezoidal::{integrate_trapezoidal_window, TrapezoidalInput};
use super::{ensure_finite, ensure_window, QuadratureError};
use crate::common::constants::{MAX_ANALYTIC_POWER, MAX_TRAPEZOIDAL_POWER};
use crate::domain::{IntegrationMode, IntegrationOutcome};
use crate::numerics::{NativeSphericalBessel, TrigKernel};
use tracing::debug;

/// Arrays and parameters of one driver call. `iend: None` means the end of
/// the grid.
#[derive(Debug, Clone, Copy)]
pub struct IntegrationRequest<S> {
    pub wave_number: f64,
    pub radii: S,
    pub values: S,
    pub sin_table: Option<S>,
    pub cos_table: Option<S>,
    pub ibegin: usize,
    pub iend: Option<usize>,
    pub order: usize,
    pub power: u32,
    pub crossover: f64,
}

impl<S> IntegrationRequest<S> {
    pub fn new(wave_number: f64, radii: S, values: S) -> Self {
        Self {
            wave_number,
            radii,
            values,
            sin_table: None,
            cos_table: None,
            ibegin: 0,
            iend: None,
            order: 0,
            power: 0,
            crossover: f64::INFINITY,
        }
    }

    pub fn with_trig_tables(mut self, sin: S, cos: S) -> Self {
        self.sin_table = Some(sin);
        self.cos_table = Some(cos);
        self
    }

    pub fn with_range(mut self, ibegin: usize, iend: Option<usize>) -> Self {
        self.ibegin = ibegin;
        self.iend = iend;
        self
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn with_power(mut self, power: u32) -> Self {
        self.power = power;
        self
    }

    pub fn with_crossover(mut self, crossover: f64) -> Self {
        self.crossover = crossover;
        self
    }
}

/// Parses `mode` and dispatches; unknown names fail with
/// [`QuadratureError::UnknownMode`] before any array is touched.
pub fn integrate_by_name<S: Samples>(
    mode: &str,
    request: IntegrationRequest<S>,
) -> Result<IntegrationOutcome, QuadratureError> {
    integrate(mode.parse()?, request)
}

/// Runs one pass.
///
/// Trapezoidal mode returns the stop index of the crossover test (the window
/// end when nothing crosses) and ignores any trig tables. Analytic modes
/// integrate the whole window, require `l = 0` and both tables, and report
/// the window end as `stop_index`.
pub fn integrate<S: Samples>(
    mode: IntegrationMode,
    request: IntegrationRequest<S>,
) -> Result<IntegrationOutcome, QuadratureError> {
    ensure_finite("k", request.wave_number)?;
    if request.crossover.is_nan() {
        return Err(QuadratureError::NonFiniteParameter {
            field: "kr_max",
            value: request.crossover,
        });
    }

    let grid = SampleGrid::new(request.radii, request.values)?;
    let iend = request.iend.unwrap_or(grid.len());
    ensure_window(request.ibegin, iend, grid.len())?;

    debug!(
        %mode,
        points = grid.len(),
        ibegin = request.ibegin,
        iend,
        k = request.wave_number,
        order = request.order,
        power = request.power,
        "dispatching quadrature pass"
    );

    match mode {
        IntegrationMode::Trapezoidal => {
            if request.power > MAX_TRAPEZOIDAL_POWER {
                return Err(QuadratureError::UnsupportedPower {
                    power: request.power,
                    max: MAX_TRAPEZOIDAL_POWER,
                });
            }
            if request.sin_table.is_some() || request.cos_table.is_some() {
                debug!("trig tables are not used by the trapezoidal pass");
            }
            let input = TrapezoidalInput::new(
                request.wave_number,
                request.order,
                request.power,
                request.crossover,
            );
            let outcome = integrate_trapezoidal_window(
                &NativeSphericalBessel,
                &grid,
                input,
                request.ibegin,
                iend,
            );
            Ok(IntegrationOutcome::new(outcome.stop_index, outcome.integral))
        }
        IntegrationMode::SinInteg | IntegrationMode::CosInteg => {
            if request.order != 0 {
                return Err(QuadratureError::UnsupportedOrder {
                    context: "analytic integration",
                    order: request.order,
                });
            }
            if request.power > MAX_ANALYTIC_POWER {
                return Err(QuadratureError::UnsupportedPower {
                    power: request.power,
                    max: MAX_ANALYTIC_POWER,
                });
            }
            let sin = request
                .sin_table
                .ok_or(QuadratureError::MissingTrigTable {
                    mode,
                    table: "sinkr",
                })?;
            let cos = request
                .cos_table
                .ok_or(QuadratureError::MissingTrigTable {
                    mode,
                    table: "coskr",
                })?;
            let tables = TrigTables::new(sin, cos, grid.len())?;

            let kernel = if mode == IntegrationMode::SinInteg {
                TrigKernel::Sin
            } else {
                TrigKernel::Cos
            };
            let value = integrate_analytic(
                kernel,
                &grid,
                &tables,
                request.wave_number,
                request.ibegin,
                iend,
                request.power,
            )?;
            Ok(IntegrationOutcome::new(iend, value))
        }
    }
}
