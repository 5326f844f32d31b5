//! Analytic far-field pass.
//!
//! On each segment `[kr1, kr2]` the data is replaced by the line
//! `a0 + a1 x` through its endpoints and `(a0 + a1 x) x^n K(x)` is integrated
//! exactly, `K` being `sin` or `cos`. The trig values come from the caller's
//! tables and are never recomputed.

use super::samples::{SampleGrid, Samples, TrigTables};
use super::{ensure_finite, ensure_window, QuadratureError};
use crate::common::constants::MAX_ANALYTIC_POWER;
use crate::numerics::TrigKernel;

/// `∫ f(r) (kr)^n sin(kr) d(kr)` over `[ibegin, iend)`.
pub fn integrate_sin<S: Samples>(
    grid: &SampleGrid<S>,
    tables: &TrigTables<S>,
    wave_number: f64,
    ibegin: usize,
    iend: usize,
    power: u32,
) -> Result<f64, QuadratureError> {
    integrate_analytic(TrigKernel::Sin, grid, tables, wave_number, ibegin, iend, power)
}

/// `∫ f(r) (kr)^n cos(kr) d(kr)` over `[ibegin, iend)`.
pub fn integrate_cos<S: Samples>(
    grid: &SampleGrid<S>,
    tables: &TrigTables<S>,
    wave_number: f64,
    ibegin: usize,
    iend: usize,
    power: u32,
) -> Result<f64, QuadratureError> {
    integrate_analytic(TrigKernel::Cos, grid, tables, wave_number, ibegin, iend, power)
}

pub fn integrate_analytic<S: Samples>(
    kernel: TrigKernel,
    grid: &SampleGrid<S>,
    tables: &TrigTables<S>,
    wave_number: f64,
    ibegin: usize,
    iend: usize,
    power: u32,
) -> Result<f64, QuadratureError> {
    let unsupported = || QuadratureError::UnsupportedPower {
        power,
        max: MAX_ANALYTIC_POWER,
    };
    if power > MAX_ANALYTIC_POWER {
        return Err(unsupported());
    }
    ensure_finite("k", wave_number)?;
    ensure_window(ibegin, iend, grid.len())?;

    let lower = kernel.antiderivative(power).ok_or_else(unsupported)?;
    let upper = kernel.antiderivative(power + 1).ok_or_else(unsupported)?;

    let mut kr1 = wave_number * grid.radius(ibegin);
    let mut y1 = grid.value(ibegin);
    let (sin1, cos1) = (tables.sin(ibegin), tables.cos(ibegin));
    let mut lower1 = lower(kr1, sin1, cos1);
    let mut upper1 = upper(kr1, sin1, cos1);
    let mut integral = 0.0;

    for index in (ibegin + 1)..iend {
        let kr2 = wave_number * grid.radius(index);
        let y2 = grid.value(index);
        let (sin2, cos2) = (tables.sin(index), tables.cos(index));

        let width = kr2 - kr1;
        if width == 0.0 {
            return Err(QuadratureError::ZeroWidthSegment { index, kr: kr2 });
        }

        let slope = (y2 - y1) / width;
        let intercept = (y1 * kr2 - y2 * kr1) / width;
        let lower2 = lower(kr2, sin2, cos2);
        let upper2 = upper(kr2, sin2, cos2);
        integral += intercept * (lower2 - lower1) + slope * (upper2 - upper1);

        kr1 = kr2;
        y1 = y2;
        lower1 = lower2;
        upper1 = upper2;
    }

    Ok(integral)
}

#[cfg(test)]
mod tests {
    use super::{integrate_analytic, integrate_cos, integrate_sin};
    use crate::numerics::TrigKernel;
    use crate::quadrature::{QuadratureError, QuadratureErrorKind, SampleGrid, TrigTables};

    const WAVE_NUMBER: f64 = 0.7;
    const RADII: [f64; 7] = [3.0, 3.4, 4.1, 5.5, 6.0, 8.25, 9.0];

    struct LinearCase {
        kernel: TrigKernel,
        power: u32,
        expected: f64,
    }

    fn linear_data() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let values = RADII.iter().map(|r| 2.0 + 0.5 * WAVE_NUMBER * r).collect();
        let sin = RADII.iter().map(|r| (WAVE_NUMBER * r).sin()).collect();
        let cos = RADII.iter().map(|r| (WAVE_NUMBER * r).cos()).collect();
        (values, sin, cos)
    }

    #[test]
    fn linear_data_is_integrated_exactly_on_non_uniform_grids() {
        // mpmath quad of (2 + x/2) x^n K(x) over [2.1, 6.3]
        let cases = [
            LinearCase { kernel: TrigKernel::Sin, power: 0, expected: -7.112_250_329_486_414_2 },
            LinearCase { kernel: TrigKernel::Cos, power: 0, expected: -1.793_844_610_293_028_2 },
            LinearCase { kernel: TrigKernel::Sin, power: 1, expected: -37.568_851_045_678_995 },
            LinearCase { kernel: TrigKernel::Cos, power: 1, expected: 6.231_762_184_834_973_9 },
            LinearCase { kernel: TrigKernel::Sin, power: 2, expected: -192.065_536_045_556_92 },
            LinearCase { kernel: TrigKernel::Cos, power: 2, expected: 88.121_412_268_499_609 },
        ];

        let (values, sin, cos) = linear_data();
        let grid = SampleGrid::new(&RADII[..], &values[..]).expect("grid");
        let tables = TrigTables::new(&sin[..], &cos[..], RADII.len()).expect("tables");

        for case in cases {
            let actual = integrate_analytic(
                case.kernel,
                &grid,
                &tables,
                WAVE_NUMBER,
                0,
                RADII.len(),
                case.power,
            )
            .expect("supported power");
            assert_scalar_close(
                &format!("{:?} n={}", case.kernel, case.power),
                case.expected,
                actual,
                1.0e-11,
                1.0e-12,
            );
        }

        let window = integrate_sin(&grid, &tables, WAVE_NUMBER, 2, 5, 1).expect("window");
        assert_scalar_close("window", -7.291_937_240_396_408_2, window, 1.0e-12, 1.0e-12);
    }

    #[test]
    fn constant_data_reproduces_the_cosine_difference() {
        let radii = [3.0, 4.0, 5.0];
        let values = [1.0; 3];
        let sin = radii.map(f64::sin);
        let cos = radii.map(f64::cos);
        let grid = SampleGrid::new(&radii, &values).expect("grid");
        let tables = TrigTables::new(&sin, &cos, 3).expect("tables");

        let value = integrate_sin(&grid, &tables, 1.0, 0, 2, 0).expect("integral");
        assert_scalar_close("cos3 - cos4", 3.0_f64.cos() - 4.0_f64.cos(), value, 1.0e-15, 1.0e-14);
        assert_scalar_close("reference", -0.336_348_875_736_833_5, value, 1.0e-15, 1.0e-14);

        let value = integrate_cos(&grid, &tables, 1.0, 0, 3, 0).expect("integral");
        assert_scalar_close("sin5 - sin3", 5.0_f64.sin() - 3.0_f64.sin(), value, 1.0e-15, 1.0e-14);

        assert_eq!(integrate_sin(&grid, &tables, 1.0, 1, 2, 2), Ok(0.0));
    }

    #[test]
    fn tabulated_trig_values_are_used_as_given() {
        // tables belong to kr = 0.5, 1.5 while the grid maps to kr = 1, 2
        let radii = [1.0, 2.0];
        let values = [1.0, 1.0];
        let sin = [0.5_f64.sin(), 1.5_f64.sin()];
        let cos = [0.5_f64.cos(), 1.5_f64.cos()];
        let grid = SampleGrid::new(&radii, &values).expect("grid");
        let tables = TrigTables::new(&sin, &cos, 2).expect("tables");

        let value = integrate_sin(&grid, &tables, 1.0, 0, 2, 0).expect("integral");
        assert_eq!(value, -cos[1] + cos[0]);
    }

    #[test]
    fn rejects_unsupported_configurations() {
        let (values, sin, cos) = linear_data();
        let grid = SampleGrid::new(&RADII[..], &values[..]).expect("grid");
        let tables = TrigTables::new(&sin[..], &cos[..], RADII.len()).expect("tables");

        let error = integrate_cos(&grid, &tables, WAVE_NUMBER, 0, 7, 3).expect_err("n=3");
        assert_eq!(error, QuadratureError::UnsupportedPower { power: 3, max: 2 });
        assert_eq!(error.kind(), QuadratureErrorKind::UnsupportedConfiguration);

        for (ibegin, iend) in [(3, 3), (5, 2), (0, 8)] {
            let error =
                integrate_sin(&grid, &tables, WAVE_NUMBER, ibegin, iend, 0).expect_err("range");
            assert_eq!(
                error,
                QuadratureError::InvalidRange {
                    ibegin,
                    iend,
                    len: RADII.len(),
                }
            );
        }

        let error = integrate_sin(&grid, &tables, f64::NAN, 0, 7, 0).expect_err("nan k");
        assert!(matches!(error, QuadratureError::NonFiniteParameter { field: "k", .. }));
    }

    #[test]
    fn zero_wave_number_collapses_every_segment() {
        let (values, sin, cos) = linear_data();
        let grid = SampleGrid::new(&RADII[..], &values[..]).expect("grid");
        let tables = TrigTables::new(&sin[..], &cos[..], RADII.len()).expect("tables");

        let error = integrate_sin(&grid, &tables, 0.0, 0, 7, 1).expect_err("k=0");
        assert_eq!(error, QuadratureError::ZeroWidthSegment { index: 1, kr: 0.0 });
        assert_eq!(error.kind(), QuadratureErrorKind::DegenerateGrid);
    }

    fn assert_scalar_close(label: &str, expected: f64, actual: f64, abs_tol: f64, rel_tol: f64) {
        let abs_diff = (actual - expected).abs();
        let rel_diff = abs_diff / expected.abs().max(1.0e-300);
        assert!(
            abs_diff <= abs_tol || rel_diff <= rel_tol,
            "{label} expected={expected:.15e} actual={actual:.15e} abs_diff={abs_diff:.15e} rel_diff={rel_diff:.15e}"
        );
    }
}
