use super::CliError;
use super::helpers::*;
use serde::Serialize;
use sphbes_core::common::QuadratureConfig;
use sphbes_core::domain::IntegrationMode;
use sphbes_core::numerics::linear_grid;
use sphbes_core::quadrature::{
    integrate, integrate_hybrid, transform_on_grid, HybridInput, IntegrationRequest,
    StridedSamples,
};
use std::path::PathBuf;
use tracing::info;

#[derive(clap::Args)]
pub(super) struct TableArgs {
    /// Sample table with columns `r f` or `r f sin(kr) cos(kr)`
    #[arg(long)]
    input: PathBuf,

    /// JSON quadrature config; explicit flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
pub(super) struct KernelArgs {
    /// Spherical Bessel order l
    #[arg(long)]
    order: Option<usize>,

    /// Power n of the (kr)^n weight
    #[arg(long)]
    power: Option<u32>,

    /// Crossover argument kr_max; `inf` disables it
    #[arg(long)]
    crossover: Option<f64>,
}

#[derive(clap::Args)]
pub(super) struct IntegrateArgs {
    #[command(flatten)]
    table: TableArgs,

    #[command(flatten)]
    kernel: KernelArgs,

    /// Integration mode: trapezoidal, sin_integ or cos_integ
    #[arg(long)]
    mode: Option<String>,

    /// Wave number k
    #[arg(long)]
    k: Option<f64>,

    /// First sample index of the window
    #[arg(long)]
    ibegin: Option<usize>,

    /// One past the last sample index of the window
    #[arg(long)]
    iend: Option<usize>,
}

#[derive(clap::Args)]
pub(super) struct HybridArgs {
    #[command(flatten)]
    table: TableArgs,

    #[command(flatten)]
    kernel: KernelArgs,

    /// Wave number k
    #[arg(long)]
    k: Option<f64>,
}

#[derive(clap::Args)]
pub(super) struct TransformArgs {
    #[command(flatten)]
    table: TableArgs,

    #[command(flatten)]
    kernel: KernelArgs,

    /// First wave number of the output grid
    #[arg(long)]
    k_min: f64,

    /// Last wave number of the output grid
    #[arg(long)]
    k_max: f64,

    /// Number of wave numbers, at least 2
    #[arg(long)]
    count: usize,
}

impl KernelArgs {
    fn resolve(&self, config: &QuadratureConfig) -> (usize, u32, f64) {
        (
            self.order.unwrap_or(config.order),
            self.power.unwrap_or(config.power),
            self.crossover.unwrap_or(config.crossover),
        )
    }

    fn hybrid_input(&self, config: &QuadratureConfig, wave_number: f64) -> HybridInput {
        let (order, power, crossover) = self.resolve(config);
        let crossover = (!crossover.is_infinite()).then_some(crossover);
        HybridInput::new(wave_number, order, power, crossover)
    }
}

fn resolve_wave_number(flag: Option<f64>, config: &QuadratureConfig) -> Result<f64, CliError> {
    flag.or(config.wave_number).ok_or_else(|| {
        CliError::Usage("missing wave number: pass --k or set 'waveNumber' in the config".to_string())
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IntegrateReport {
    mode: &'static str,
    stop_index: usize,
    value: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HybridReport {
    crossover_index: usize,
    near_field: f64,
    far_field: f64,
    total: f64,
}

#[derive(Serialize)]
struct TransformPoint {
    k: f64,
    re: f64,
    im: f64,
}

pub(super) fn run_integrate_command(args: IntegrateArgs) -> Result<i32, CliError> {
    let config = load_config(args.table.config.as_ref())?;
    let mode: IntegrationMode = args
        .mode
        .as_deref()
        .unwrap_or(&config.mode)
        .parse()
        .map_err(compute_error)?;
    let wave_number = resolve_wave_number(args.k, &config)?;
    let (order, power, crossover) = args.kernel.resolve(&config);
    let ibegin = args.ibegin.unwrap_or(config.ibegin);
    let iend = args.iend.or(config.iend);

    let table = read_sample_table(&args.table.input)?;
    let radii = table.column(0)?;
    let values = table.column(1)?;

    let computed_trig;
    let trig = if table.columns() == 4 {
        Some((table.column(2)?, table.column(3)?))
    } else if mode.is_analytic() {
        computed_trig = tabulate_trig(wave_number, &radii);
        Some((
            StridedSamples::contiguous(&computed_trig.0),
            StridedSamples::contiguous(&computed_trig.1),
        ))
    } else {
        None
    };

    let mut request = IntegrationRequest::new(wave_number, radii, values)
        .with_range(ibegin, iend)
        .with_order(order)
        .with_power(power)
        .with_crossover(crossover);
    if let Some((sin, cos)) = trig {
        request = request.with_trig_tables(sin, cos);
    }

    info!(%mode, rows = table.rows(), "running integrate");
    let outcome = integrate(mode, request).map_err(compute_error)?;

    if args.table.json {
        print_json(&IntegrateReport {
            mode: mode.as_str(),
            stop_index: outcome.stop_index,
            value: outcome.value,
        })?;
    } else {
        println!("{} {:.15e}", outcome.stop_index, outcome.value);
    }
    Ok(0)
}

pub(super) fn run_hybrid_command(args: HybridArgs) -> Result<i32, CliError> {
    let config = load_config(args.table.config.as_ref())?;
    let wave_number = resolve_wave_number(args.k, &config)?;
    let input = args.kernel.hybrid_input(&config, wave_number);

    let table = read_sample_table(&args.table.input)?;
    let radii = table.column(0)?;
    let values = table.column(1)?;

    info!(rows = table.rows(), ?input, "running hybrid integral");
    let integral = integrate_hybrid(radii, values, input).map_err(compute_error)?;

    if args.table.json {
        print_json(&HybridReport {
            crossover_index: integral.crossover_index,
            near_field: integral.near_field,
            far_field: integral.far_field,
            total: integral.total(),
        })?;
    } else {
        println!("crossover index: {}", integral.crossover_index);
        println!("near field: {:.15e}", integral.near_field);
        println!("far field: {:.15e}", integral.far_field);
        println!("total: {:.15e}", integral.total());
    }
    Ok(0)
}

pub(super) fn run_transform_command(args: TransformArgs) -> Result<i32, CliError> {
    let config = load_config(args.table.config.as_ref())?;
    let wave_numbers = linear_grid(args.k_min, args.k_max, args.count).ok_or_else(|| {
        CliError::Usage(format!(
            "invalid wave-number grid count '{}'; expected at least 2 points",
            args.count
        ))
    })?;
    let template = args.kernel.hybrid_input(&config, 0.0);

    let table = read_sample_table(&args.table.input)?;
    let radii = table.column(0)?;
    let values = table.column(1)?;

    info!(rows = table.rows(), points = wave_numbers.len(), "running transform");
    let transform =
        transform_on_grid(radii, values, template, &wave_numbers).map_err(compute_error)?;

    if args.table.json {
        let points: Vec<TransformPoint> = wave_numbers
            .iter()
            .zip(&transform)
            .map(|(k, value)| TransformPoint {
                k: *k,
                re: value.re,
                im: value.im,
            })
            .collect();
        print_json(&points)?;
    } else {
        for (k, value) in wave_numbers.iter().zip(&transform) {
            println!("{:.15e} {:.15e} {:.15e}", k, value.re, value.im);
        }
    }
    Ok(0)
}

fn print_json<T: Serialize>(report: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(report)
        .map_err(|error| CliError::Internal(anyhow::Error::new(error)))?;
    println!("{rendered}");
    Ok(())
}
