use super::CliError;
use anyhow::Context;
use sphbes_core::common::{load_quadrature_config, QuadratureConfig};
use sphbes_core::domain::SphbesError;
use sphbes_core::quadrature::{Samples, StridedSamples};
use std::fs;
use std::path::{Path, PathBuf};

/// Row-major numeric table read from a whitespace separated text file.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct SampleTable {
    columns: usize,
    data: Vec<f64>,
}

impl SampleTable {
    pub(super) fn columns(&self) -> usize {
        self.columns
    }

    pub(super) fn rows(&self) -> usize {
        self.data.len() / self.columns
    }

    pub(super) fn column(&self, index: usize) -> Result<StridedSamples<'_>, CliError> {
        StridedSamples::column_of(&self.data, self.columns, index).map_err(compute_error)
    }
}

pub(super) fn compute_error(error: impl Into<SphbesError>) -> CliError {
    CliError::Compute(error.into())
}

pub(super) fn load_config(path: Option<&PathBuf>) -> Result<QuadratureConfig, CliError> {
    match path {
        Some(path) => load_quadrature_config(path).map_err(compute_error),
        None => Ok(QuadratureConfig::default()),
    }
}

pub(super) fn read_sample_table(path: &Path) -> Result<SampleTable, CliError> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read sample table '{}'", path.display()))?;
    parse_sample_table(&source, path)
}

/// Accepts two columns `r f` or four columns `r f sin(kr) cos(kr)`; `#`
/// starts a comment.
pub(super) fn parse_sample_table(source: &str, path: &Path) -> Result<SampleTable, CliError> {
    let mut columns = 0;
    let mut data = Vec::new();

    for (line_index, line) in source.lines().enumerate() {
        let content = line.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let mut row_len = 0;
        for token in content.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| {
                CliError::Compute(SphbesError::input_validation(
                    "INPUT.TABLE_PARSE",
                    format!(
                        "{}:{}: '{}' is not a number",
                        path.display(),
                        line_index + 1,
                        token
                    ),
                ))
            })?;
            data.push(value);
            row_len += 1;
        }

        if columns == 0 {
            if row_len != 2 && row_len != 4 {
                return Err(CliError::Compute(SphbesError::input_validation(
                    "INPUT.TABLE_SHAPE",
                    format!(
                        "{}:{}: expected 2 columns (r f) or 4 columns (r f sin cos), found {}",
                        path.display(),
                        line_index + 1,
                        row_len
                    ),
                )));
            }
            columns = row_len;
        } else if row_len != columns {
            return Err(CliError::Compute(SphbesError::input_validation(
                "INPUT.TABLE_SHAPE",
                format!(
                    "{}:{}: row has {} columns, expected {}",
                    path.display(),
                    line_index + 1,
                    row_len,
                    columns
                ),
            )));
        }
    }

    if columns == 0 {
        return Err(CliError::Compute(SphbesError::input_validation(
            "INPUT.TABLE_EMPTY",
            format!("sample table '{}' contains no data rows", path.display()),
        )));
    }

    Ok(SampleTable { columns, data })
}

pub(super) fn tabulate_trig<S: Samples>(wave_number: f64, radii: &S) -> (Vec<f64>, Vec<f64>) {
    (0..radii.len())
        .map(|index| {
            let kr = wave_number * radii.element(index);
            (kr.sin(), kr.cos())
        })
        .unzip()
}
