pub mod config;
pub mod constants;

pub use config::{load_quadrature_config, ConfigError, QuadratureConfig};
