use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, Result};

pub const SEED_VAR: &str = "MATSPEED_SEED";
pub const LARGE_SIZE_VAR: &str = "MATSPEED_LARGE_SIZE";
pub const REDUCTION_SIZE_VAR: &str = "MATSPEED_REDUCTION_SIZE";
pub const TELEMETRY_VAR: &str = "MATSPEED_TELEMETRY";

/// Sizes and seed for one demo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub example_rows: usize,
    pub example_cols: usize,
    /// Side length of the square matrices used for the timing comparison.
    pub large_size: usize,
    /// Side length of the square matrix used for the full-reduction comparison.
    pub reduction_size: usize,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            example_rows: 2,
            example_cols: 3,
            large_size: 1000,
            reduction_size: 500,
            seed: None,
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Applies overrides from `lookup` on top of the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(seed) = parse_var(&lookup, SEED_VAR)? {
            config.seed = Some(seed);
        }
        if let Some(size) = parse_var(&lookup, LARGE_SIZE_VAR)? {
            config.large_size = size;
        }
        if let Some(size) = parse_var(&lookup, REDUCTION_SIZE_VAR)? {
            config.reduction_size = size;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.large_size == 0 {
            return Err(MatrixError::InvalidArgument {
                op: "demo_config",
                msg: "large_size must be > 0".to_string(),
            });
        }
        if self.reduction_size == 0 {
            return Err(MatrixError::InvalidArgument {
                op: "demo_config",
                msg: "reduction_size must be > 0".to_string(),
            });
        }
        check_numel("example", self.example_rows, self.example_cols)?;
        check_numel("large_size", self.large_size, self.large_size)?;
        check_numel("reduction_size", self.reduction_size, self.reduction_size)?;
        Ok(())
    }
}

fn check_numel(name: &str, rows: usize, cols: usize) -> Result<()> {
    match rows.checked_mul(cols) {
        Some(_) => Ok(()),
        None => Err(MatrixError::InvalidArgument {
            op: "demo_config",
            msg: format!("{name}: element count of {rows}x{cols} overflows usize"),
        }),
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|err| MatrixError::InvalidArgument {
                op: "demo_config",
                msg: format!("{var}={raw:?}: {err}"),
            }),
    }
}
