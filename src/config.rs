//! Runtime configuration for the terminal game.
//!
//! Values come from environment variables first, then command-line flags
//! (flags win):
//!
//! | Variable | Flag | Default |
//! |----------|------|---------|
//! | `CHEM_SORT_LEVEL` | `--level N` | 1 |
//! | `CHEM_SORT_SEED` | `--seed N` | system clock |
//! | `CHEM_SORT_CATALOG` | `--catalog PATH` | built-in catalog |
//! | `CHEM_SORT_USER` | `--user ID` | 1 |
//! | `CHEM_SORT_USERNAME` | `--username NAME` | none (play as `--user`) |

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::core::Catalog;
use crate::types::FIRST_LEVEL;

pub const ENV_LEVEL: &str = "CHEM_SORT_LEVEL";
pub const ENV_SEED: &str = "CHEM_SORT_SEED";
pub const ENV_CATALOG: &str = "CHEM_SORT_CATALOG";
pub const ENV_USER: &str = "CHEM_SORT_USER";
pub const ENV_USERNAME: &str = "CHEM_SORT_USERNAME";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub level: u32,
    pub seed: Option<u64>,
    pub catalog_path: Option<PathBuf>,
    pub user_id: u64,
    /// Named account to create and play as; overrides `user_id`.
    pub username: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: FIRST_LEVEL,
            seed: None,
            catalog_path: None,
            user_id: 1,
            username: None,
        }
    }
}

impl Config {
    /// Environment, then `args` (without the program name)
    pub fn load(args: &[String]) -> Result<Self> {
        let mut config = Self::from_vars(|key| std::env::var(key).ok())?;
        config.apply_args(args)?;
        Ok(config)
    }

    /// Build from a variable lookup (the process environment in `load`)
    pub fn from_vars<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let non_empty = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(v) = non_empty(ENV_LEVEL) {
            config.level = parse_level(&v, ENV_LEVEL)?;
        }
        if let Some(v) = non_empty(ENV_SEED) {
            config.seed = Some(parse_number(&v, ENV_SEED)?);
        }
        if let Some(v) = non_empty(ENV_CATALOG) {
            config.catalog_path = Some(PathBuf::from(v));
        }
        if let Some(v) = non_empty(ENV_USER) {
            config.user_id = parse_number(&v, ENV_USER)?;
        }
        if let Some(v) = non_empty(ENV_USERNAME) {
            config.username = Some(v);
        }
        Ok(config)
    }

    pub fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut i = 0usize;
        while i < args.len() {
            let flag = args[i].as_str();
            i += 1;
            let value = || {
                args.get(i)
                    .ok_or_else(|| anyhow!("missing value for {}", flag))
            };
            match flag {
                "--level" => self.level = parse_level(value()?, flag)?,
                "--seed" => self.seed = Some(parse_number(value()?, flag)?),
                "--catalog" => self.catalog_path = Some(PathBuf::from(value()?)),
                "--user" => self.user_id = parse_number(value()?, flag)?,
                "--username" => self.username = Some(value()?.clone()),
                other => return Err(anyhow!("unknown argument: {}", other)),
            }
            i += 1;
        }
        Ok(())
    }

    /// Configured seed, or one derived from the clock
    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(1)
        })
    }

    /// The JSON catalog at `catalog_path`, or the built-in one
    pub fn load_catalog(&self) -> Result<Catalog> {
        let Some(path) = &self.catalog_path else {
            return Ok(Catalog::builtin()?);
        };
        let json = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("read catalog {}: {}", path.display(), e))?;
        Catalog::from_json(&json).map_err(|e| anyhow!("catalog {}: {}", path.display(), e))
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", what, value))
}

fn parse_level(value: &str, what: &str) -> Result<u32> {
    let level: u32 = parse_number(value, what)?;
    if level == 0 {
        return Err(anyhow!("{} must be at least 1", what));
    }
    Ok(level)
}
