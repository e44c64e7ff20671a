//! Run settings taken from the environment.
//!
//! | Variable                | Meaning                                   |
//! |-------------------------|-------------------------------------------|
//! | `ENV_INSIGHTS_DATA_DIR` | directory of the CSV files (default `.`)  |
//! | `ENV_INSIGHTS_OUTPUT`   | save the figure there instead of showing it |
//! | `ENV_INSIGHTS_DPI`      | resolution of the saved figure            |

use std::path::PathBuf;
use crate::{Error, Result};

pub const DATA_DIR_VAR: &str = "ENV_INSIGHTS_DATA_DIR";
pub const OUTPUT_VAR: &str = "ENV_INSIGHTS_OUTPUT";
pub const DPI_VAR: &str = "ENV_INSIGHTS_DPI";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_dir: PathBuf,
    /// `None` means display the figure on screen.
    pub output: Option<PathBuf>,
    pub dpi: Option<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings { data_dir: PathBuf::from("."), output: None, dpi: None }
    }
}

impl Settings {
    pub fn from_env() -> Result<Settings> {
        Self::from_vars(std::env::vars())
    }

    /// Build the settings from `(name, value)` pairs; unknown names are
    /// ignored and empty values count as unset.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Settings>
    where I: IntoIterator<Item = (K, V)>,
          K: AsRef<str>,
          V: Into<String> {
        let mut s = Settings::default();
        for (k, v) in vars {
            let v: String = v.into();
            if v.is_empty() {
                continue;
            }
            match k.as_ref() {
                DATA_DIR_VAR => s.data_dir = PathBuf::from(v),
                OUTPUT_VAR => s.output = Some(PathBuf::from(v)),
                DPI_VAR => {
                    let dpi = v.trim().parse::<f64>().ok()
                        .filter(|d| d.is_finite() && *d > 0.)
                        .ok_or(Error::InvalidSetting { name: DPI_VAR,
                                                       value: v })?;
                    s.dpi = Some(dpi);
                }
                _ => {}
            }
        }
        Ok(s)
    }
}
