//! Environmental insights (1990-2020) as one composite [Matplotlib][]
//! figure.
//!
//! Four small CSV tables (access to electricity, threatened bird
//! species, CO2 emissions per capita, renewable energy consumption) are
//! loaded with [`data`], the CO2 table is ranked with [`summary`], and
//! [`dashboard`] draws four charts plus annotation text through the thin
//! [`plt`] bindings.
//!
//! Usage
//! -----
//!
//! ```no_run
//! use env_insights::{data::Datasets, dashboard::Dashboard};
//! let data = Datasets::load(".")?;
//! let mut dash = Dashboard::new()?;
//! dash.draw(&data)?;
//! dash.show()?;
//! # Ok::<(), env_insights::Error>(())
//! ```
//!
//! [Matplotlib]: https://matplotlib.org/

use std::{
    fmt::{Display, Formatter},
    path::PathBuf,
};
use pyo3::PyErr;

pub mod config;
pub mod dashboard;
pub mod data;
pub mod plt;
pub mod style;
pub mod summary;

/// Possible errors of loading, ranking and drawing.
#[derive(Debug)]
pub enum Error {
    /// The Python library "matplotlib" was not found.
    NoMatplotlib,
    /// The path contains an element that is not a directory or does
    /// not exist.
    FileNotFoundError,
    /// Permission denied to access or create the filesystem path.
    PermissionError,
    /// Other Python errors.
    Python(PyErr),
    /// An input file could not be opened or read.
    Io { path: PathBuf, source: std::io::Error },
    /// A CSV file is malformed or a cell has the wrong type.
    Csv { path: PathBuf, source: csv::Error },
    /// A numeric cell of a free-form table could not be parsed.
    BadValue { path: PathBuf, line: u64, column: String, value: String },
    /// The header of `file` lacks a required column.
    MissingColumn { file: String, column: &'static str },
    /// A chart cannot be drawn from an empty table.
    EmptyTable(&'static str),
    /// An environment setting has an unusable value.
    InvalidSetting { name: &'static str, value: String },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Error::NoMatplotlib =>
                write!(f, "The matplotlib library has not been found.\n\
Please install it.  See https://matplotlib.org/\n\
If you use Anaconda, see https://github.com/PyO3/pyo3/issues/1554"),
            Error::FileNotFoundError =>
                write!(f, "A path contains an element that is not a \
                           directory or does not exist"),
            Error::PermissionError =>
                write!(f, "Permission denied to access or create the \
                           filesystem path"),
            Error::Python(e) =>
                write!(f, "Python error: {}", e),
            Error::Io { path, source } =>
                write!(f, "cannot read {}: {}", path.display(), source),
            Error::Csv { path, source } =>
                write!(f, "malformed CSV in {}: {}", path.display(), source),
            Error::BadValue { path, line, column, value } =>
                write!(f, "{}:{}: column {:?}: {:?} is not a number",
                       path.display(), line, column, value),
            Error::MissingColumn { file, column } =>
                write!(f, "{}: missing required column {:?}", file, column),
            Error::EmptyTable(file) =>
                write!(f, "{}: the table has no rows", file),
            Error::InvalidSetting { name, value } =>
                write!(f, "invalid value {:?} for {}", value, name),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Python(e) => Some(e),
            Error::Io { source, .. } => Some(source),
            Error::Csv { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<PyErr> for Error {
    fn from(e: PyErr) -> Self { Error::Python(e) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
