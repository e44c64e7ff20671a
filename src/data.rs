//! Loading of the four input tables.
//!
//! Each fixed-schema table is a `Vec` of rows deserialized with `serde`;
//! the renewable energy table has one column per year and is kept as a
//! label × year matrix.  The header of every file is checked against
//! the columns the charts need before any row is read, so a renamed
//! column is reported as such rather than as a bad row.

use std::{
    fs::File,
    path::{Path, PathBuf},
};
use csv::{ReaderBuilder, StringRecord, Trim};
use ndarray::Array2;
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use tracing::{debug, info, instrument};
use crate::{Error, Result};

/// Read a blank numeric cell as NaN, a missing value.
fn nan_if_blank<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::NAN))
}

/// A table with a fixed set of named columns.
pub trait Table: DeserializeOwned {
    /// File name of the table in the data directory.
    const FILE: &'static str;
    /// Columns that must be present in the header.
    const COLUMNS: &'static [&'static str];
}

/// Share of the population with access to electricity, per region.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElectricityAccess {
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "1990", deserialize_with = "nan_if_blank")]
    pub pct_1990: f64,
    #[serde(rename = "2020", deserialize_with = "nan_if_blank")]
    pub pct_2020: f64,
}

impl Table for ElectricityAccess {
    const FILE: &'static str = "AccesstoElec.csv";
    const COLUMNS: &'static [&'static str] = &["Region", "1990", "2020"];
}

/// Number of threatened bird species, per region.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BirdSpecies {
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Threatened Species", deserialize_with = "nan_if_blank")]
    pub threatened: f64,
}

impl Table for BirdSpecies {
    const FILE: &'static str = "Birds.csv";
    const COLUMNS: &'static [&'static str] = &["Region", "Threatened Species"];
}

/// CO2 emissions in metric tons per capita, per country.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Co2Emission {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Co2 Emission", deserialize_with = "nan_if_blank")]
    pub emission: f64,
}

impl Table for Co2Emission {
    const FILE: &'static str = "Co2.csv";
    const COLUMNS: &'static [&'static str] = &["Country", "Co2 Emission"];
}

/// Renewable energy share of consumption: one row per region, one
/// column per year.
#[derive(Debug, Clone, PartialEq)]
pub struct RenewableEnergy {
    /// Region of each row.
    pub labels: Vec<String>,
    /// Year headers, in file order.
    pub years: Vec<String>,
    /// `values[[row, year]]`.
    pub values: Array2<f64>,
}

impl RenewableEnergy {
    pub const FILE: &'static str = "Renew.csv";
    /// Column holding the region of each row.
    pub const LABEL_COLUMN: &'static str = "Row Labels";

    /// Iterate over `(label, values across the years)`.
    pub fn rows(&self) -> impl Iterator<Item = (&str, Vec<f64>)> + '_ {
        self.labels.iter().zip(self.values.rows())
            .map(|(l, r)| (l.as_str(), r.to_vec()))
    }
}

fn open(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(file))
}

fn csv_err(path: &Path) -> impl FnOnce(csv::Error) -> Error + '_ {
    move |source| Error::Csv { path: path.to_path_buf(), source }
}

/// Fail with [`Error::MissingColumn`] for the first of `required` that
/// `headers` lacks.
fn check_columns(path: &Path, headers: &StringRecord,
                 required: &[&'static str]) -> Result<()> {
    match required.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        Some(&column) => Err(Error::MissingColumn {
            file: path.display().to_string(),
            column,
        }),
        None => Ok(()),
    }
}

/// Read every row of the table `T` from `path`.
pub fn read_table<T: Table>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let path = path.as_ref();
    let mut reader = open(path)?;
    let headers = reader.headers().map_err(csv_err(path))?.clone();
    check_columns(path, &headers, T::COLUMNS)?;
    let rows = reader.deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(csv_err(path))?;
    debug!(path = %path.display(), rows = rows.len(), "read table");
    Ok(rows)
}

pub fn read_electricity_access(path: impl AsRef<Path>)
                               -> Result<Vec<ElectricityAccess>> {
    read_table(path)
}

pub fn read_bird_species(path: impl AsRef<Path>) -> Result<Vec<BirdSpecies>> {
    read_table(path)
}

pub fn read_co2_emissions(path: impl AsRef<Path>) -> Result<Vec<Co2Emission>> {
    read_table(path)
}

/// Read the renewable energy table.  Every column other than
/// `Row Labels` is a year series; blank cells are NaN.
pub fn read_renewable_energy(path: impl AsRef<Path>) -> Result<RenewableEnergy> {
    let path = path.as_ref();
    let mut reader = open(path)?;
    let headers = reader.headers().map_err(csv_err(path))?.clone();
    check_columns(path, &headers, &[RenewableEnergy::LABEL_COLUMN])?;
    let label_col = headers.iter()
        .position(|h| h == RenewableEnergy::LABEL_COLUMN)
        .unwrap_or_default();
    let years: Vec<String> = headers.iter().enumerate()
        .filter(|&(i, _)| i != label_col)
        .map(|(_, h)| h.to_owned())
        .collect();

    let mut labels = vec![];
    let mut cells = vec![];
    for record in reader.records() {
        // Unequal row widths are rejected by the reader.
        let record = record.map_err(csv_err(path))?;
        let line = record.position().map_or(0, |p| p.line());
        for (i, cell) in record.iter().enumerate() {
            if i == label_col {
                labels.push(cell.to_owned());
                continue;
            }
            if cell.is_empty() {
                cells.push(f64::NAN);
                continue;
            }
            let v = cell.parse::<f64>().map_err(|_| Error::BadValue {
                path: path.to_path_buf(),
                line,
                column: headers[i].to_owned(),
                value: cell.to_owned(),
            })?;
            cells.push(v);
        }
    }
    let mut values = Array2::zeros((labels.len(), years.len()));
    for (v, c) in values.iter_mut().zip(cells) {
        *v = c;
    }
    debug!(path = %path.display(), rows = labels.len(), years = years.len(),
           "read renewable energy");
    Ok(RenewableEnergy { labels, years, values })
}

/// The four tables of the figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Datasets {
    pub electricity: Vec<ElectricityAccess>,
    pub birds: Vec<BirdSpecies>,
    pub co2: Vec<Co2Emission>,
    pub renewables: RenewableEnergy,
}

impl Datasets {
    /// Load the four fixed-name files from `dir`.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn load(dir: impl AsRef<Path>) -> Result<Datasets> {
        let dir = dir.as_ref();
        let file = |name: &str| -> PathBuf { dir.join(name) };
        let electricity = read_electricity_access(file(ElectricityAccess::FILE))?;
        let birds = read_bird_species(file(BirdSpecies::FILE))?;
        let co2 = read_co2_emissions(file(Co2Emission::FILE))?;
        let renewables = read_renewable_energy(file(RenewableEnergy::FILE))?;
        info!(electricity = electricity.len(),
              birds = birds.len(),
              co2 = co2.len(),
              renewables = renewables.labels.len(),
              "loaded datasets");
        Ok(Datasets { electricity, birds, co2, renewables })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let p = dir.join(name);
        fs::write(&p, content).unwrap();
        p
    }

    #[test]
    fn reads_electricity_access() {
        let tmp = tempdir().unwrap();
        let p = write(tmp.path(), "AccesstoElec.csv",
                      "Region,1990,2020\n\
                       East Asia & Pacific,99.64,92.32\n\
                       South Asia, 60.5 ,95.8\n");
        let rows = read_electricity_access(&p).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ElectricityAccess {
            region: "East Asia & Pacific".into(),
            pct_1990: 99.64,
            pct_2020: 92.32,
        });
        assert_eq!(rows[1].pct_1990, 60.5);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let tmp = tempdir().unwrap();
        let p = write(tmp.path(), "Co2.csv",
                      "Code,Country,Co2 Emission\nQAT,Qatar,31.73\n");
        let rows = read_co2_emissions(&p).unwrap();
        assert_eq!(rows, vec![Co2Emission { country: "Qatar".into(),
                                            emission: 31.73 }]);
    }

    #[test]
    fn missing_column_fails() {
        let tmp = tempdir().unwrap();
        let p = write(tmp.path(), "Birds.csv",
                      "Region,Species\nEurope,678\n");
        match read_bird_species(&p) {
            Err(Error::MissingColumn { column, .. }) =>
                assert_eq!(column, "Threatened Species"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_fails() {
        let tmp = tempdir().unwrap();
        let r = read_co2_emissions(tmp.path().join("Co2.csv"));
        assert!(matches!(r, Err(Error::Io { .. })));
    }

    #[test]
    fn bad_cell_fails() {
        let tmp = tempdir().unwrap();
        let p = write(tmp.path(), "Co2.csv",
                      "Country,Co2 Emission\nQatar,lots\n");
        assert!(matches!(read_co2_emissions(&p), Err(Error::Csv { .. })));
    }

    #[test]
    fn empty_table_has_no_rows() {
        let tmp = tempdir().unwrap();
        let p = write(tmp.path(), "Birds.csv", "Region,Threatened Species\n");
        assert!(read_bird_species(&p).unwrap().is_empty());
    }

    #[test]
    fn renewable_energy_matrix() {
        let tmp = tempdir().unwrap();
        let p = write(tmp.path(), "Renew.csv",
                      "Row Labels,1990,2000,2020\n\
                       Europe & Central Asia,11.03,12.5,23.53\n\
                       East Asia & Pacific,30.1,25.0,17.55\n");
        let t = read_renewable_energy(&p).unwrap();
        assert_eq!(t.labels, ["Europe & Central Asia", "East Asia & Pacific"]);
        assert_eq!(t.years, ["1990", "2000", "2020"]);
        assert_eq!(t.values.dim(), (2, 3));
        assert_eq!(t.values[[0, 2]], 23.53);
        assert_eq!(t.values[[1, 0]], 30.1);
        let rows: Vec<_> = t.rows().collect();
        assert_eq!(rows[1], ("East Asia & Pacific", vec![30.1, 25.0, 17.55]));
    }

    #[test]
    fn renewable_energy_label_column_anywhere() {
        let tmp = tempdir().unwrap();
        let p = write(tmp.path(), "Renew.csv",
                      "1990,Row Labels,2020\n1.5,World,2.5\n");
        let t = read_renewable_energy(&p).unwrap();
        assert_eq!(t.labels, ["World"]);
        assert_eq!(t.years, ["1990", "2020"]);
        assert_eq!(t.values.row(0).to_vec(), vec![1.5, 2.5]);
    }

    #[test]
    fn renewable_energy_requires_labels() {
        let tmp = tempdir().unwrap();
        let p = write(tmp.path(), "Renew.csv", "Region,1990\nWorld,1.0\n");
        assert!(matches!(read_renewable_energy(&p),
                         Err(Error::MissingColumn { column: "Row Labels", .. })));
    }

    #[test]
    fn renewable_energy_blank_year_is_nan() {
        let tmp = tempdir().unwrap();
        let p = write(tmp.path(), "Renew.csv",
                      "Row Labels,1990,2020\nWorld,16.7,\n");
        let t = read_renewable_energy(&p).unwrap();
        assert_eq!(t.values[[0, 0]], 16.7);
        assert!(t.values[[0, 1]].is_nan());
    }

    #[test]
    fn blank_emission_is_nan_and_ranks_last() {
        let tmp = tempdir().unwrap();
        let p = write(tmp.path(), "Co2.csv",
                      "Country,Co2 Emission\nEritrea,\nQatar,31.73\nChad,0.13\n");
        let rows = read_co2_emissions(&p).unwrap();
        assert!(rows[0].emission.is_nan());
        let top = crate::summary::top_emitters(&rows, crate::summary::TOP_N);
        assert_eq!(top.countries(), ["Qatar", "Chad", "Eritrea"]);
        assert_eq!(top.max_emission(), Some(31.73));
    }

    #[test]
    fn blank_access_share_is_nan() {
        let tmp = tempdir().unwrap();
        let p = write(tmp.path(), "AccesstoElec.csv",
                      "Region,1990,2020\nSouth Asia, ,95.8\n");
        let rows = read_electricity_access(&p).unwrap();
        assert!(rows[0].pct_1990.is_nan());
        assert_eq!(rows[0].pct_2020, 95.8);
    }

    #[test]
    fn renewable_energy_bad_value() {
        let tmp = tempdir().unwrap();
        let p = write(tmp.path(), "Renew.csv",
                      "Row Labels,1990,2020\nWorld,1.0,n/a\n");
        match read_renewable_energy(&p) {
            Err(Error::BadValue { line, column, value, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(column, "2020");
                assert_eq!(value, "n/a");
            }
            other => panic!("expected BadValue, got {:?}", other),
        }
    }

    #[test]
    fn renewable_energy_ragged_row() {
        let tmp = tempdir().unwrap();
        let p = write(tmp.path(), "Renew.csv",
                      "Row Labels,1990,2020\nWorld,1.0\n");
        assert!(matches!(read_renewable_energy(&p), Err(Error::Csv { .. })));
    }

    #[test]
    fn loads_all_datasets() {
        let tmp = tempdir().unwrap();
        let d = tmp.path();
        write(d, "AccesstoElec.csv", "Region,1990,2020\nWorld,71.4,90.5\n");
        write(d, "Birds.csv", "Region,Threatened Species\nWorld,1445\n");
        write(d, "Co2.csv", "Country,Co2 Emission\nQatar,31.73\nKuwait,21.17\n");
        write(d, "Renew.csv", "Row Labels,1990,2020\nWorld,16.7,19.8\n");
        let data = Datasets::load(d).unwrap();
        assert_eq!(data.electricity.len(), 1);
        assert_eq!(data.birds[0].threatened, 1445.);
        assert_eq!(data.co2.len(), 2);
        assert_eq!(data.renewables.years, ["1990", "2020"]);
    }
}
