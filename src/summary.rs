//! Values derived from the tables before drawing.

use std::cmp::Ordering;
use tracing::debug;
use crate::data::Co2Emission;

/// Number of countries shown in the emissions chart.
pub const TOP_N: usize = 10;

/// Head-room given to the largest bar of the emissions chart, so its
/// value label fits inside the axes.
pub const AXIS_MARGIN: f64 = 1.15;

/// The largest emitters, in non-increasing order of emission.
#[derive(Debug, Clone, PartialEq)]
pub struct TopEmitters {
    rows: Vec<Co2Emission>,
}

/// Descending by emission; NaN after every number.
fn by_emission_desc(a: &Co2Emission, b: &Co2Emission) -> Ordering {
    match (a.emission.is_nan(), b.emission.is_nan()) {
        (false, false) => b.emission.total_cmp(&a.emission),
        (a_nan, b_nan) => a_nan.cmp(&b_nan),
    }
}

/// Keep the `n` rows with the largest emissions.  The sort is stable:
/// equal emissions keep their order in `rows`.
pub fn top_emitters(rows: &[Co2Emission], n: usize) -> TopEmitters {
    let mut rows = rows.to_vec();
    rows.sort_by(by_emission_desc);
    rows.truncate(n);
    debug!(kept = rows.len(), "ranked emitters");
    TopEmitters { rows }
}

impl TopEmitters {
    pub fn rows(&self) -> &[Co2Emission] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn countries(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.country.as_str()).collect()
    }

    pub fn emissions(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.emission).collect()
    }

    /// Largest emission kept, `None` if there is no number.
    pub fn max_emission(&self) -> Option<f64> {
        // Sorted with NaN last, so the first row holds the maximum.
        self.rows.first().map(|r| r.emission).filter(|e| !e.is_nan())
    }

    /// Upper bound of the emission axis: the maximum times
    /// [`AXIS_MARGIN`].
    pub fn axis_limit(&self) -> Option<f64> {
        self.max_emission().map(|m| m * AXIS_MARGIN)
    }
}
