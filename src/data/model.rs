use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// RawRow – one row of the input table
// ---------------------------------------------------------------------------

/// A single region as read from the source table.
///
/// Years absent from `values` are missing cells (empty CSV field, JSON
/// `null`, Parquet null). The normalizer decides what to do with them.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub region: String,
    pub values: BTreeMap<i32, f64>,
}

impl RawRow {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            values: BTreeMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_value(mut self, year: i32, count: f64) -> Self {
        self.values.insert(year, count);
        self
    }

    pub fn value(&self, year: i32) -> Option<f64> {
        self.values.get(&year).copied()
    }
}

// ---------------------------------------------------------------------------
// Normalized records
// ---------------------------------------------------------------------------

/// Column-wise sum across all regions for one year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearTotal {
    pub year: i32,
    pub total: f64,
}

/// One year of one region, expressed as a share of that year's total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub year: i32,
    pub count: f64,
    pub total: f64,
    /// `count / total`, in `[0, 1]` for non-negative inputs.
    pub percentage: f64,
}

/// The yearly points of a single region, ordered by year ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSeries {
    pub region: String,
    pub points: Vec<SeriesPoint>,
}

impl RegionSeries {
    /// The most recent point, used to place the region label.
    pub fn last_point(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    pub fn max_percentage(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.percentage)
            .fold(None, |acc, p| Some(acc.map_or(p, |a: f64| a.max(p))))
    }
}

// ---------------------------------------------------------------------------
// EnrollmentDataset – the complete normalized dataset
// ---------------------------------------------------------------------------

/// The normalized table. Immutable once built; a new file replaces it whole.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentDataset {
    /// Declared year columns, strictly ascending.
    pub years: Vec<i32>,
    /// One total per entry of `years`.
    pub totals: Vec<YearTotal>,
    /// One series per input row, in input order.
    pub series: Vec<RegionSeries>,
}

impl EnrollmentDataset {
    /// Normalize raw rows into a dataset.
    pub fn from_rows(rows: &[RawRow], years: &[i32]) -> Result<Self, super::DataError> {
        let totals = super::normalize::year_totals(rows, years)?;
        let series = super::normalize::series_from_totals(rows, &totals)?;
        Ok(Self {
            years: years.to_vec(),
            totals,
            series,
        })
    }

    /// Region identifiers in input order.
    pub fn regions(&self) -> Vec<String> {
        self.series.iter().map(|s| s.region.clone()).collect()
    }

    #[cfg(test)]
    pub fn series_for(&self, region: &str) -> Option<&RegionSeries> {
        self.series.iter().find(|s| s.region == region)
    }

    /// `(first, last)` year; normalization guarantees at least one year.
    pub fn year_extent(&self) -> (i32, i32) {
        match (self.years.first(), self.years.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => (0, 0),
        }
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the dataset has no regions.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
