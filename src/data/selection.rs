use std::collections::BTreeSet;

use super::model::{EnrollmentDataset, RegionSeries};

// ---------------------------------------------------------------------------
// Selection: which regions are currently drawn
// ---------------------------------------------------------------------------

/// The user-chosen subset of regions.
///
/// Always a subset of the regions it was created with; identifiers outside
/// that set are refused. An empty selection is valid and means "draw nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    known: BTreeSet<String>,
    selected: BTreeSet<String>,
}

impl Selection {
    /// An empty selection over `known` regions.
    pub fn new<I, S>(known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: known.into_iter().map(Into::into).collect(),
            selected: BTreeSet::new(),
        }
    }

    /// Initial state: only `default_region` selected.
    ///
    /// Falls back to the first region of the dataset when the default is not
    /// part of it, so the first frame always shows a line.
    pub fn with_default(dataset: &EnrollmentDataset, default_region: &str) -> Self {
        let mut selection = Self::new(dataset.regions());
        if !selection.insert(default_region) {
            if let Some(first) = dataset.series.first() {
                log::warn!(
                    "Default region '{default_region}' not in dataset, selecting '{}'",
                    first.region
                );
                selection.insert(&first.region);
            }
        }
        selection
    }

    /// Add a region. Returns `false` (and leaves the selection untouched) for
    /// unknown identifiers or regions already selected.
    pub fn insert(&mut self, region: &str) -> bool {
        if !self.known.contains(region) {
            log::warn!("Ignoring unknown region '{region}'");
            return false;
        }
        self.selected.insert(region.to_string())
    }

    pub fn remove(&mut self, region: &str) -> bool {
        self.selected.remove(region)
    }

    /// Flip a region in or out. Returns whether the selection changed.
    pub fn toggle(&mut self, region: &str) -> bool {
        if self.selected.contains(region) {
            self.remove(region)
        } else {
            self.insert(region)
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.known.clone();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, region: &str) -> bool {
        self.selected.contains(region)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }
}

/// Series of `dataset` that are in `selection`, in dataset order.
pub fn visible_series<'a>(
    dataset: &'a EnrollmentDataset,
    selection: &Selection,
) -> Vec<&'a RegionSeries> {
    dataset
        .series
        .iter()
        .filter(|s| selection.contains(&s.region))
        .collect()
}
