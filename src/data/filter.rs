use std::collections::{BTreeMap, BTreeSet};

use super::model::{Dataset, Dimension, DimensionValue, Record};

// ---------------------------------------------------------------------------
// Filter predicate: which values are accepted per dimension
// ---------------------------------------------------------------------------

/// Per-dimension selection state: maps dimension → set of accepted values.
///
/// A dimension that is absent, or whose set is empty, accepts nothing.
/// There is no implicit "all" fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    accepted: BTreeMap<Dimension, BTreeSet<DimensionValue>>,
}

impl FilterSelection {
    /// Selection with every observed value of every dimension accepted.
    pub fn all(dataset: &Dataset) -> Self {
        let accepted = Dimension::ALL
            .iter()
            .map(|&dim| (dim, dataset.options(dim).cloned().collect()))
            .collect();
        FilterSelection { accepted }
    }

    pub fn is_accepted(&self, dim: Dimension, value: &DimensionValue) -> bool {
        self.accepted
            .get(&dim)
            .is_some_and(|set| set.contains(value))
    }

    /// Number of accepted values for `dim`.
    pub fn count(&self, dim: Dimension) -> usize {
        self.accepted.get(&dim).map_or(0, BTreeSet::len)
    }

    /// Replace the accepted set for `dim`, keeping only observed values.
    /// Returns whether the selection changed.
    pub fn set<I>(&mut self, dataset: &Dataset, dim: Dimension, values: I) -> bool
    where
        I: IntoIterator<Item = DimensionValue>,
    {
        let values: BTreeSet<DimensionValue> = values
            .into_iter()
            .filter(|v| dataset.has_option(dim, v))
            .collect();
        if self.accepted.get(&dim) == Some(&values) {
            return false;
        }
        self.accepted.insert(dim, values);
        true
    }

    /// Flip a single value. Values the dataset never produced are ignored.
    /// Returns whether the selection changed.
    pub fn toggle(&mut self, dataset: &Dataset, dim: Dimension, value: &DimensionValue) -> bool {
        if !dataset.has_option(dim, value) {
            return false;
        }
        let set = self.accepted.entry(dim).or_default();
        if !set.remove(value) {
            set.insert(value.clone());
        }
        true
    }

    /// Whether a record passes every dimension predicate.
    pub fn matches(&self, record: &Record) -> bool {
        Dimension::ALL.iter().all(|&dim| match self.accepted.get(&dim) {
            Some(set) => record.dimension(dim).is_in(set),
            None => false,
        })
    }
}

/// Indices of records passing the selection, in dataset order.
pub fn filtered_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn dataset() -> Dataset {
        let mut junior = record(2023, "Analyst", 50_000.0, Some("BRA"));
        junior.seniority = "junior".to_string();
        Dataset::from_records(vec![
            record(2023, "Data Scientist", 100_000.0, Some("USA")),
            record(2022, "Data Scientist", 120_000.0, Some("USA")),
            junior,
        ])
    }

    #[test]
    fn full_selection_keeps_everything() {
        let ds = dataset();
        let sel = FilterSelection::all(&ds);
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 1, 2]);
    }

    #[test]
    fn and_across_dimensions_or_within() {
        let ds = dataset();
        let mut sel = FilterSelection::all(&ds);
        sel.set(&ds, Dimension::Year, [DimensionValue::Year(2023)]);
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 2]);

        sel.set(
            &ds,
            Dimension::Seniority,
            [DimensionValue::Label("senior".to_string())],
        );
        assert_eq!(filtered_indices(&ds, &sel), vec![0]);
    }

    #[test]
    fn empty_set_filters_everything() {
        let ds = dataset();
        let mut sel = FilterSelection::all(&ds);
        assert!(sel.set(&ds, Dimension::CompanySize, Vec::new()));
        assert!(filtered_indices(&ds, &sel).is_empty());
    }

    #[test]
    fn default_selection_accepts_nothing() {
        let ds = dataset();
        assert!(filtered_indices(&ds, &FilterSelection::default()).is_empty());
    }

    #[test]
    fn unknown_values_are_ignored() {
        let ds = dataset();
        let mut sel = FilterSelection::all(&ds);
        let bogus = DimensionValue::Year(1999);
        assert!(!sel.toggle(&ds, Dimension::Year, &bogus));
        assert!(!sel.is_accepted(Dimension::Year, &bogus));

        sel.set(&ds, Dimension::Year, [bogus, DimensionValue::Year(2022)]);
        assert_eq!(sel.count(Dimension::Year), 1);
    }

    #[test]
    fn toggle_round_trips() {
        let ds = dataset();
        let mut sel = FilterSelection::all(&ds);
        let y = DimensionValue::Year(2022);
        assert!(sel.toggle(&ds, Dimension::Year, &y));
        assert!(!sel.is_accepted(Dimension::Year, &y));
        assert!(sel.toggle(&ds, Dimension::Year, &y));
        assert_eq!(sel, FilterSelection::all(&ds));
    }

    #[test]
    fn set_reports_no_change() {
        let ds = dataset();
        let mut sel = FilterSelection::all(&ds);
        let all_years: Vec<_> = ds.options(Dimension::Year).cloned().collect();
        assert!(!sel.set(&ds, Dimension::Year, all_years));
    }
}
