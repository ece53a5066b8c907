use std::collections::{BTreeMap, HashMap};

use super::filter::{FilterSelection, filtered_indices};
use super::model::{Dataset, Record};

/// Number of equal-width bins in the salary histogram.
pub const HISTOGRAM_BINS: usize = 30;

/// How many roles the salary ranking keeps.
pub const TOP_ROLES: usize = 10;

/// Role whose salaries are broken down by country.
pub const FEATURED_ROLE: &str = "Data Scientist";

// ---------------------------------------------------------------------------
// FilteredView – the records passing the current selection
// ---------------------------------------------------------------------------

/// Row indices into the [`Dataset`] that pass a [`FilterSelection`], in
/// dataset order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    pub indices: Vec<usize>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate the filtered records of `dataset`.
    pub fn records<'a>(&'a self, dataset: &'a Dataset) -> impl Iterator<Item = &'a Record> + 'a {
        self.indices.iter().map(move |&i| &dataset.records[i])
    }
}

// ---------------------------------------------------------------------------
// Derived aggregates
// ---------------------------------------------------------------------------

/// Scalar metrics shown in the header cards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryMetrics {
    pub mean_salary: f64,
    pub max_salary: f64,
    pub record_count: usize,
    /// Empty when there are no records.
    pub most_common_role: String,
}

/// Mean salary of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub key: String,
    pub mean_usd: f64,
}

/// One histogram bucket covering `[start, end)` (the last bin is closed).
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Everything the dashboard renders from a [`FilteredView`].
///
/// `Default` is the empty-view state: zero metrics and empty tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedAggregates {
    pub summary: SummaryMetrics,
    /// Up to [`TOP_ROLES`] roles, ascending by mean salary.
    pub top_roles: Vec<GroupMean>,
    pub histogram: Vec<HistogramBin>,
    /// (remote category, count), descending by count.
    pub remote_counts: Vec<(String, usize)>,
    /// Mean salary of [`FEATURED_ROLE`] per ISO3 country.
    pub country_means: BTreeMap<String, f64>,
}

impl DerivedAggregates {
    /// Compute all aggregates from the filtered records. Empty input yields
    /// [`DerivedAggregates::default`].
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let records: Vec<&Record> = records.into_iter().collect();
        if records.is_empty() {
            return Self::default();
        }

        DerivedAggregates {
            summary: summary(&records),
            top_roles: top_roles_by_mean(&records, TOP_ROLES),
            histogram: histogram(&records, HISTOGRAM_BINS),
            remote_counts: value_counts(records.iter().map(|r| r.remote.as_str())),
            country_means: country_means(&records, FEATURED_ROLE),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary.record_count == 0
    }
}

/// Filter `dataset` by `selection` and derive every aggregate from the
/// result. Pure: equal inputs give equal outputs.
pub fn compute_view(
    dataset: &Dataset,
    selection: &FilterSelection,
) -> (FilteredView, DerivedAggregates) {
    let view = FilteredView {
        indices: filtered_indices(dataset, selection),
    };
    let aggregates = DerivedAggregates::from_records(view.records(dataset));
    (view, aggregates)
}

// ---------------------------------------------------------------------------
// Individual aggregates
// ---------------------------------------------------------------------------

fn summary(records: &[&Record]) -> SummaryMetrics {
    let total: f64 = records.iter().map(|r| r.usd).sum();
    let max_salary = records
        .iter()
        .map(|r| r.usd)
        .fold(f64::NEG_INFINITY, f64::max);
    let most_common_role = value_counts(records.iter().map(|r| r.role.as_str()))
        .into_iter()
        .next()
        .map(|(role, _)| role)
        .unwrap_or_default();

    SummaryMetrics {
        mean_salary: total / records.len() as f64,
        max_salary,
        record_count: records.len(),
        most_common_role,
    }
}

/// Occurrence counts in descending order; ties keep first-encounter order.
fn value_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    for v in values {
        match slots.get(v) {
            Some(&slot) => order[slot].1 += 1,
            None => {
                slots.insert(v, order.len());
                order.push((v, 1));
            }
        }
    }
    // Stable sort: equal counts stay in encounter order.
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
        .into_iter()
        .map(|(v, n)| (v.to_string(), n))
        .collect()
}

/// Mean salary per key, groups in first-encounter order.
fn group_means<'a>(records: impl Iterator<Item = (&'a str, f64)>) -> Vec<GroupMean> {
    let mut order: Vec<(&str, f64, usize)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    for (key, usd) in records {
        match slots.get(key) {
            Some(&slot) => {
                order[slot].1 += usd;
                order[slot].2 += 1;
            }
            None => {
                slots.insert(key, order.len());
                order.push((key, usd, 1));
            }
        }
    }
    order
        .into_iter()
        .map(|(key, sum, n)| GroupMean {
            key: key.to_string(),
            mean_usd: sum / n as f64,
        })
        .collect()
}

/// The `n` roles with the highest mean salary, returned ascending.
fn top_roles_by_mean(records: &[&Record], n: usize) -> Vec<GroupMean> {
    let mut groups = group_means(records.iter().map(|r| (r.role.as_str(), r.usd)));
    groups.sort_by(|a, b| b.mean_usd.total_cmp(&a.mean_usd));
    groups.truncate(n);
    groups.sort_by(|a, b| a.mean_usd.total_cmp(&b.mean_usd));
    groups
}

/// Equal-width bins over `[min, max]`. All-equal salaries collapse into a
/// single zero-width bin.
fn histogram(records: &[&Record], bins: usize) -> Vec<HistogramBin> {
    let (min, max) = records
        .iter()
        .map(|r| r.usd)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if bins == 0 || min >= max {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: records.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for r in records {
        // The division can round across an edge; settle on the bin whose
        // reported range holds the value.
        let mut idx = (((r.usd - min) / width) as usize).min(bins - 1);
        while idx > 0 && r.usd < out[idx].start {
            idx -= 1;
        }
        while idx + 1 < bins && r.usd >= out[idx].end {
            idx += 1;
        }
        out[idx].count += 1;
    }
    out
}

/// Mean salary per country over records with `role`. Records without a
/// country are skipped.
fn country_means(records: &[&Record], role: &str) -> BTreeMap<String, f64> {
    group_means(
        records
            .iter()
            .filter(|r| r.role == role)
            .filter_map(|r| r.country.as_deref().map(|c| (c, r.usd))),
    )
    .into_iter()
    .map(|g| (g.key, g.mean_usd))
    .collect()
}
