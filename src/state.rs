use anyhow::Context;

use crate::color::CategoryColors;
use crate::config::DashboardConfig;
use crate::data::aggregate::{DerivedAggregates, FilteredView, compute_view};
use crate::data::filter::FilterSelection;
use crate::data::loader;
use crate::data::model::{Dataset, Dimension, DimensionValue};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Startup configuration (dataset location, timeouts).
    pub config: DashboardConfig,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Dataset>,

    /// Accepted values per dimension.
    pub selection: FilterSelection,

    /// Records passing `selection`.
    pub view: FilteredView,

    /// Aggregates over `view`.
    pub aggregates: DerivedAggregates,

    /// Colours of the remote-work categories, fixed per dataset.
    pub remote_colors: Option<CategoryColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Fetch the configured source. On failure the message is kept for the
    /// UI and any previous dataset stays in place.
    pub fn load_configured_source(&mut self) {
        let source = self.config.source.clone();
        let result = loader::load(&source, self.config.timeout)
            .with_context(|| format!("loading salary data from {source}"));
        self.apply_load_result(result, &source.to_string());
    }

    /// Load a local CSV picked by the user.
    pub fn load_path(&mut self, path: &std::path::Path) {
        let result = loader::load_file(path)
            .with_context(|| format!("loading salary data from {}", path.display()));
        self.apply_load_result(result, &path.display().to_string());
    }

    fn apply_load_result(&mut self, result: anyhow::Result<Dataset>, origin: &str) {
        match result {
            Ok(dataset) => {
                log::info!("Loaded {} salary records from {origin}", dataset.len());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load dataset: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and reset the selection to everything.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.selection = FilterSelection::all(&dataset);
        self.remote_colors = Some(CategoryColors::new(
            dataset.records.iter().map(|r| r.remote.as_str()),
        ));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute();
    }

    /// Rebuild the filtered view and every aggregate from scratch.
    pub fn recompute(&mut self) {
        let Some(ds) = &self.dataset else {
            self.view = FilteredView::default();
            self.aggregates = DerivedAggregates::default();
            return;
        };
        let (view, aggregates) = compute_view(ds, &self.selection);
        log::debug!("Recomputed view: {} of {} records", view.len(), ds.len());
        self.view = view;
        self.aggregates = aggregates;
    }

    /// Toggle a single value in a dimension's selection.
    pub fn toggle(&mut self, dim: Dimension, value: &DimensionValue) {
        let Some(ds) = &self.dataset else { return };
        if self.selection.toggle(ds, dim, value) {
            self.recompute();
        }
    }

    /// Select all values in a dimension.
    pub fn select_all(&mut self, dim: Dimension) {
        let Some(ds) = &self.dataset else { return };
        let all: Vec<DimensionValue> = ds.options(dim).cloned().collect();
        if self.selection.set(ds, dim, all) {
            self.recompute();
        }
    }

    /// Deselect all values in a dimension.
    pub fn select_none(&mut self, dim: Dimension) {
        let Some(ds) = &self.dataset else { return };
        if self.selection.set(ds, dim, Vec::new()) {
            self.recompute();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn state() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(Dataset::from_records(vec![
            record(2023, "Data Scientist", 100_000.0, Some("USA")),
            record(2023, "Data Scientist", 120_000.0, Some("USA")),
            record(2022, "Analyst", 60_000.0, Some("BRA")),
        ]));
        state
    }

    #[test]
    fn new_dataset_shows_everything() {
        let state = state();
        assert_eq!(state.view.len(), 3);
        assert_eq!(state.aggregates.summary.record_count, 3);
    }

    #[test]
    fn toggling_recomputes() {
        let mut state = state();
        state.toggle(Dimension::Year, &DimensionValue::Year(2022));
        assert_eq!(state.view.indices, vec![0, 1]);
        assert_eq!(state.aggregates.summary.mean_salary, 110_000.0);
    }

    #[test]
    fn select_none_then_all() {
        let mut state = state();
        state.select_none(Dimension::ContractType);
        assert!(state.view.is_empty());
        assert!(state.aggregates.is_empty());

        state.select_all(Dimension::ContractType);
        assert_eq!(state.view.len(), 3);
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = state();
        let dir = tempfile::tempdir().unwrap();
        state.load_path(&dir.path().join("missing.csv"));

        assert!(state.dataset.is_some());
        let msg = state.status_message.unwrap();
        assert!(msg.starts_with("Error: loading salary data from"), "{msg}");
    }

    #[test]
    fn changes_without_dataset_are_ignored() {
        let mut state = AppState::default();
        state.toggle(Dimension::Year, &DimensionValue::Year(2023));
        assert!(state.view.is_empty());
    }
}
