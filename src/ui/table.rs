use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Record;
use crate::state::AppState;
use crate::ui::format;

const HEADERS: [&str; 8] = [
    "Year",
    "Seniority",
    "Contract",
    "Company Size",
    "Role",
    "Salary (USD)",
    "Remote",
    "Country",
];

const ROW_HEIGHT: f32 = 18.0;

/// Scrollable table of every record in the filtered view.
pub fn detail_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    if state.view.is_empty() {
        ui.label("No records match the current filters.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(400.0)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(60.0), HEADERS.len() - 1)
        .column(Column::remainder())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.view.len(), |mut row| {
                let record = &dataset.records[state.view.indices[row.index()]];
                for cell in cells(record) {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

fn cells(record: &Record) -> [String; 8] {
    [
        record.year.to_string(),
        record.seniority.clone(),
        record.contract_type.clone(),
        record.company_size.clone(),
        record.role.clone(),
        format::usd(record.usd),
        record.remote.clone(),
        record.country.clone().unwrap_or_default(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    #[test]
    fn cells_follow_header_order() {
        let cells = cells(&record(2023, "Data Scientist", 123_456.0, None));
        assert_eq!(cells.len(), HEADERS.len());
        assert_eq!(cells[0], "2023");
        assert_eq!(cells[4], "Data Scientist");
        assert_eq!(cells[5], "$123,456");
        assert_eq!(cells[7], "");
    }
}
