use std::f32::consts::TAU;
use std::ops::RangeInclusive;

use eframe::egui::{Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::color::{self, CategoryColors};
use crate::data::aggregate::{DerivedAggregates, FEATURED_ROLE, GroupMean, HistogramBin};
use crate::state::AppState;
use crate::ui::format;

const CHART_HEIGHT: f32 = 320.0;
const BAR_COLOR: Color32 = Color32::from_rgb(99, 110, 250);
const WARNING_COLOR: Color32 = Color32::from_rgb(230, 160, 0);

// ---------------------------------------------------------------------------
// Chart grid (central panel)
// ---------------------------------------------------------------------------

/// Render the four chart panels in a 2×2 grid.
pub fn chart_grid(ui: &mut Ui, state: &AppState) {
    let agg = &state.aggregates;

    ui.columns(2, |cols| {
        chart_panel(&mut cols[0], "Top 10 Roles by Average Salary", |ui| {
            if agg.is_empty() {
                no_data(ui, "roles");
            } else {
                top_roles_chart(ui, &agg.top_roles);
            }
        });
        chart_panel(&mut cols[1], "Annual Salary Distribution", |ui| {
            if agg.is_empty() {
                no_data(ui, "salary distribution");
            } else {
                histogram_chart(ui, &agg.histogram);
            }
        });
    });

    ui.add_space(8.0);

    ui.columns(2, |cols| {
        chart_panel(&mut cols[0], "Proportion of Work Types", |ui| {
            match (&state.remote_colors, agg.is_empty()) {
                (Some(colors), false) => remote_donut(ui, agg, colors),
                _ => no_data(ui, "work type"),
            }
        });
        chart_panel(
            &mut cols[1],
            &format!("Average {FEATURED_ROLE} Salary by Country"),
            |ui| {
                if agg.is_empty() {
                    no_data(ui, "country");
                } else {
                    country_chart(ui, agg);
                }
            },
        );
    });
}

fn chart_panel(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.strong(title);
        add_contents(ui);
    });
}

fn no_data(ui: &mut Ui, chart: &str) {
    ui.colored_label(
        WARNING_COLOR,
        format!("No data to display for {chart} chart."),
    );
}

/// Y-axis labels for horizontal bar charts: bar `i` sits at `y = i`.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

/// Horizontal bars, largest mean at the top.
fn top_roles_chart(ui: &mut Ui, top_roles: &[GroupMean]) {
    let bars: Vec<Bar> = top_roles
        .iter()
        .enumerate()
        .map(|(i, g)| {
            Bar::new(i as f64, g.mean_usd)
                .name(format!("{}: {}", g.key, format::usd(g.mean_usd)))
                .width(0.7)
        })
        .collect();
    let labels = top_roles.iter().map(|g| g.key.clone()).collect();

    Plot::new("top_roles")
        .height(CHART_HEIGHT)
        .x_axis_label("Average Annual Salary (USD)")
        .x_axis_formatter(|mark, _range| format::usd_short(mark.value))
        .y_axis_formatter(category_axis(labels))
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().color(BAR_COLOR));
        });
}

fn histogram_chart(ui: &mut Ui, bins: &[HistogramBin]) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            // A single all-equal bin has zero width; give it something visible.
            let width = if b.width() > 0.0 {
                b.width()
            } else {
                (b.start.abs() * 0.05).max(1.0)
            };
            Bar::new(b.center(), b.count as f64)
                .name(format!(
                    "{} – {}: {}",
                    format::usd(b.start),
                    format::usd(b.end),
                    b.count
                ))
                .width(width)
        })
        .collect();

    Plot::new("salary_histogram")
        .height(CHART_HEIGHT)
        .x_axis_label("Salary Range (USD)")
        .x_axis_formatter(|mark, _range| format::usd_short(mark.value))
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR));
        });
}

/// Donut with a hole of half the radius, one slice per remote category.
fn remote_donut(ui: &mut Ui, agg: &DerivedAggregates, colors: &CategoryColors) {
    let total: usize = agg.remote_counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        no_data(ui, "work type");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let side = CHART_HEIGHT.min(ui.available_width() * 0.6);
        let (rect, _response) = ui.allocate_exact_size(Vec2::splat(side), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let outer = side / 2.0 - 4.0;
        let inner = outer * 0.5;

        let mut start = -TAU / 4.0;
        for (label, count) in &agg.remote_counts {
            let sweep = TAU * *count as f32 / total as f32;
            let fill = colors.color_for(label);
            // Convex quads of at most ~2° each.
            let steps = ((sweep / TAU * 180.0).ceil() as usize).max(1);
            for s in 0..steps {
                let a0 = start + sweep * s as f32 / steps as f32;
                let a1 = start + sweep * (s + 1) as f32 / steps as f32;
                let quad = vec![
                    polar(center, inner, a0),
                    polar(center, outer, a0),
                    polar(center, outer, a1),
                    polar(center, inner, a1),
                ];
                painter.add(Shape::convex_polygon(quad, fill, Stroke::NONE));
            }

            let pct = 100.0 * *count as f32 / total as f32;
            if pct >= 4.0 {
                painter.text(
                    polar(center, (inner + outer) / 2.0, start + sweep / 2.0),
                    Align2::CENTER_CENTER,
                    format!("{pct:.1}%"),
                    FontId::proportional(12.0),
                    Color32::WHITE,
                );
            }
            start += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            for (label, count) in &agg.remote_counts {
                let pct = 100.0 * *count as f64 / total as f64;
                ui.horizontal(|ui: &mut Ui| {
                    ui.colored_label(colors.color_for(label), "■");
                    ui.label(format!(
                        "{label}  {pct:.1}%  ({})",
                        format::thousands(*count as u64)
                    ));
                });
            }
        });
    });
}

fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + Vec2::angled(angle) * radius
}

/// Horizontal bars per country, coloured red → green by mean salary.
fn country_chart(ui: &mut Ui, agg: &DerivedAggregates) {
    if agg.country_means.is_empty() {
        ui.label(format!("No {FEATURED_ROLE} records in the current selection."));
        return;
    }

    let mut rows: Vec<(&String, f64)> =
        agg.country_means.iter().map(|(c, &m)| (c, m)).collect();
    rows.sort_by(|a, b| a.1.total_cmp(&b.1));

    let min = rows.first().map_or(0.0, |r| r.1);
    let max = rows.last().map_or(0.0, |r| r.1);

    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, (country, mean))| {
            Bar::new(i as f64, *mean)
                .name(format!("{country}: {}", format::usd(*mean)))
                .fill(color::red_yellow_green(color::normalize(*mean, min, max)))
                .width(0.7)
        })
        .collect();
    let labels = rows.iter().map(|(c, _)| c.to_string()).collect();

    Plot::new("country_means")
        .height(CHART_HEIGHT)
        .x_axis_label("Average Salary (USD)")
        .x_axis_formatter(|mark, _range| format::usd_short(mark.value))
        .y_axis_formatter(category_axis(labels))
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_axis_labels_integer_marks_only() {
        let fmt = category_axis(vec!["a".to_string(), "b".to_string()]);
        let mark = |value| GridMark { value, step_size: 0.5 };
        assert_eq!(fmt(mark(1.0), &(0.0..=1.0)), "b");
        assert_eq!(fmt(mark(0.5), &(0.0..=1.0)), "");
        assert_eq!(fmt(mark(-1.0), &(0.0..=1.0)), "");
        assert_eq!(fmt(mark(7.0), &(0.0..=1.0)), "");
    }
}
