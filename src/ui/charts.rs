use std::f64::consts::TAU;

use eframe::egui::{Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, Polygon, Text};

use customer_dashboard::data::aggregate::{CategoryCount, total};

use crate::color::ColorMap;

/// Height of both charts, in points.
pub const CHART_HEIGHT: f32 = 300.0;

// ---------------------------------------------------------------------------
// Bar chart: customers per city
// ---------------------------------------------------------------------------

/// One bar per category, in the order of `counts`.
pub fn bar_chart(ui: &mut Ui, id: &str, x_label: &str, counts: &[CategoryCount], colors: &ColorMap) {
    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Bar::new(i as f64, c.count as f64)
                .name(&c.category)
                .fill(colors.color_for(&c.category))
                .width(0.7)
        })
        .collect();

    let labels: Vec<String> = counts.iter().map(|c| c.category.clone()).collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label("Customers")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Pie chart: membership distribution
// ---------------------------------------------------------------------------

/// Points per full turn of the pie outline.
const PIE_RESOLUTION: usize = 128;

/// Start and end angle (radians) of each slice, clockwise from 12 o'clock.
pub fn slice_angles(counts: &[CategoryCount]) -> Vec<(f64, f64)> {
    let sum = total(counts);
    if sum == 0 {
        return Vec::new();
    }
    let mut start = 0.0;
    counts
        .iter()
        .map(|c| {
            let end = start + TAU * c.count as f64 / sum as f64;
            let slice = (start, end);
            start = end;
            slice
        })
        .collect()
}

fn point_at(angle: f64, radius: f64) -> [f64; 2] {
    [radius * angle.sin(), radius * angle.cos()]
}

/// Pie of `counts`, labelled with each slice's share.
pub fn pie_chart(ui: &mut Ui, id: &str, counts: &[CategoryCount], colors: &ColorMap) {
    let sum = total(counts);
    let angles = slice_angles(counts);

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for (c, &(start, end)) in counts.iter().zip(&angles) {
                let steps = ((end - start) / TAU * PIE_RESOLUTION as f64).ceil().max(1.0) as usize;
                let mut points = vec![[0.0, 0.0]];
                points.extend((0..=steps).map(|s| {
                    point_at(start + (end - start) * s as f64 / steps as f64, 1.0)
                }));

                let color = colors.color_for(&c.category);
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(points))
                        .name(&c.category)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, color)),
                );

                let share = 100.0 * c.count as f64 / sum as f64;
                let [x, y] = point_at((start + end) / 2.0, 0.65);
                plot_ui.text(Text::new(PlotPoint::new(x, y), format!("{share:.1}%")));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_cover_the_full_turn_in_order() {
        let counts = vec![
            CategoryCount::new("Gold", 2),
            CategoryCount::new("Silver", 1),
            CategoryCount::new("Bronze", 1),
        ];
        let angles = slice_angles(&counts);
        assert_eq!(angles.len(), 3);
        assert_eq!(angles[0].0, 0.0);
        assert!((angles[0].1 - TAU / 2.0).abs() < 1e-12);
        assert_eq!(angles[1].0, angles[0].1);
        assert!((angles[2].1 - TAU).abs() < 1e-12);
    }

    #[test]
    fn empty_counts_have_no_slices() {
        assert!(slice_angles(&[]).is_empty());
    }
}
