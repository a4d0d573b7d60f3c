use crate::data::{GroupedBars, SeriesStyle, XyChart};
use crate::error::ChartError;
use configuration::ChartSettings;
use ratatui::buffer::Buffer;
use ratatui::layout::{Direction, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Bar, BarChart, BarGroup, Block, Chart, Dataset, GraphType, Widget};

// Printed charts lose their colours, so each series also gets its own marker.
const MARKERS: [Marker; 4] = [Marker::Braille, Marker::Dot, Marker::Block, Marker::HalfBlock];
const COLORS: [Color; 4] = [Color::Cyan, Color::Yellow, Color::Green, Color::Magenta];

/// Bar heights are scaled into `0..=BAR_SCALE` before drawing.
const BAR_SCALE: u64 = 1000;

/// Draws an x/y chart and returns it as printable text.
pub fn render_xy(chart: &XyChart, size: ChartSettings) -> Result<String, ChartError> {
    if !chart.has_data() {
        return Err(ChartError::NoData(chart.title.clone()));
    }
    tracing::debug!(title = %chart.title, series = chart.series.len(), "Rendering x/y chart.");

    let (x_min, x_max) = padded_bounds(
        chart
            .series
            .iter()
            .filter(|s| s.style != SeriesStyle::Reference)
            .flat_map(|s| s.points.iter().map(|p| p.0)),
    );

    let mut y_values: Vec<f64> = chart
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.1))
        .collect();
    if chart.series.iter().any(|s| s.style == SeriesStyle::Bars) {
        y_values.push(0.0);
    }
    let (y_min, y_max) = padded_bounds(y_values.into_iter());

    // Reference lines are stretched across the whole x range.
    let owned_points: Vec<Vec<(f64, f64)>> = chart
        .series
        .iter()
        .map(|s| match s.style {
            SeriesStyle::Reference => {
                let y = s.points.first().map(|p| p.1).unwrap_or_default();
                vec![(x_min, y), (x_max, y)]
            }
            _ => s.points.clone(),
        })
        .collect();

    let datasets: Vec<Dataset> = chart
        .series
        .iter()
        .zip(owned_points.iter())
        .enumerate()
        .map(|(i, (series, points))| {
            let graph_type = match series.style {
                SeriesStyle::Bars => GraphType::Bar,
                _ if points.len() == 1 => GraphType::Scatter,
                _ => GraphType::Line,
            };
            Dataset::default()
                .name(series.name.clone())
                .marker(MARKERS[i % MARKERS.len()])
                .graph_type(graph_type)
                .style(Style::default().fg(COLORS[i % COLORS.len()]))
                .data(points)
        })
        .collect();

    let x_labels = if chart.x_labels.is_empty() {
        numeric_labels(x_min, x_max)
    } else {
        sample_labels(&chart.x_labels)
    };

    let widget = Chart::new(datasets)
        .block(Block::bordered().title(chart.title.clone()))
        .x_axis(
            Axis::default()
                .title(chart.x_title.clone())
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(chart.y_title.clone())
                .bounds([y_min, y_max])
                .labels(numeric_labels(y_min, y_max)),
        );

    Ok(draw(widget, size))
}

/// Draws grouped bars and returns them as printable text.
///
/// Bars are drawn by magnitude; the printed value keeps the sign.
pub fn render_bars(chart: &GroupedBars, size: ChartSettings) -> Result<String, ChartError> {
    if !chart.has_data() {
        return Err(ChartError::NoData(chart.title.clone()));
    }
    tracing::debug!(title = %chart.title, groups = chart.groups.len(), "Rendering bar chart.");

    let max_magnitude = chart
        .groups
        .iter()
        .flat_map(|g| g.bars.iter().map(|b| b.value.abs()))
        .fold(0.0_f64, f64::max);

    let bar_count: usize = chart.groups.iter().map(|g| g.bars.len()).sum();
    let bar_width = if chart.horizontal {
        1
    } else {
        let gaps = bar_count + chart.groups.len() * 2;
        let available = usize::from(size.width.saturating_sub(2)).saturating_sub(gaps);
        (available / bar_count.max(1)).clamp(1, 9) as u16
    };

    let mut widget = BarChart::default()
        .block(Block::bordered().title(chart.title.clone()))
        .bar_width(bar_width)
        .bar_gap(1)
        .group_gap(2)
        .max(BAR_SCALE);
    if chart.horizontal {
        widget = widget.direction(Direction::Horizontal);
    }

    for group in &chart.groups {
        let bars: Vec<Bar> = group
            .bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                Bar::default()
                    .value(scale(bar.value, max_magnitude))
                    .label(Line::from(bar.label.clone()))
                    .text_value(bar.display.clone())
                    .style(Style::default().fg(COLORS[i % COLORS.len()]))
            })
            .collect();
        widget = widget.data(
            BarGroup::default()
                .label(Line::from(group.label.clone()))
                .bars(&bars),
        );
    }

    Ok(draw(widget, size))
}

fn scale(value: f64, max_magnitude: f64) -> u64 {
    if max_magnitude <= 0.0 || !value.is_finite() {
        return 0;
    }
    (value.abs() / max_magnitude * BAR_SCALE as f64).round() as u64
}

fn padded_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if min > max {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

fn numeric_labels(min: f64, max: f64) -> Vec<Span<'static>> {
    let mid = (min + max) / 2.0;
    [min, mid, max]
        .iter()
        .map(|v| Span::raw(format!("{v:.1}")))
        .collect()
}

/// Axis labels are spread evenly, so long label lists are thinned to first, middle and last.
fn sample_labels(labels: &[String]) -> Vec<Span<'static>> {
    let picked: Vec<&String> = match labels.len() {
        0..=3 => labels.iter().collect(),
        n => vec![&labels[0], &labels[n / 2], &labels[n - 1]],
    };
    picked.into_iter().map(|l| Span::raw(l.clone())).collect()
}

fn draw(widget: impl Widget, size: ChartSettings) -> String {
    let area = Rect::new(0, 0, size.width, size.height);
    let mut buffer = Buffer::empty(area);
    widget.render(area, &mut buffer);
    buffer_to_string(&buffer)
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let width = usize::from(buffer.area.width).max(1);
    buffer
        .content
        .chunks(width)
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BarGroupData, BarValue, Series};

    fn size() -> ChartSettings {
        ChartSettings { width: 60, height: 16 }
    }

    #[test]
    fn xy_chart_renders_title_and_canvas_size() {
        let chart = XyChart {
            title: "GDP Trend".to_string(),
            x_title: "Year".to_string(),
            y_title: "GDP".to_string(),
            x_labels: vec!["2019".to_string(), "2020".to_string()],
            series: vec![Series {
                name: "GDP".to_string(),
                style: SeriesStyle::Line,
                points: vec![(0.0, 100.0), (1.0, 170.0)],
            }],
        };

        let text = render_xy(&chart, size()).unwrap();
        assert!(text.contains("GDP Trend"));
        assert!(text.contains("2019"));
        assert_eq!(text.lines().count(), 16);
    }

    #[test]
    fn empty_chart_is_no_data() {
        let chart = XyChart {
            title: "Cost Analysis".to_string(),
            x_title: String::new(),
            y_title: String::new(),
            x_labels: Vec::new(),
            series: vec![Series {
                name: "Marginal Cost".to_string(),
                style: SeriesStyle::Line,
                points: Vec::new(),
            }],
        };
        assert!(matches!(render_xy(&chart, size()), Err(ChartError::NoData(_))));
    }

    #[test]
    fn bars_render_signed_values() {
        let chart = GroupedBars {
            title: "Components".to_string(),
            horizontal: false,
            groups: vec![BarGroupData {
                label: "2020".to_string(),
                bars: vec![
                    BarValue { label: "C".to_string(), value: 100.0, display: "100".to_string() },
                    BarValue { label: "NX".to_string(), value: -10.0, display: "-10".to_string() },
                ],
            }],
        };

        let text = render_bars(&chart, size()).unwrap();
        assert!(text.contains("Components"));
        assert!(text.contains("100"));
    }

    #[test]
    fn bars_are_scaled_by_magnitude() {
        assert_eq!(scale(-50.0, 100.0), 500);
        assert_eq!(scale(100.0, 100.0), BAR_SCALE);
        assert_eq!(scale(5.0, 0.0), 0);
    }

    #[test]
    fn bounds_are_padded_and_never_empty() {
        assert_eq!(padded_bounds([3.0].into_iter()), (2.0, 4.0));
        assert_eq!(padded_bounds(std::iter::empty()), (0.0, 1.0));
        let (lo, hi) = padded_bounds([0.0, 100.0].into_iter());
        assert!(lo < 0.0 && hi > 100.0);
    }

    #[test]
    fn long_label_lists_are_thinned() {
        let labels: Vec<String> = (2000..2010).map(|y| y.to_string()).collect();
        let sampled: Vec<String> = sample_labels(&labels).iter().map(|s| s.content.to_string()).collect();
        assert_eq!(sampled, vec!["2000", "2005", "2009"]);
    }
}
