//! Chart inputs, built as plain data from the record log and the GDP series.

use analytics::RecordLog;
use core_types::{CalculationKind, GdpComponents};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use storage::GdpEntry;

/// How a series is drawn on an x/y chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    Line,
    Bars,
    /// A horizontal reference line spanning the whole x range.
    Reference,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub style: SeriesStyle,
    pub points: Vec<(f64, f64)>,
}

/// An x/y chart: line, bar-on-axis, or stacked layers drawn as lines.
#[derive(Debug, Clone, PartialEq)]
pub struct XyChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    /// Labels for the x axis, left to right. Empty means numeric labels.
    pub x_labels: Vec<String>,
    pub series: Vec<Series>,
}

impl XyChart {
    pub fn has_data(&self) -> bool {
        self.series
            .iter()
            .any(|s| s.style != SeriesStyle::Reference && !s.points.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarValue {
    pub label: String,
    pub value: f64,
    /// Text printed with the bar, e.g. `58.8%`.
    pub display: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGroupData {
    pub label: String,
    pub bars: Vec<BarValue>,
}

/// Grouped bars, drawn vertically or horizontally.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedBars {
    pub title: String,
    pub horizontal: bool,
    pub groups: Vec<BarGroupData>,
}

impl GroupedBars {
    pub fn has_data(&self) -> bool {
        self.groups.iter().any(|g| !g.bars.is_empty())
    }
}

fn to_f64(value: Decimal) -> f64 {
    // Every Decimal is within f64 range; precision loss only affects plotting.
    value.to_f64().unwrap_or_default()
}

fn instances(values: &[Decimal]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| ((i + 1) as f64, to_f64(*v)))
        .collect()
}

/// Marginal and average cost results by production instance.
///
/// Each series is numbered from 1 independently, failed calculations are skipped.
pub fn cost_chart(log: &RecordLog) -> XyChart {
    XyChart {
        title: "Cost Analysis Over Production".to_string(),
        x_title: "Production Instance".to_string(),
        y_title: "Cost".to_string(),
        x_labels: Vec::new(),
        series: vec![
            Series {
                name: CalculationKind::MarginalCost.label().to_string(),
                style: SeriesStyle::Line,
                points: instances(&log.values_of(CalculationKind::MarginalCost)),
            },
            Series {
                name: CalculationKind::AverageCost.label().to_string(),
                style: SeriesStyle::Line,
                points: instances(&log.values_of(CalculationKind::AverageCost)),
            },
        ],
    }
}

/// Total revenue by sales instance, plus the first break-even result as a reference line.
pub fn revenue_chart(log: &RecordLog) -> XyChart {
    let revenues = instances(&log.values_of(CalculationKind::TotalRevenue));
    let mut series = vec![Series {
        name: CalculationKind::TotalRevenue.label().to_string(),
        style: SeriesStyle::Bars,
        points: revenues,
    }];

    if let Some(&break_even) = log.values_of(CalculationKind::BreakEven).first() {
        series.push(Series {
            name: "Break-even Point".to_string(),
            style: SeriesStyle::Reference,
            points: vec![(0.0, to_f64(break_even))],
        });
    }

    XyChart {
        title: "Total Revenue and Break-even Analysis".to_string(),
        x_title: "Sales Instance".to_string(),
        y_title: "Revenue".to_string(),
        x_labels: Vec::new(),
        series,
    }
}

/// Each component's share of the GDP, GDP itself excluded.
///
/// Shares are taken of the sum of absolute values so that a trade deficit
/// still gets a slice; its label keeps the minus sign.
pub fn component_shares(list_name: &str, components: &GdpComponents) -> GroupedBars {
    let labelled = components.labelled();
    let total = labelled
        .iter()
        .fold(Decimal::ZERO, |acc, (_, v)| acc.saturating_add(v.abs()));

    let bars = labelled
        .iter()
        .map(|(label, value)| {
            let share = if total.is_zero() {
                Decimal::ZERO
            } else {
                value.abs() / total * Decimal::ONE_HUNDRED
            };
            let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
            BarValue {
                label: label.to_string(),
                value: to_f64(share),
                display: format!("{sign}{share:.1}%"),
            }
        })
        .collect();

    GroupedBars {
        title: format!("GDP Components for {list_name}"),
        horizontal: true,
        groups: vec![BarGroupData { label: String::new(), bars }],
    }
}

fn year_labels(entries: &[GdpEntry]) -> Vec<String> {
    entries.iter().map(|e| e.year().to_string()).collect()
}

/// GDP of every entry of a list, in insertion order.
pub fn gdp_trend(list_name: &str, entries: &[GdpEntry]) -> XyChart {
    let points = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (i as f64, to_f64(e.gdp())))
        .collect();

    XyChart {
        title: format!("GDP Trend Over Years for List: {list_name}"),
        x_title: "Year".to_string(),
        y_title: "GDP".to_string(),
        x_labels: year_labels(entries),
        series: vec![Series {
            name: "GDP".to_string(),
            style: SeriesStyle::Line,
            points,
        }],
    }
}

/// One group per year, one bar per component.
pub fn component_comparison(list_name: &str, entries: &[GdpEntry]) -> GroupedBars {
    let groups = entries
        .iter()
        .map(|entry| BarGroupData {
            label: entry.year().to_string(),
            bars: entry
                .components()
                .labelled()
                .iter()
                .map(|(label, value)| BarValue {
                    label: label.to_string(),
                    value: to_f64(*value),
                    display: value.normalize().to_string(),
                })
                .collect(),
        })
        .collect();

    GroupedBars {
        title: format!("GDP Component Comparison Over Years for List: {list_name}"),
        horizontal: false,
        groups,
    }
}

/// Cumulative layers `C`, `C+G`, `C+G+I`, `C+G+I+NX` per year.
pub fn stacked_area(list_name: &str, entries: &[GdpEntry]) -> XyChart {
    let mut layers: Vec<Series> = GdpComponents::LABELS
        .iter()
        .map(|label| Series {
            name: label.to_string(),
            style: SeriesStyle::Line,
            points: Vec::with_capacity(entries.len()),
        })
        .collect();

    for (i, entry) in entries.iter().enumerate() {
        let mut running = Decimal::ZERO;
        for (layer, (_, value)) in layers.iter_mut().zip(entry.components().labelled()) {
            running = running.saturating_add(value);
            layer.points.push((i as f64, to_f64(running)));
        }
    }

    XyChart {
        title: format!("GDP Components Over Years for List: {list_name}"),
        x_title: "Year".to_string(),
        y_title: "Value".to_string(),
        x_labels: year_labels(entries),
        series: layers,
    }
}
