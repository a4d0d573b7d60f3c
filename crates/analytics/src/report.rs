use crate::error::AnalyticsError;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use core_types::{CalculationKind, CalculationRecord, format_decimal};
use rust_decimal::Decimal;
use std::fmt;

/// Average, minimum and maximum over the numeric results of one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupStats {
    pub average: Decimal,
    pub min: Decimal,
    pub max: Decimal,
}

/// One row of the summary: everything recorded under a single kind.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub kind: CalculationKind,
    /// All records of this kind, failed ones included.
    pub count: usize,
    pub errors: usize,
    /// `None` when every record of this kind failed.
    pub stats: Option<GroupStats>,
}

/// The per-kind summary of a record log.
///
/// Groups appear in the order their kind was first recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryReport {
    pub groups: Vec<GroupSummary>,
}

impl SummaryReport {
    pub fn from_records(records: &[CalculationRecord]) -> Result<Self, AnalyticsError> {
        let mut kinds: Vec<CalculationKind> = Vec::new();
        for record in records {
            if !kinds.contains(&record.kind()) {
                kinds.push(record.kind());
            }
        }

        let groups = kinds
            .into_iter()
            .map(|kind| {
                let group: Vec<&CalculationRecord> =
                    records.iter().filter(|r| r.kind() == kind).collect();
                let values: Vec<Decimal> = group.iter().filter_map(|r| r.value()).collect();

                Ok(GroupSummary {
                    kind,
                    count: group.len(),
                    errors: group.len() - values.len(),
                    stats: group_stats(kind, &values)?,
                })
            })
            .collect::<Result<Vec<_>, AnalyticsError>>()?;

        Ok(Self { groups })
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Looks up the row for a kind.
    pub fn group(&self, kind: CalculationKind) -> Option<&GroupSummary> {
        self.groups.iter().find(|g| g.kind == kind)
    }

    /// Builds the grid table shown to the user.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["Type", "Count", "Errors", "Average", "Min", "Max"]);

        for group in &self.groups {
            let (average, min, max) = match group.stats {
                Some(stats) => (
                    display_amount(stats.average),
                    display_amount(stats.min),
                    display_amount(stats.max),
                ),
                None => ("n/a".to_string(), "n/a".to_string(), "n/a".to_string()),
            };
            table.add_row(vec![
                Cell::new(group.kind.label()),
                Cell::new(group.count).set_alignment(CellAlignment::Right),
                Cell::new(group.errors).set_alignment(CellAlignment::Right),
                Cell::new(average).set_alignment(CellAlignment::Right),
                Cell::new(min).set_alignment(CellAlignment::Right),
                Cell::new(max).set_alignment(CellAlignment::Right),
            ]);
        }

        table
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_table())
    }
}

fn group_stats(kind: CalculationKind, values: &[Decimal]) -> Result<Option<GroupStats>, AnalyticsError> {
    let Some(&first) = values.first() else {
        return Ok(None);
    };

    let mut sum = Decimal::ZERO;
    let (mut min, mut max) = (first, first);
    for &value in values {
        sum = sum.checked_add(value).ok_or(AnalyticsError::Overflow(kind))?;
        min = min.min(value);
        max = max.max(value);
    }

    let average = sum
        .checked_div(Decimal::from(values.len()))
        .ok_or(AnalyticsError::Overflow(kind))?;

    Ok(Some(GroupStats { average, min, max }))
}

fn display_amount(value: Decimal) -> String {
    format_decimal(value.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecordLog;
    use core_types::FormulaError;
    use rust_decimal_macros::dec;

    #[test]
    fn groups_by_kind_in_first_seen_order() {
        let mut log = RecordLog::new();
        log.record(CalculationKind::MarginalCost, vec![], Ok(dec!(5)));
        log.record(CalculationKind::MarginalCost, vec![], Ok(dec!(7)));
        log.record(CalculationKind::AverageCost, vec![], Ok(dec!(3)));

        let report = log.summarize().unwrap();
        assert_eq!(report.groups.len(), 2);
        assert_eq!(report.groups[0].kind, CalculationKind::MarginalCost);
        assert_eq!(
            report.groups[0].stats,
            Some(GroupStats { average: dec!(6), min: dec!(5), max: dec!(7) })
        );
        assert_eq!(
            report.group(CalculationKind::AverageCost).unwrap().stats,
            Some(GroupStats { average: dec!(3), min: dec!(3), max: dec!(3) })
        );
    }

    #[test]
    fn errors_are_counted_but_not_aggregated() {
        let mut log = RecordLog::new();
        log.record(CalculationKind::BreakEven, vec![], Ok(dec!(50)));
        log.record(CalculationKind::BreakEven, vec![], Err(FormulaError::DivisionByZero));
        log.record(CalculationKind::BreakEven, vec![], Ok(dec!(10)));

        let group = log.summarize().unwrap().groups.remove(0);
        assert_eq!(group.count, 3);
        assert_eq!(group.errors, 1);
        assert_eq!(group.stats.unwrap().average, dec!(30));
    }

    #[test]
    fn all_error_group_is_kept_without_stats() {
        let mut log = RecordLog::new();
        log.record(CalculationKind::AverageCost, vec![], Err(FormulaError::DivisionByZero));

        let report = log.summarize().unwrap();
        let group = report.group(CalculationKind::AverageCost).unwrap();
        assert_eq!(group.errors, 1);
        assert_eq!(group.stats, None);
        assert!(report.to_string().contains("n/a"));
    }

    #[test]
    fn empty_log_gives_empty_report() {
        assert!(RecordLog::new().summarize().unwrap().is_empty());
    }

    #[test]
    fn table_shows_rounded_amounts() {
        let mut log = RecordLog::new();
        log.record(CalculationKind::TotalRevenue, vec![], Ok(dec!(10)));
        log.record(CalculationKind::TotalRevenue, vec![], Ok(dec!(10)));
        log.record(CalculationKind::TotalRevenue, vec![], Ok(dec!(11)));

        let rendered = log.summarize().unwrap().to_string();
        assert!(rendered.contains("Total Revenue"));
        assert!(rendered.contains("10.33"));
        assert!(rendered.contains("Average"));
    }
}
