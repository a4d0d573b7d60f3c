use crate::error::AnalyticsError;
use crate::report::SummaryReport;
use core_types::{CalculationKind, CalculationRecord, Outcome};
use rust_decimal::Decimal;

/// The append-only log of calculations made during one session.
///
/// There is no way to remove or edit a record once it has been appended.
#[derive(Debug, Default, Clone)]
pub struct RecordLog {
    records: Vec<CalculationRecord>,
}

impl RecordLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a calculation, successful or not.
    pub fn record(&mut self, kind: CalculationKind, inputs: Vec<(String, Decimal)>, outcome: Outcome) {
        tracing::debug!(%kind, ?outcome, "Recording calculation.");
        self.records.push(CalculationRecord::new(kind, inputs, outcome));
    }

    pub fn records(&self) -> &[CalculationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The numeric results of one kind, in the order they were recorded.
    pub fn values_of(&self, kind: CalculationKind) -> Vec<Decimal> {
        self.records
            .iter()
            .filter(|r| r.kind() == kind)
            .filter_map(|r| r.value())
            .collect()
    }

    /// Groups the log by kind and aggregates the numeric results of each group.
    pub fn summarize(&self) -> Result<SummaryReport, AnalyticsError> {
        SummaryReport::from_records(&self.records)
    }
}
