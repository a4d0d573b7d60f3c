use core_types::CalculationKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Calculation error: Arithmetic overflow while aggregating '{0}' results")]
    Overflow(CalculationKind),
}
