use crate::enums::CalculationKind;
use crate::error::FormulaError;
use rust_decimal::Decimal;

/// The tagged result of a formula: a number, or the reason there is none.
pub type Outcome = Result<Decimal, FormulaError>;

/// A single calculation, captured the moment it was evaluated.
///
/// Records are immutable: the fields are private and only readable through accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRecord {
    kind: CalculationKind,
    inputs: Vec<(String, Decimal)>,
    outcome: Outcome,
}

impl CalculationRecord {
    pub fn new(kind: CalculationKind, inputs: Vec<(String, Decimal)>, outcome: Outcome) -> Self {
        Self { kind, inputs, outcome }
    }

    pub fn kind(&self) -> CalculationKind {
        self.kind
    }

    /// The named inputs, in the order they were prompted for.
    pub fn inputs(&self) -> &[(String, Decimal)] {
        &self.inputs
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// The numeric result, or `None` if the formula failed.
    pub fn value(&self) -> Option<Decimal> {
        self.outcome.as_ref().ok().copied()
    }
}

/// The four expenditure components of GDP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GdpComponents {
    pub consumption: Decimal,
    pub government: Decimal,
    pub investment: Decimal,
    pub net_exports: Decimal,
}

impl GdpComponents {
    pub const LABELS: [&'static str; 4] = ["C", "G", "I", "NX"];

    pub fn new(consumption: Decimal, government: Decimal, investment: Decimal, net_exports: Decimal) -> Self {
        Self { consumption, government, investment, net_exports }
    }

    /// The components in `C, G, I, NX` order, paired with their short labels.
    pub fn labelled(&self) -> [(&'static str, Decimal); 4] {
        [
            ("C", self.consumption),
            ("G", self.government),
            ("I", self.investment),
            ("NX", self.net_exports),
        ]
    }
}
