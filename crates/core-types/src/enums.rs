use std::fmt;

/// The type tag carried by every calculation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalculationKind {
    MarginalCost,
    AverageCost,
    TotalRevenue,
    BreakEven,
    Gdp,
}

impl CalculationKind {
    /// Returns the human-readable label used in menus and reports.
    pub fn label(&self) -> &'static str {
        match self {
            CalculationKind::MarginalCost => "Marginal Cost",
            CalculationKind::AverageCost => "Average Cost",
            CalculationKind::TotalRevenue => "Total Revenue",
            CalculationKind::BreakEven => "Break-even Analysis",
            CalculationKind::Gdp => "GDP",
        }
    }
}

impl fmt::Display for CalculationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
