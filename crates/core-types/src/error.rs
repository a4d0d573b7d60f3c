use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}

/// A formula failure. Carried as a value inside a record, never raised.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaError {
    #[error("Error: Division by zero.")]
    DivisionByZero,

    #[error("Error: Arithmetic overflow.")]
    Overflow,
}
