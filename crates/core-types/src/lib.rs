pub mod enums;
pub mod error;
pub mod numeric;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::CalculationKind;
pub use error::{CoreError, FormulaError};
pub use numeric::{format_decimal, format_outcome, parse_decimal};
pub use structs::{CalculationRecord, GdpComponents, Outcome};
