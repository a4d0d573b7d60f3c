//! # Econ Toolkit Sessions
//!
//! The two interactive calculators. Each session owns its own `RecordLog`
//! and talks to the user through a `Prompter`, which works over any
//! `BufRead`/`Write` pair: stdin/stdout in the binary, byte buffers in tests.
//!
//! - `CostSession`: marginal cost, average cost, total revenue, break-even,
//!   cost and revenue charts, and the summary report.
//! - `GdpSession`: named GDP lists with JSON persistence and charts.

pub mod cost;
pub mod error;
pub mod gdp;
pub mod prompt;

pub use cost::CostSession;
pub use error::SessionError;
pub use gdp::GdpSession;
pub use prompt::Prompter;
