//! # Econ Toolkit Analytics
//!
//! This crate holds the calculation core of both calculators: the formulas,
//! the append-only record log a session builds up, and the summary report
//! aggregated from that log.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O. It depends only on `core-types`.
//! - **Failures as Values:** Formulas never panic on a zero denominator. They return an
//!   `Outcome`, and the failed outcome is stored in the log next to the numeric ones.
//! - **Explicit Ownership:** The `RecordLog` is owned by whichever session creates it.
//!   There is no global log.
//!
//! ## Public API
//!
//! - `formulas`: marginal cost, average cost, total revenue, break-even quantity, GDP.
//! - `RecordLog`: the append-only accumulator.
//! - `SummaryReport`: per-kind average/min/max over the numeric results.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod formulas;
pub mod records;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use error::AnalyticsError;
pub use records::RecordLog;
pub use report::{GroupStats, GroupSummary, SummaryReport};
