//! # Econ Toolkit Charts
//!
//! Turns session data into charts printed straight to the terminal.
//!
//! - `data`: pure builders that turn the record log or a GDP list into chart inputs.
//! - `render`: draws those inputs with `ratatui` widgets into an off-screen buffer
//!   and returns the buffer as text.

pub mod data;
pub mod error;
pub mod render;

pub use data::{GroupedBars, XyChart};
pub use error::ChartError;
pub use render::{render_bars, render_xy};
