//! # Econ Toolkit Storage Crate
//!
//! This crate owns the named GDP series and their persistence. It is the
//! GDP tool's only "permanent archive": a single JSON file.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All file and JSON details live here. The session only sees
//!   `SeriesStore` and the `load`/`save` pair.
//! - **Whole-Document:** The store is always written and read in full. A missing
//!   file is treated as an empty store.
//!
//! ## Public API
//!
//! - `GdpEntry`: one year of components plus the derived GDP.
//! - `SeriesStore`: the insertion-ordered map of list names to entries.
//! - `SeriesRepository`: loads and saves a `SeriesStore` at a file path.
//! - `StorageError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod repository;
pub mod series;

// Re-export the key components to create a clean, public-facing API.
pub use error::StorageError;
pub use repository::SeriesRepository;
pub use series::{GdpEntry, SeriesStore};
