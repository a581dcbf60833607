//! # SCBF
//!
//! A compressed, typed columnar binary file format with:
//! - Per-column type inference (int32, float64, utf8)
//! - zlib-compressed data blocks with recorded sizes and offsets
//! - Random-access single-column reads via a metadata table
//! - CSV conversion in both directions
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CLI (encode/decode/info)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Convert                                 │
//! │            (CSV codec ↔ SCBF engine glue)                    │
//! └───────┬─────────────────────────────────────┬───────────────┘
//!         │ write path                          │ read path
//!         ▼                                     ▼
//!   ┌─────────────┐                      ┌─────────────┐
//!   │   Column    │                      │   Format    │
//!   │ infer/codec │                      │   Reader    │
//!   └──────┬──────┘                      └──────┬──────┘
//!          │                                    │
//!          ▼                                    ▼
//!   ┌─────────────┐                      ┌─────────────┐
//!   │   Format    │                      │   Column    │
//!   │   Writer    │                      │    codec    │
//!   └─────────────┘                      └─────────────┘
//!            both paths: Compress (zlib) + Schema (JSON blob)
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod compress;
pub mod schema;
pub mod column;
pub mod format;
pub mod convert;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use column::{ColumnData, Value};
pub use config::Config;
pub use convert::{csv_to_scbf, scbf_to_csv};
pub use error::{Result, ScbfError};
pub use format::{ScbfReader, ScbfWriter};
pub use schema::{ColumnSpec, ColumnType, Schema};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the scbf crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
