//! Building blocks shared by every symbology: tables, checksums, patterns,
//! options and the error type.

pub mod checksum;
pub mod error;
pub mod options;
pub mod pattern;
pub mod tables;

pub use error::{EncodeError, Result};
pub use options::EncodeOptions;
pub use pattern::{BarPattern, MAX_RUN, Module, RlePattern};
