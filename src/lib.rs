//! Encoders for one-dimensional barcode symbologies.
//!
//! Every encoder turns a payload into a [`BarPattern`] of unit-wide bar and
//! space modules, optionally compressed into an [`RlePattern`]. Drawing the
//! result is left to the caller.
//!
//! ```
//! use barencode::{BarcodeEncoding, EncodeOptions, Symbology};
//!
//! let code = Symbology::Ean13
//!     .encode("750105453010", &EncodeOptions::default())
//!     .unwrap();
//! assert_eq!(code.text, "7501054530107");
//! assert_eq!(code.pattern.len(), 95);
//! ```

pub mod batch;
pub mod core;
pub mod symbology;

pub use crate::core::{BarPattern, EncodeError, EncodeOptions, Module, RlePattern};
pub use symbology::{
    Barcode, BarcodeEncoding, Checksum, ChecksumPolicy, LengthRule, Symbology,
    SymbologyDescriptor, UnitSystem, upca_to_upce, upce_to_upca,
};
