use serde::{Deserialize, Serialize};

use crate::core::error::{EncodeError, Result};

/// Per-call encoder configuration.
///
/// Deserialization rejects keys it does not know about, so a misspelled
/// option in a job file fails loudly instead of being ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodeOptions {
    /// Compute and append check characters. When false the payload must
    /// already carry them and they are verified.
    pub append_check_digit: bool,
    /// Character used when rendering a bar unit.
    pub bar_symbol: char,
    /// Character used when rendering a space unit.
    pub space_symbol: char,
    /// Code 93 only: promote any ASCII character to its shifted form.
    pub auto_promote_full_ascii: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            append_check_digit: true,
            bar_symbol: '1',
            space_symbol: '0',
            auto_promote_full_ascii: false,
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_check_digit(mut self, append: bool) -> Self {
        self.append_check_digit = append;
        self
    }

    pub fn with_symbols(mut self, bar: char, space: char) -> Self {
        self.bar_symbol = bar;
        self.space_symbol = space;
        self
    }

    pub fn with_full_ascii(mut self, promote: bool) -> Self {
        self.auto_promote_full_ascii = promote;
        self
    }

    /// Reject option combinations no symbology can honour.
    pub fn validate(&self) -> Result<()> {
        if self.bar_symbol == self.space_symbol {
            return Err(EncodeError::ConfigurationConflict(format!(
                "bar and space symbols must differ (both '{}')",
                self.bar_symbol
            )));
        }
        Ok(())
    }
}
