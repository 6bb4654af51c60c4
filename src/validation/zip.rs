use std::fmt;

use crate::error::LookupError;

/// Number of digits in a US ZIP code.
pub const ZIP_CODE_LEN: usize = 5;

/// A validated 5-digit ZIP code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZipCode(String);

impl ZipCode {
    /// Strip every non-digit from `raw` and require exactly five digits.
    ///
    /// Separators are tolerated (`"10-001"` is accepted), but ZIP+4 codes are
    /// not truncated (`"10001-1234"` has nine digits and is rejected).
    pub fn normalize(raw: &str) -> Result<Self, LookupError> {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() != ZIP_CODE_LEN {
            return Err(LookupError::InvalidZip);
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
