//! GSTIN structure and checksum validation
//!
//! A GSTIN is 15 characters:
//!
//! ```text
//! 27 AABCU9603R 1 Z N
//! |  |          | | +-- checksum (mod 36 over the first 14 characters)
//! |  |          | +---- literal 'Z'
//! |  |          +------ entity code, 1-9
//! |  +----------------- PAN of the holder
//! +-------------------- state code
//! ```
//!
//! Checks run in that order and stop at the first failure, so the caller
//! always learns which part of the number is wrong.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::states::{is_valid_state_code, state_name};

/// Length of every GSTIN
pub const GSTIN_LENGTH: usize = 15;

const CHECKSUM_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The check a GSTIN failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum GstinError {
    #[error("GSTIN must be exactly 15 characters, got {actual}")]
    InvalidLength { actual: usize },
    #[error("'{code}' is not a known state code")]
    InvalidStateCode { code: String },
    #[error("characters 3-12 must be a PAN (5 letters, 4 digits, 1 letter), got '{pan}'")]
    InvalidPan { pan: String },
    #[error("character 13 must be a digit from 1 to 9, got '{found}'")]
    InvalidEntityCode { found: char },
    #[error("character 14 must be 'Z', got '{found}'")]
    MissingDefaultZ { found: char },
    #[error("checksum character should be '{expected}', got '{found}'")]
    ChecksumMismatch { expected: char, found: char },
}

/// Outcome of [`validate_gstin`], shaped for API responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GstinValidation {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<GstinError>,
}

/// Validate a GSTIN, reporting the first check that failed
///
/// Input is taken as-is: lowercase letters or surrounding whitespace fail.
/// Use [`normalize_gstin`] first for user-typed input.
pub fn validate_gstin(gstin: &str) -> GstinValidation {
    match check_gstin(gstin) {
        Ok(()) => GstinValidation {
            is_valid: true,
            error: None,
        },
        Err(err) => GstinValidation {
            is_valid: false,
            error: Some(err),
        },
    }
}

/// Whether `gstin` passes every check including the checksum
pub fn is_valid_gstin(gstin: &str) -> bool {
    check_gstin(gstin).is_ok()
}

/// Trim and uppercase user input
pub fn normalize_gstin(gstin: &str) -> String {
    gstin.trim().to_ascii_uppercase()
}

/// Checksum character for the first 14 characters of a GSTIN
///
/// Returns `None` when the input is not 14 characters of `0-9A-Z`.
pub fn compute_checksum(first14: &str) -> Option<char> {
    if first14.len() != GSTIN_LENGTH - 1 {
        return None;
    }

    let mut sum = 0u32;
    for (i, byte) in first14.bytes().enumerate() {
        let value = CHECKSUM_ALPHABET.iter().position(|&c| c == byte)? as u32;
        let factor = if i % 2 == 0 { 1 } else { 2 };
        let product = value * factor;
        sum += product / 36 + product % 36;
    }

    let check = (36 - sum % 36) % 36;
    Some(CHECKSUM_ALPHABET[check as usize] as char)
}

/// Run all checks
pub(crate) fn check_gstin(gstin: &str) -> Result<(), GstinError> {
    let chars = check_structure(gstin)?;

    let first14: String = chars[..14].iter().collect();
    let found = chars[14];
    // first14 passed the structural checks so it is always in the alphabet
    let expected = compute_checksum(&first14).unwrap_or('?');
    if expected != found {
        return Err(GstinError::ChecksumMismatch { expected, found });
    }

    Ok(())
}

/// Checks 1-5: everything except the checksum
pub(crate) fn check_structure(gstin: &str) -> Result<Vec<char>, GstinError> {
    let chars: Vec<char> = gstin.chars().collect();

    if chars.len() != GSTIN_LENGTH {
        return Err(GstinError::InvalidLength {
            actual: chars.len(),
        });
    }

    let state: String = chars[..2].iter().collect();
    if !chars[..2].iter().all(char::is_ascii_digit) || !is_valid_state_code(&state) {
        return Err(GstinError::InvalidStateCode { code: state });
    }

    if !is_pan(&chars[2..12]) {
        return Err(GstinError::InvalidPan {
            pan: chars[2..12].iter().collect(),
        });
    }

    let entity = chars[12];
    if !matches!(entity, '1'..='9') {
        return Err(GstinError::InvalidEntityCode { found: entity });
    }

    if chars[13] != 'Z' {
        return Err(GstinError::MissingDefaultZ { found: chars[13] });
    }

    Ok(chars)
}

/// PAN grammar: 5 letters, 4 digits, 1 letter
fn is_pan(pan: &[char]) -> bool {
    pan.len() == 10
        && pan[..5].iter().all(char::is_ascii_uppercase)
        && pan[5..9].iter().all(char::is_ascii_digit)
        && pan[9].is_ascii_uppercase()
}

/// A GSTIN that passed every check
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Gstin(String);

impl Gstin {
    /// Validate and wrap a GSTIN
    pub fn parse(gstin: &str) -> Result<Self, GstinError> {
        check_gstin(gstin)?;
        Ok(Self(gstin.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Two-digit state code
    pub fn state_code(&self) -> &str {
        &self.0[..2]
    }

    /// Name of the registering state or UT
    pub fn state_name(&self) -> &'static str {
        // state code was checked against the table on construction
        state_name(self.state_code()).unwrap_or("Unknown")
    }

    /// PAN of the registered holder
    pub fn pan(&self) -> &str {
        &self.0[2..12]
    }

    /// Registration number of the PAN holder within the state
    pub fn entity_code(&self) -> char {
        self.0.as_bytes()[12] as char
    }
}

impl FromStr for Gstin {
    type Err = GstinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gstin::parse(s)
    }
}

impl TryFrom<String> for Gstin {
    type Error = GstinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        check_gstin(&value)?;
        Ok(Self(value))
    }
}

impl From<Gstin> for String {
    fn from(gstin: Gstin) -> Self {
        gstin.0
    }
}

impl AsRef<str> for Gstin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Gstin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
