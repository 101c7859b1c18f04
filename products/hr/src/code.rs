//! Sequential business codes such as `PB00042`.
//!
//! A code is a two-letter prefix followed by a zero-padded counter. Codes are
//! compared as plain strings, which orders them numerically only because the
//! counter has a fixed width.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub const CODE_DIGITS: usize = 5;
const MAX_SEQUENCE: u32 = 99_999;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodeError {
    #[error("code `{0}` is not a two-letter prefix followed by digits")]
    Malformed(String),
    #[error("code sequence {prefix} is exhausted at {last}")]
    Exhausted { prefix: String, last: String },
}

static DEPARTMENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^PB[0-9]{5}$").expect("department code pattern"));
static POSITION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^VT[0-9]{5}$").expect("position code pattern"));
static EMPLOYEE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^NV[0-9]{5}$").expect("employee code pattern"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeKind {
    Department,
    Position,
    Employee,
}

impl CodeKind {
    pub fn prefix(self) -> &'static str {
        match self {
            CodeKind::Department => "PB",
            CodeKind::Position => "VT",
            CodeKind::Employee => "NV",
        }
    }

    /// Code the sequence starts from when the table is empty.
    pub fn baseline(self) -> &'static str {
        match self {
            CodeKind::Department => "PB00000",
            CodeKind::Position => "VT00000",
            CodeKind::Employee => "NV00000",
        }
    }

    pub fn is_valid(self, code: &str) -> bool {
        let pattern = match self {
            CodeKind::Department => &DEPARTMENT_PATTERN,
            CodeKind::Position => &POSITION_PATTERN,
            CodeKind::Employee => &EMPLOYEE_PATTERN,
        };
        pattern.is_match(code)
    }

    /// Successor of the greatest stored code, or the first code of the sequence.
    pub fn next_after(self, latest: Option<&str>) -> Result<String, CodeError> {
        next_code(latest, self.baseline())
    }
}

/// Increment the numeric suffix of `latest` (or `baseline` when nothing is stored),
/// keeping its prefix.
pub fn next_code(latest: Option<&str>, baseline: &str) -> Result<String, CodeError> {
    let current = latest.unwrap_or(baseline);
    let (prefix, digits) = split_code(current)?;
    let number: u32 = digits
        .parse()
        .map_err(|_| CodeError::Malformed(current.to_string()))?;
    if number >= MAX_SEQUENCE {
        return Err(CodeError::Exhausted {
            prefix: prefix.to_string(),
            last: current.to_string(),
        });
    }
    Ok(format!("{prefix}{:0width$}", number + 1, width = CODE_DIGITS))
}

fn split_code(code: &str) -> Result<(&str, &str), CodeError> {
    let malformed = || CodeError::Malformed(code.to_string());
    let prefix = code
        .get(..2)
        .filter(|prefix| prefix.chars().all(|c| c.is_ascii_alphabetic()))
        .ok_or_else(malformed)?;
    let digits = code
        .get(2..)
        .filter(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
        .ok_or_else(malformed)?;
    Ok((prefix, digits))
}
