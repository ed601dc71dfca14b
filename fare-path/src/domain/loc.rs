//! Location codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid location code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location code {input:?}: {reason}")]
pub struct InvalidLocCode {
    input: String,
    reason: &'static str,
}

/// A 3-letter IATA airport or city code, stored uppercase.
///
/// Lowercase input is accepted and normalised, so `"lon"` and `"LON"` parse
/// to the same code.
///
/// # Examples
///
/// ```
/// use fare_path::domain::LocCode;
///
/// let lon: LocCode = "lon".parse().unwrap();
/// assert_eq!(lon.as_str(), "LON");
///
/// assert!(LocCode::parse("LO").is_err());
/// assert!(LocCode::parse("L0N").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocCode([u8; 3]);

impl LocCode {
    pub fn parse(s: &str) -> Result<Self, InvalidLocCode> {
        let invalid = |reason| InvalidLocCode {
            input: s.to_string(),
            reason,
        };

        let [a, b, c] = <[u8; 3]>::try_from(s.as_bytes())
            .map_err(|_| invalid("expected exactly 3 characters"))?;

        let mut code = [a, b, c];
        for byte in &mut code {
            if !byte.is_ascii_alphabetic() {
                return Err(invalid("expected ASCII letters only"));
            }
            byte.make_ascii_uppercase();
        }

        Ok(LocCode(code))
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl FromStr for LocCode {
    type Err = InvalidLocCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LocCode::parse(s)
    }
}

impl TryFrom<String> for LocCode {
    type Error = InvalidLocCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LocCode::parse(&value)
    }
}

impl From<LocCode> for String {
    fn from(value: LocCode) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Debug for LocCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocCode({})", self.as_str())
    }
}

impl fmt::Display for LocCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn parse_roundtrips_letters(s in "[A-Za-z]{3}") {
            let code = LocCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.to_ascii_uppercase());
        }

        #[test]
        fn wrong_length_rejected(s in "[A-Z]{0,2}|[A-Z]{4,6}") {
            prop_assert!(LocCode::parse(&s).is_err());
        }
    }
}
