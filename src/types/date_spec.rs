//! Date bounds for extraction requests.

use chrono::NaiveDate;
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
#[error("Failed to parse '{input}' as a calendar date (expected YYYY-MM-DD)")]
pub struct DateParseError {
    pub input: String,
    #[source]
    pub source: chrono::ParseError,
}

/// One bound of the extraction date window, resolved once per call.
///
/// Replaces a runtime type check on "string or date" parameters with an
/// explicit sum type. `Unspecified` falls back to the corresponding end of
/// the loaded time axis.
///
/// # Examples
///
/// ```
/// use gldas::DateSpec;
/// use chrono::NaiveDate;
///
/// let from_text: DateSpec = "2020-02-01".into();
/// let from_date: DateSpec = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap().into();
/// assert_eq!(DateSpec::default(), DateSpec::Unspecified);
/// assert_ne!(from_text, from_date); // parsed lazily, at extraction time
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateSpec {
    /// Use the first (for a start bound) or last (for an end bound)
    /// timestamp present in the loaded series.
    #[default]
    Unspecified,
    Literal(NaiveDate),
    Text(String),
}

impl DateSpec {
    /// Resolves to a concrete date, substituting `fallback` for
    /// [`DateSpec::Unspecified`].
    pub(crate) fn resolve(&self, fallback: NaiveDate) -> Result<NaiveDate, DateParseError> {
        match self {
            DateSpec::Unspecified => Ok(fallback),
            DateSpec::Literal(date) => Ok(*date),
            DateSpec::Text(text) => {
                NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|source| DateParseError {
                    input: text.clone(),
                    source,
                })
            }
        }
    }
}

impl From<NaiveDate> for DateSpec {
    fn from(date: NaiveDate) -> Self {
        DateSpec::Literal(date)
    }
}

impl From<&str> for DateSpec {
    fn from(text: &str) -> Self {
        DateSpec::Text(text.to_string())
    }
}

impl From<String> for DateSpec {
    fn from(text: String) -> Self {
        DateSpec::Text(text)
    }
}
