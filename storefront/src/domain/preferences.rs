//! Device preferences kept in the key-value side channel.
//!
//! Preferences are advisory: unknown stored values fall back to defaults
//! rather than failing a request. Every value is scoped to a [`DeviceId`],
//! so one visitor's theme never leaks to another.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Store key holding the theme.
pub const THEME_KEY: &str = "theme";
/// Store key holding the last table number.
pub const TABLE_NUMBER_KEY: &str = "table_number";

const TABLE_NUMBER_MAX_CHARS: usize = 16;

/// Opaque identifier of one browser, issued on its first visit.
///
/// # Examples
/// ```
/// use storefront::domain::DeviceId;
///
/// let device = DeviceId::generate();
/// assert_eq!(device.to_string().parse::<DeviceId>().ok(), Some(device));
/// assert_eq!(device.key("theme"), format!("{device}/theme"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(Uuid);

impl DeviceId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Store key for `name` scoped to this device.
    #[must_use]
    pub fn key(&self, name: &str) -> String {
        format!("{}/{name}", self.0)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DeviceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Colour scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Lowercase name as stored and serialised.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored theme is neither `light` nor `dark`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme `{0}`")]
pub struct ThemeParseError(pub String);

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ThemeParseError(other.to_owned())),
        }
    }
}

/// Validation errors for [`TableNumber`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableNumberValidationError {
    #[error("table number must not be empty")]
    Empty,
    #[error("table number must be at most 16 characters")]
    TooLong,
    #[error("table number may only contain letters, digits or '-'")]
    InvalidCharacter,
}

/// Table label passed in the storefront link, e.g. `12` or `T-4`.
///
/// # Examples
/// ```
/// use storefront::domain::TableNumber;
///
/// let table = TableNumber::new(" 12 ").unwrap();
/// assert_eq!(table.as_ref(), "12");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableNumber(String);

impl TableNumber {
    /// Trim and validate a raw table label.
    ///
    /// # Errors
    /// Returns [`TableNumberValidationError`] for empty, overlong or
    /// non-alphanumeric labels.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TableNumberValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TableNumberValidationError::Empty);
        }
        if trimmed.chars().count() > TABLE_NUMBER_MAX_CHARS {
            return Err(TableNumberValidationError::TooLong);
        }
        if !trimmed.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return Err(TableNumberValidationError::InvalidCharacter);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for TableNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<TableNumber> for String {
    fn from(value: TableNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for TableNumber {
    type Error = TableNumberValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Current preference values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub theme: Theme,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "12")]
    pub table_number: Option<TableNumber>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Theme::Light, Theme::Dark)]
    #[case(Theme::Dark, Theme::Light)]
    fn toggling_flips_the_theme(#[case] from: Theme, #[case] to: Theme) {
        assert_eq!(from.toggled(), to);
        assert_eq!(from.toggled().toggled(), from);
    }

    #[rstest]
    #[case("light", Ok(Theme::Light))]
    #[case("dark", Ok(Theme::Dark))]
    #[case("Dark", Err(ThemeParseError("Dark".to_owned())))]
    #[case("", Err(ThemeParseError(String::new())))]
    fn parses_stored_themes(#[case] raw: &str, #[case] expected: Result<Theme, ThemeParseError>) {
        assert_eq!(raw.parse::<Theme>(), expected);
    }

    #[rstest]
    #[case("", TableNumberValidationError::Empty)]
    #[case("   ", TableNumberValidationError::Empty)]
    #[case("12345678901234567", TableNumberValidationError::TooLong)]
    #[case("4; drop", TableNumberValidationError::InvalidCharacter)]
    fn rejects_invalid_table_numbers(
        #[case] raw: &str,
        #[case] expected: TableNumberValidationError,
    ) {
        assert_eq!(TableNumber::new(raw), Err(expected));
    }

    #[test]
    fn device_keys_are_distinct_per_device() {
        let first = DeviceId::generate();
        let second = DeviceId::generate();
        assert_ne!(first.key(THEME_KEY), second.key(THEME_KEY));
        assert!(first.key(THEME_KEY).ends_with("/theme"));
        assert!("not-a-device".parse::<DeviceId>().is_err());
    }

    #[test]
    fn preferences_omit_missing_table_number() {
        let value = serde_json::to_value(Preferences::default()).expect("serialise");
        assert_eq!(value, serde_json::json!({ "theme": "light" }));
    }
}
