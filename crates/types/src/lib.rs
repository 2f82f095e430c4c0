//! Validated text types shared across the Swasthya crates.
//!
//! Each type wraps a `String` and guarantees its invariant at construction
//! time, so downstream code never re-checks shape. All types serialise as
//! plain strings and re-validate on deserialisation, which keeps persisted
//! snapshots honest.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The input was not a 10-digit national identity number
    #[error("National ID must be exactly 10 digits")]
    InvalidNationalId,
    /// The input was not a plausible email address
    #[error("Invalid email address")]
    InvalidEmail,
    /// The input was not a Nepali mobile number (98/97 prefix, 10 digits)
    #[error("Invalid mobile number")]
    InvalidPhoneNumber,
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace
/// character. The input is automatically trimmed of leading and trailing
/// whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(NonEmptyText)` if the trimmed input is non-empty,
    /// or `Err(TextError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A national identity number: exactly ten ASCII digits.
///
/// Matches the simplified national ID format the emergency lookup keys on.
/// Surrounding whitespace is trimmed before validation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NationalId(String);

impl NationalId {
    /// Parses a national ID from the given input.
    ///
    /// # Errors
    ///
    /// Returns `TextError::InvalidNationalId` unless the trimmed input is
    /// exactly ten ASCII digits.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.len() != 10 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TextError::InvalidNationalId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An email address with minimal structural validation.
///
/// Accepts `local@domain` where both parts are non-empty, the domain contains
/// a dot, and nothing contains whitespace. This is deliberately permissive —
/// the store is a demo dataset, not a mail system.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses an email address from the given input.
    ///
    /// # Errors
    ///
    /// Returns `TextError::InvalidEmail` if the input does not have the shape
    /// `local@domain.tld`.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(TextError::InvalidEmail);
        };
        if local.is_empty()
            || domain.is_empty()
            || !domain.contains('.')
            || trimmed.chars().any(char::is_whitespace)
        {
            return Err(TextError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A Nepali mobile number: ten digits starting `98` or `97`.
///
/// Separator characters (spaces, dashes) are stripped before validation, so
/// `"98-4123-4567"` and `"9841234567"` are the same number. The canonical form
/// kept internally is digits only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parses a mobile number from the given input.
    ///
    /// # Errors
    ///
    /// Returns `TextError::InvalidPhoneNumber` unless the digits form a
    /// ten-digit number with a `98` or `97` prefix.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let digits: String = input
            .as_ref()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        if digits.len() != 10 || !(digits.starts_with("98") || digits.starts_with("97")) {
            return Err(TextError::InvalidPhoneNumber);
        }
        Ok(Self(digits))
    }

    /// Returns the canonical digits-only form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_type_impls {
    ($ty:ident, $ctor:expr) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $ctor(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

string_type_impls!(NonEmptyText, NonEmptyText::new);
string_type_impls!(NationalId, NationalId::parse);
string_type_impls!(EmailAddress, EmailAddress::parse);
string_type_impls!(PhoneNumber, PhoneNumber::parse);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_and_accepts() {
        let t = NonEmptyText::new("  Kathmandu  ").unwrap();
        assert_eq!(t.as_str(), "Kathmandu");
    }

    #[test]
    fn non_empty_text_rejects_whitespace_only() {
        let err = NonEmptyText::new("   ").expect_err("whitespace should be rejected");
        assert!(matches!(err, TextError::Empty));
    }

    #[test]
    fn national_id_accepts_ten_digits() {
        let nid = NationalId::parse("1234567890").unwrap();
        assert_eq!(nid.as_str(), "1234567890");
    }

    #[test]
    fn national_id_rejects_short_or_alpha() {
        assert!(NationalId::parse("123456789").is_err());
        assert!(NationalId::parse("12345678ab").is_err());
        assert!(NationalId::parse("12345678901").is_err());
    }

    #[test]
    fn email_accepts_plausible_addresses() {
        assert!(EmailAddress::parse("alice@example.com").is_ok());
        assert!(EmailAddress::parse("a.b@clinic.org.np").is_ok());
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        assert!(EmailAddress::parse("no-at-sign").is_err());
        assert!(EmailAddress::parse("@example.com").is_err());
        assert!(EmailAddress::parse("alice@nodot").is_err());
        assert!(EmailAddress::parse("al ice@example.com").is_err());
    }

    #[test]
    fn phone_number_strips_separators() {
        let n = PhoneNumber::parse("98-4123-4567").unwrap();
        assert_eq!(n.as_str(), "9841234567");
    }

    #[test]
    fn phone_number_rejects_wrong_prefix_or_length() {
        assert!(PhoneNumber::parse("9612345678").is_err());
        assert!(PhoneNumber::parse("984123456").is_err());
    }

    #[test]
    fn national_id_round_trips_through_serde() {
        let nid = NationalId::parse("9876543210").unwrap();
        let json = serde_json::to_string(&nid).unwrap();
        assert_eq!(json, "\"9876543210\"");
        let back: NationalId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, nid);
    }

    #[test]
    fn national_id_deserialisation_revalidates() {
        let err = serde_json::from_str::<NationalId>("\"not-ten-digits\"");
        assert!(err.is_err());
    }
}
