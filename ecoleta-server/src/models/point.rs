//! Point registration input validation
//!
//! Every field of the registration form is checked here before the data
//! layer sees it: required fields, email format, two-letter state code,
//! numeric whatsapp/coordinates.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length for free-text fields (name, email, city)
const MAX_TEXT_LEN: usize = 255;

/// Maximum length for the state code
const MAX_UF_LEN: usize = 2;

/// Loose email shape: one `@`, no whitespace, a dot in the domain.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex"));

/// Validated email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    /// # Example
    /// ```
    /// use ecoleta_server::models::Email;
    ///
    /// assert!(Email::new("contact@example.com").is_ok());
    /// assert!(Email::new("not-an-email").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }
        if s.len() > MAX_TEXT_LEN {
            return Err(ValidationError::TooLong {
                field: "email",
                max: MAX_TEXT_LEN,
            });
        }
        if !EMAIL_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must be a valid email address",
            });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated state code (UF), at most two letters, stored uppercase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uf(String);

impl Uf {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "uf" });
        }
        if s.len() > MAX_UF_LEN {
            return Err(ValidationError::TooLong {
                field: "uf",
                max: MAX_UF_LEN,
            });
        }
        if !s.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidFormat {
                field: "uf",
                reason: "must contain only letters",
            });
        }
        Ok(Self(s.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated text fields of the registration form.
///
/// The uploaded image is a storage concern and travels separately; by the
/// time the data layer runs, every field here has already been checked.
#[derive(Debug, Clone)]
pub struct NewPoint {
    pub name: String,
    pub email: Email,
    pub whatsapp: String,
    pub city: String,
    pub uf: Uf,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewPoint {
    /// Validate all registration fields.
    ///
    /// # Rules
    /// - All fields required and non-empty
    /// - `email` must look like an email address
    /// - `uf` at most 2 letters
    /// - `whatsapp` must parse as an integer (kept as text for leading zeros)
    /// - `latitude`/`longitude` must parse as finite numbers in range
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        email: &str,
        whatsapp: &str,
        city: &str,
        uf: &str,
        latitude: &str,
        longitude: &str,
    ) -> Result<Self, ValidationError> {
        let name = required_text("name", name)?;
        let email = Email::new(email)?;
        let whatsapp = numeric_text("whatsapp", whatsapp)?;
        let city = required_text("city", city)?;
        let uf = Uf::new(uf)?;
        let latitude = coordinate("latitude", latitude, 90.0)?;
        let longitude = coordinate("longitude", longitude, 180.0)?;

        Ok(Self {
            name,
            email,
            whatsapp,
            city,
            uf,
            latitude,
            longitude,
        })
    }
}

fn required_text(field: &'static str, s: &str) -> Result<String, ValidationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if s.len() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_TEXT_LEN,
        });
    }
    Ok(s.to_owned())
}

fn numeric_text(field: &'static str, s: &str) -> Result<String, ValidationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if s.parse::<i64>().is_err() {
        return Err(ValidationError::NotANumber {
            field,
            value: s.to_owned(),
        });
    }
    Ok(s.to_owned())
}

fn coordinate(field: &'static str, s: &str, bound: f64) -> Result<f64, ValidationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    let value: f64 = s.parse().map_err(|_| ValidationError::NotANumber {
        field,
        value: s.to_owned(),
    })?;
    if !value.is_finite() || value < -bound || value > bound {
        return Err(ValidationError::OutOfRange {
            field,
            min: -bound,
            max: bound,
        });
    }
    Ok(value)
}
