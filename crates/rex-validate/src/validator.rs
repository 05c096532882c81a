//! Stateless single-value validation.
//!
//! `validate_field` runs every applicable rule in a fixed order and collects
//! all failures rather than stopping at the first. A `required` failure does
//! not suppress the later checks, but format checks only run for non-empty
//! values so optional empty fields pass untouched.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Declarative constraints for a single field value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RuleSet {
    pub required: bool,
    pub email: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub number: bool,
    pub integer: bool,
    pub positive: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RuleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    #[must_use]
    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    #[must_use]
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    #[must_use]
    pub fn number(mut self) -> Self {
        self.number = true;
        self
    }

    #[must_use]
    pub fn integer(mut self) -> Self {
        self.integer = true;
        self
    }

    #[must_use]
    pub fn positive(mut self) -> Self {
        self.positive = true;
        self
    }

    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

/// Validate one value against a rule set.
///
/// Returns one message per failed rule, in rule order; empty means valid.
#[must_use]
pub fn validate_field(value: &str, rules: &RuleSet) -> Vec<String> {
    let mut errors = Vec::new();
    let present = !value.is_empty();

    if rules.required && !is_required(value) {
        errors.push("This field is required".to_string());
    }
    if present && rules.email && !is_email(value) {
        errors.push("Please enter a valid email address".to_string());
    }
    if present && let Some(min) = rules.min_length
        && !is_valid_length(value, Some(min), None)
    {
        errors.push(format!("Minimum length is {min} characters"));
    }
    if present && let Some(max) = rules.max_length
        && !is_valid_length(value, None, Some(max))
    {
        errors.push(format!("Maximum length is {max} characters"));
    }
    if present && rules.number && !is_number(value) {
        errors.push("Please enter a valid number".to_string());
    }
    if present && rules.integer && !is_integer(value) {
        errors.push("Please enter a valid integer".to_string());
    }
    if present && rules.positive && !is_positive_number(value) {
        errors.push("Please enter a positive number".to_string());
    }
    if present && let Some(min) = rules.min
        && !is_in_range(value, Some(min), None)
    {
        errors.push(format!("Value must be at least {min}"));
    }
    if present && let Some(max) = rules.max
        && !is_in_range(value, None, Some(max))
    {
        errors.push(format!("Value must be at most {max}"));
    }

    errors
}

/// Non-empty after trimming whitespace.
#[must_use]
pub fn is_required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Matches `local@domain.tld` with no whitespace and exactly one `@`.
#[must_use]
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let valid_part = |s: &str| !s.is_empty() && !s.contains(char::is_whitespace) && !s.contains('@');
    if !valid_part(local) || !valid_part(domain) {
        return false;
    }
    // The domain needs a dot with at least one character on each side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Length within the given optional bounds. An empty value passes unless a
/// non-zero minimum is set.
#[must_use]
pub fn is_valid_length(value: &str, min: Option<usize>, max: Option<usize>) -> bool {
    if value.is_empty() {
        return min.is_none_or(|m| m == 0);
    }
    let length = value.chars().count();
    min.is_none_or(|m| length >= m) && max.is_none_or(|m| length <= m)
}

/// Parses as a finite decimal number.
#[must_use]
pub fn is_number(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok_and(f64::is_finite)
}

/// Parses as a number with zero fractional part.
#[must_use]
pub fn is_integer(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .is_ok_and(|n| n.is_finite() && n.fract() == 0.0)
}

/// Parses as a number strictly greater than zero.
#[must_use]
pub fn is_positive_number(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok_and(|n| n.is_finite() && n > 0.0)
}

/// Parses as a number within the given optional bounds.
#[must_use]
pub fn is_in_range(value: &str, min: Option<f64>, max: Option<f64>) -> bool {
    let Ok(n) = value.trim().parse::<f64>() else {
        return false;
    };
    n.is_finite() && min.is_none_or(|m| n >= m) && max.is_none_or(|m| n <= m)
}

/// One of the accepted boolean spellings, case-insensitively.
#[must_use]
pub fn is_boolean(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "false" | "1" | "0" | "yes" | "no"
    )
}

/// Parses as a calendar date or datetime in the common interchange forms.
#[must_use]
pub fn is_date(value: &str) -> bool {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || NaiveDate::parse_from_str(value, "%m/%d/%Y").is_ok()
}

/// Parses as an absolute URL.
#[must_use]
pub fn is_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

/// Four dot-separated octets, each 0-255.
#[must_use]
pub fn is_ip_address(value: &str) -> bool {
    let octets: Vec<&str> = value.split('.').collect();
    octets.len() == 4
        && octets.iter().all(|octet| {
            !octet.is_empty()
                && octet.len() <= 3
                && octet.bytes().all(|b| b.is_ascii_digit())
                && octet.parse::<u16>().is_ok_and(|n| n <= 255)
        })
}
