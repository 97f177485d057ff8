//! Field-level validation for incoming payloads

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::catalog::model::{PRICE_DECIMAL_PLACES, PRICE_MAX_DIGITS};

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const INVALID_NUMBER: &str = "A valid number is required.";
pub const INVALID_STRING: &str = "Not a valid string.";

/// Field-keyed validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors holding a single message for one field
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Keep the value of a field check, recording its messages on failure
    pub fn check<T>(&mut self, field: &str, result: Result<T, Vec<String>>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(messages) => {
                for message in messages {
                    self.add(field, message);
                }
                None
            }
        }
    }

    /// `Ok(())` when no messages were recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(" "))?;
        }
        Ok(())
    }
}

/// Text input; numbers are coerced to their string form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    Text(String),
    Number(serde_json::Number),
    Other(serde_json::Value),
}

impl From<String> for TextInput {
    fn from(value: String) -> Self {
        TextInput::Text(value)
    }
}

impl From<&str> for TextInput {
    fn from(value: &str) -> Self {
        TextInput::Text(value.to_string())
    }
}

/// Numeric input accepted as a JSON/YAML number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecimalInput {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

/// Primary key input accepted as an integer or an integer string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryKeyInput {
    Id(i64),
    Text(String),
    Other(serde_json::Value),
}

/// Validate a text field: trimmed, non-blank, bounded
pub fn validate_text(input: &TextInput, max_length: usize) -> Result<String, Vec<String>> {
    let value = match input {
        TextInput::Text(text) => text.clone(),
        TextInput::Number(n) => n.to_string(),
        TextInput::Other(_) => return Err(vec![INVALID_STRING.to_string()]),
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(vec![BLANK.to_string()]);
    }
    if trimmed.chars().count() > max_length {
        return Err(vec![format!(
            "Ensure this field has no more than {} characters.",
            max_length
        )]);
    }
    Ok(trimmed.to_string())
}

/// Validate a price: non-negative and within the stored precision
pub fn validate_price(input: &DecimalInput) -> Result<Decimal, Vec<String>> {
    let raw = match input {
        DecimalInput::Number(n) => n.to_string(),
        DecimalInput::Text(s) => s.trim().to_string(),
        DecimalInput::Other(_) => return Err(vec![INVALID_NUMBER.to_string()]),
    };
    let value = match Decimal::from_str(&raw).or_else(|_| Decimal::from_scientific(&raw)) {
        Ok(value) => value,
        // Plain decimals too wide for `Decimal` still get a precision message
        Err(_) => {
            return Err(match literal_digit_counts(&raw) {
                Some((total_digits, decimal_places)) => {
                    precision_messages(total_digits, decimal_places)
                }
                None => vec![INVALID_NUMBER.to_string()],
            })
        }
    };

    let (total_digits, decimal_places) = digit_counts(&value);
    let messages = precision_messages(total_digits, decimal_places);
    if !messages.is_empty() {
        return Err(messages);
    }

    if value.is_sign_negative() && !value.is_zero() {
        return Err(vec![
            "Ensure this value is greater than or equal to 0.".to_string(),
        ]);
    }

    Ok(value)
}

fn precision_messages(total_digits: u32, decimal_places: u32) -> Vec<String> {
    let whole_digits = total_digits.saturating_sub(decimal_places);
    let max_whole_digits = PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES;

    let mut messages = Vec::new();
    if total_digits > PRICE_MAX_DIGITS {
        messages.push(format!(
            "Ensure that there are no more than {} digits in total.",
            PRICE_MAX_DIGITS
        ));
    } else if decimal_places > PRICE_DECIMAL_PLACES {
        messages.push(format!(
            "Ensure that there are no more than {} decimal places.",
            PRICE_DECIMAL_PLACES
        ));
    } else if whole_digits > max_whole_digits {
        messages.push(format!(
            "Ensure that there are no more than {} digits before the decimal point.",
            max_whole_digits
        ));
    }
    messages
}

/// Digit counts of a `[-+]digits[.digits][e[-+]digits]` literal that is too
/// wide to parse, or `None` if the text is not a number at all
fn literal_digit_counts(raw: &str) -> Option<(u32, u32)> {
    let unsigned = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().ok()?),
        None => (unsigned, 0),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let significant = format!("{}{}", whole, fraction)
        .trim_start_matches('0')
        .len()
        .max(1) as i64;
    let exponent = exponent - fraction.len() as i64;

    let (total, scale) = if exponent >= 0 {
        (significant + exponent, 0)
    } else if -exponent > significant {
        (-exponent, -exponent)
    } else {
        (significant, -exponent)
    };
    Some((
        u32::try_from(total).unwrap_or(u32::MAX),
        u32::try_from(scale).unwrap_or(u32::MAX),
    ))
}

/// Total significant digits and fractional digits as written.
///
/// Trailing fractional zeros count, so `9.990` has three decimal places.
fn digit_counts(value: &Decimal) -> (u32, u32) {
    let scale = value.scale();
    let mantissa = value.mantissa().unsigned_abs();
    let digits = if mantissa == 0 {
        1
    } else {
        mantissa.to_string().len() as u32
    };

    if scale > digits {
        (scale, scale)
    } else {
        (digits, scale)
    }
}

/// Parse a primary key; the caller checks that it resolves
pub fn validate_pk(input: &PrimaryKeyInput) -> Result<i64, Vec<String>> {
    let type_name = match input {
        PrimaryKeyInput::Id(id) => return Ok(*id),
        PrimaryKeyInput::Text(text) => match text.trim().parse::<i64>() {
            Ok(id) => return Ok(id),
            Err(_) => "str",
        },
        PrimaryKeyInput::Other(value) => json_type_name(value),
    };
    Err(vec![format!(
        "Incorrect type. Expected pk value, received {}.",
        type_name
    )])
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "NoneType",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(n) if n.is_f64() => "float",
        serde_json::Value::Number(_) => "int",
        serde_json::Value::String(_) => "str",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "dict",
    }
}
