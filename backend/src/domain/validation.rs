//! Input checks applied before anything is derived or persisted.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::domain::{
    errors::{EntryError, EntryResult},
    models::milk_entry::EntryType,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const MAX_FAT_PERCENT: i64 = 15;
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Parse a required measurement.
///
/// JSON numbers and strings holding a decimal (as sent by HTML forms) are
/// accepted; anything else is a validation error.
pub fn parse_measurement(field: &str, value: Option<&Value>) -> EntryResult<Decimal> {
    let value = match value {
        None | Some(Value::Null) => {
            return Err(EntryError::validation(format!("{} is required", field)))
        }
        Some(value) => value,
    };

    let parsed = match value {
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(text) => parse_decimal(text.trim()),
        _ => None,
    };

    parsed.ok_or_else(|| EntryError::validation(format!("{} must be numeric", field)))
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Parse a `YYYY-MM-DD` date.
///
/// Years are limited to four digits so stored dates sort the same way as
/// text and as dates.
pub fn parse_date(value: Option<&str>) -> EntryResult<NaiveDate> {
    let text = required_text("date", value)?;
    let date = NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| EntryError::validation(format!("date '{}' is not a YYYY-MM-DD date", text)))?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(EntryError::validation(format!(
            "date '{}' must have a year between {} and {}",
            text, MIN_YEAR, MAX_YEAR
        )));
    }
    Ok(date)
}

pub fn parse_entry_type(value: Option<&str>) -> EntryResult<EntryType> {
    let text = required_text("type", value)?;
    text.parse::<EntryType>()
        .map_err(|_| EntryError::validation(format!("type must be PURCHASE or SALE, got '{}'", text)))
}

pub fn required_text<'a>(field: &str, value: Option<&'a str>) -> EntryResult<&'a str> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(EntryError::validation(format!("{} is required", field))),
    }
}

pub fn ensure_quantity(quantity: Decimal) -> EntryResult<()> {
    if quantity <= Decimal::ZERO {
        return Err(EntryError::validation("quantity must be greater than 0"));
    }
    Ok(())
}

pub fn ensure_fat(fat: Decimal) -> EntryResult<()> {
    if fat < Decimal::ZERO || fat > Decimal::from(MAX_FAT_PERCENT) {
        return Err(EntryError::validation(format!(
            "fat must be between 0 and {} percent",
            MAX_FAT_PERCENT
        )));
    }
    Ok(())
}

pub fn ensure_non_negative(field: &str, value: Decimal) -> EntryResult<()> {
    if value < Decimal::ZERO {
        return Err(EntryError::validation(format!("{} must not be negative", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_measurement_accepts_numbers_and_numeric_strings() {
        assert_eq!(
            parse_measurement("fat", Some(&json!(4.5))).unwrap(),
            Decimal::new(45, 1)
        );
        assert_eq!(
            parse_measurement("fat", Some(&json!(" 3.33 "))).unwrap(),
            Decimal::new(333, 2)
        );
        assert_eq!(
            parse_measurement("quantity", Some(&json!(12))).unwrap(),
            Decimal::from(12)
        );
    }

    #[test]
    fn test_parse_measurement_rejects_missing_values() {
        for value in [None, Some(&Value::Null)] {
            let err = parse_measurement("clr", value).unwrap_err();
            assert!(matches!(err, EntryError::Validation(ref m) if m == "clr is required"));
        }
    }

    #[test]
    fn test_parse_measurement_rejects_non_numeric_values() {
        for value in [json!("abc"), json!(""), json!(true), json!([1]), json!({"v": 1})] {
            let err = parse_measurement("rate", Some(&value)).unwrap_err();
            assert!(matches!(err, EntryError::Validation(ref m) if m == "rate must be numeric"));
        }
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(Some("2024-02-29")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date(Some("2023-02-29")).is_err());
        assert!(parse_date(Some("29/02/2024")).is_err());
        assert!(parse_date(None).is_err());
    }

    #[test]
    fn test_parse_date_rejects_years_outside_four_digits() {
        for text in ["+10000-01-01", "-0001-06-01", "0000-12-31"] {
            let err = parse_date(Some(text)).unwrap_err();
            assert!(matches!(err, EntryError::Validation(ref m) if m.contains("year")), "{}", text);
        }
        assert_eq!(
            parse_date(Some("0001-01-01")).unwrap(),
            NaiveDate::from_ymd_opt(1, 1, 1).unwrap()
        );
        assert_eq!(
            parse_date(Some("9999-12-31")).unwrap(),
            NaiveDate::from_ymd_opt(9999, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_ranges() {
        assert!(ensure_quantity(Decimal::ZERO).is_err());
        assert!(ensure_quantity(Decimal::new(1, 1)).is_ok());
        assert!(ensure_fat(Decimal::from(15)).is_ok());
        assert!(ensure_fat(Decimal::new(151, 1)).is_err());
        assert!(ensure_fat(Decimal::new(-1, 1)).is_err());
        assert!(ensure_non_negative("clr", Decimal::ZERO).is_ok());
        assert!(ensure_non_negative("clr", Decimal::new(-1, 0)).is_err());
    }
}
