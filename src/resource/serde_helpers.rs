//! Lenient number fields
//!
//! The backend is not consistent about numbers: decimals such as prices may
//! arrive as `3.5` or `"3.50"`, status flags as `1` or `"1"`. These helpers
//! accept either form and treat null or an empty string as absent.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<N> {
    Number(N),
    Text(String),
}

fn lenient<'de, D, N>(deserializer: D) -> Result<Option<N>, D::Error>
where
    D: Deserializer<'de>,
    N: Deserialize<'de> + FromStr,
    N::Err: Display,
{
    match Option::<NumberOrText<N>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse()
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid number {:?}: {}", text, e)))
        }
    }
}

/// Optional decimal from a number or numeric string
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient(deserializer)
}

/// Optional integer from a number or numeric string
pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient(deserializer)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "super::opt_f64")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "super::opt_i64")]
        status: Option<i64>,
    }

    fn row(value: serde_json::Value) -> Row {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let parsed = row(json!({"price": "3.50", "status": "1"}));
        assert_eq!(parsed.price, Some(3.5));
        assert_eq!(parsed.status, Some(1));

        let parsed = row(json!({"price": 999, "status": 0}));
        assert_eq!(parsed.price, Some(999.0));
        assert_eq!(parsed.status, Some(0));
    }

    #[test]
    fn null_missing_and_blank_are_absent() {
        let parsed = row(json!({"price": null, "status": " "}));
        assert_eq!(parsed.price, None);
        assert_eq!(parsed.status, None);
        assert!(row(json!({})).price.is_none());
    }

    #[test]
    fn rejects_non_numeric_text() {
        assert!(serde_json::from_value::<Row>(json!({"price": "cheap"})).is_err());
    }
}
