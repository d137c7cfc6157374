//! Serde helpers for partial-update payloads

use serde::{Deserialize, Deserializer};

/// Deserialize a field that distinguishes "absent" from "null".
///
/// Use with `#[serde(default, deserialize_with = "double_option")]` on an
/// `Option<Option<T>>`:
/// - key missing  -> `None` (leave column untouched)
/// - `null`       -> `Some(None)` (clear column)
/// - value        -> `Some(Some(v))`
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Deserialize bool that treats null as true
pub fn bool_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(true))
}

pub(crate) fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        price: Option<Option<i64>>,
        #[serde(default = "default_true", deserialize_with = "bool_true")]
        active: bool,
    }

    #[test]
    fn test_double_option_states() {
        let p: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(p.price, None);
        assert!(p.active);

        let p: Patch = serde_json::from_str(r#"{"price": null, "active": null}"#).unwrap();
        assert_eq!(p.price, Some(None));
        assert!(p.active);

        let p: Patch = serde_json::from_str(r#"{"price": 120, "active": false}"#).unwrap();
        assert_eq!(p.price, Some(Some(120)));
        assert!(!p.active);
    }
}
