//! Lenient numeric deserialization for duration fields.
//!
//! Duration fields that cross a serialization boundary (the kv store, the
//! TOML config file) may carry values a typed field cannot hold: negative
//! numbers, non-finite floats, or non-numeric junk from a hand-edited file.
//! Those collapse to 0 instead of failing the whole deserialization, and
//! each coercion is logged so an upstream bug surfaces in logs rather than
//! silently vanishing.

use serde::{Deserialize, Deserializer};

/// Deserialize a duration in seconds, coercing anything invalid to 0.
pub fn secs<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Unsigned(v) => v,
        Raw::Signed(v) if v >= 0 => v as u64,
        Raw::Signed(v) => {
            log::warn!("negative duration {v} coerced to 0");
            0
        }
        Raw::Float(v) if v.is_finite() && v >= 0.0 => v.floor() as u64,
        Raw::Float(v) => {
            log::warn!("invalid duration {v} coerced to 0");
            0
        }
        Raw::Other(_) => {
            log::warn!("non-numeric duration coerced to 0");
            0
        }
    })
}

/// Clamp a raw floating-point second count to a valid whole-second value.
///
/// Non-finite and negative inputs map to 0.
pub fn sanitize_secs(raw: f64) -> u64 {
    if raw.is_finite() && raw >= 0.0 {
        raw.floor() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "secs")]
        value: u64,
    }

    #[test]
    fn passes_valid_values_through() {
        let h: Holder = serde_json::from_str(r#"{"value": 1500}"#).unwrap();
        assert_eq!(h.value, 1500);
    }

    #[test]
    fn floors_floats() {
        let h: Holder = serde_json::from_str(r#"{"value": 90.9}"#).unwrap();
        assert_eq!(h.value, 90);
    }

    #[test]
    fn coerces_negative_to_zero() {
        let h: Holder = serde_json::from_str(r#"{"value": -25}"#).unwrap();
        assert_eq!(h.value, 0);
    }

    #[test]
    fn coerces_non_numeric_to_zero() {
        let h: Holder = serde_json::from_str(r#"{"value": "soon"}"#).unwrap();
        assert_eq!(h.value, 0);

        let h: Holder = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(h.value, 0);
    }

    #[test]
    fn coerces_toml_nan_to_zero() {
        #[derive(Deserialize)]
        struct Wrap {
            holder: Holder,
        }
        let w: Wrap = toml::from_str("[holder]\nvalue = nan\n").unwrap();
        assert_eq!(w.holder.value, 0);
    }

    #[test]
    fn sanitize_handles_edge_cases() {
        assert_eq!(sanitize_secs(1435.0), 1435);
        assert_eq!(sanitize_secs(1435.7), 1435);
        assert_eq!(sanitize_secs(-1.0), 0);
        assert_eq!(sanitize_secs(f64::NAN), 0);
        assert_eq!(sanitize_secs(f64::INFINITY), 0);
    }
}
