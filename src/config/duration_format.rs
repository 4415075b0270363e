//! Duration parsing for configuration files and flags.
//!
//! Durations are humantime strings: `5s`, `250ms`, `1m 30s`.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Parse a duration string.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s.trim())
        .map_err(|e| format!("invalid duration '{}': {} (expected e.g. 5s, 250ms, 1m 30s)", s, e))
}

/// Deserialize a duration from a string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    parse_duration(&s).map_err(serde::de::Error::custom)
}

/// Serialize a duration to a humantime string.
pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    humantime::format_duration(*duration)
        .to_string()
        .serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_humantime() {
        assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration(" 1m 30s ").unwrap(), Duration::from_secs(90));
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_duration("soon").unwrap_err();
        assert!(err.contains("invalid duration 'soon'"));
        assert!(parse_duration("5").is_err());
    }
}
