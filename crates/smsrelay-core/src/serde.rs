// Module name shadows the `serde` crate; use `::serde` for the external crate.
use std::fmt;

use ::serde::Deserializer;
use ::serde::de::{self, Visitor};
use chrono::DateTime;

/// Deserialize epoch milliseconds given either as a JSON integer or as a quoted
/// decimal string (`1700000000000` or `"1700000000000"`).
pub fn millis_lenient<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct MillisVisitor;

    impl Visitor<'_> for MillisVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("epoch milliseconds as an integer or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::custom("timestamp out of range"))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            v.trim()
                .parse()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }

    d.deserialize_any(MillisVisitor)
}

/// Render epoch milliseconds as `YYYY-MM-DD HH:MM:SS` (UTC) for log lines.
/// Out-of-range values are rendered as the raw number.
pub fn format_millis(ms: i64) -> String {
    match DateTime::from_timestamp_millis(ms) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => ms.to_string(),
    }
}
