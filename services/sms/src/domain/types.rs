use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SmsServiceError;

/// Shortest digit run accepted as a verification code.
pub const MIN_CODE_LEN: usize = 4;

/// Longest digit run accepted as a verification code.
pub const MAX_CODE_LEN: usize = 8;

/// Default time-to-live of both cache entries, in seconds.
pub const DEFAULT_SMS_TTL_SECS: u64 = 120;

/// A verification code: 4 to 8 ASCII digits. Construction is the only place the
/// format is checked, so every value of this type is valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VerificationCode(String);

#[derive(Debug, thiserror::Error)]
#[error("verification code must be 4-8 ascii digits, got {0:?}")]
pub struct InvalidCode(pub String);

impl VerificationCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(s: &str) -> bool {
        (MIN_CODE_LEN..=MAX_CODE_LEN).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    }
}

impl TryFrom<String> for VerificationCode {
    type Error = InvalidCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidCode(value))
        }
    }
}

impl TryFrom<&str> for VerificationCode {
    type Error = InvalidCode;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.to_owned())
    }
}

impl From<VerificationCode> for String {
    fn from(code: VerificationCode) -> Self {
        code.0
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The cached unit. Serialized as `{"from", "content", "received_at"}`; `content`
/// holds the extracted code, never the original message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsRecord {
    #[serde(rename = "from")]
    pub sender: String,
    #[serde(rename = "content")]
    pub code: VerificationCode,
    /// Milliseconds since epoch, as supplied by the caller.
    #[serde(deserialize_with = "smsrelay_core::serde::millis_lenient")]
    pub received_at: i64,
}

impl SmsRecord {
    pub fn to_payload(&self) -> Result<Vec<u8>, SmsServiceError> {
        serde_json::to_vec(self).map_err(SmsServiceError::SerializationFailed)
    }

    pub fn from_payload(payload: &[u8]) -> Result<Self, SmsServiceError> {
        serde_json::from_slice(payload).map_err(|e| SmsServiceError::CorruptRecord(e.into()))
    }
}

/// Outcome of the best-effort latest-key write.
#[derive(Debug)]
pub enum LatestPointer {
    Updated,
    /// The historic write succeeded but the latest key still holds the previous
    /// record (or nothing) until the next successful write for this sender.
    Failed(SmsServiceError),
}

impl LatestPointer {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated)
    }
}

/// Result of a successful `record` call.
#[derive(Debug)]
pub struct RecordOutcome {
    pub historic_key: String,
    pub record: SmsRecord,
    pub latest: LatestPointer,
}
