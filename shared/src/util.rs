use std::str::FromStr;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current UTC time as RFC 3339 with millisecond precision
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Generate a 24-character lowercase hex document id.
///
/// Layout (12 bytes):
///   - 4 bytes: seconds since the Unix epoch, big-endian
///   - 8 bytes: random
///
/// Ids sort roughly by creation time and look like the ids clients of
/// the platform already handle.
pub fn document_id() -> String {
    let secs = (now_millis() / 1000) as u32;
    let mut bytes = [0u8; 12];
    bytes[..4].copy_from_slice(&secs.to_be_bytes());
    bytes[4..].copy_from_slice(&rand::random::<[u8; 8]>());
    hex::encode(bytes)
}

/// Read an environment variable, falling back to `default` when it is
/// unset or fails to parse.
pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read a non-empty string environment variable
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Split a comma-separated list, dropping blanks
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
