pub const KB: u64 = 1024;
pub const MB: u64 = 1024 * KB;
pub const GB: u64 = 1024 * MB;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ByteSizeError {
    #[error("empty byte size")]
    Empty,
    #[error("invalid number in byte size")]
    InvalidNumber,
    #[error("unknown byte size suffix `{0}` (expected B, KB, MB, GB)")]
    UnknownSuffix(String),
    #[error("byte size overflows u64")]
    Overflow,
}

/// Parses `"4096"`, `"512MB"`, `"1.5GB"`, `"64 kb"` and similar strings.
///
/// Suffixes are binary (`1KB == 1024`) and case-insensitive; `KiB`-style
/// spellings are accepted as well.
pub fn parse_byte_size(input: &str) -> Result<u64, ByteSizeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ByteSizeError::Empty);
    }

    let split = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(trimmed.len());
    let (number, suffix) = trimmed.split_at(split);
    if number.is_empty() {
        return Err(ByteSizeError::InvalidNumber);
    }

    let multiplier = match suffix.trim().to_ascii_lowercase().as_str() {
        "" | "b" => 1,
        "k" | "kb" | "kib" => KB,
        "m" | "mb" | "mib" => MB,
        "g" | "gb" | "gib" => GB,
        other => return Err(ByteSizeError::UnknownSuffix(other.to_string())),
    };

    if let Ok(whole) = number.parse::<u64>() {
        return whole.checked_mul(multiplier).ok_or(ByteSizeError::Overflow);
    }

    let value: f64 = number.parse().map_err(|_| ByteSizeError::InvalidNumber)?;
    let bytes = value * multiplier as f64;
    if !bytes.is_finite() || bytes < 0.0 || bytes > u64::MAX as f64 {
        return Err(ByteSizeError::Overflow);
    }
    Ok(bytes.round() as u64)
}
