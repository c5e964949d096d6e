use serde::Serialize;

const BYTE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Round to two decimals; `Display` then drops trailing zeros
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a byte count with a binary (1024) unit, e.g. `1.5 KB`
pub fn format_byte_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < BYTE_UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }

    format!("{} {}", round2(bytes as f64 / scale as f64), BYTE_UNITS[unit])
}

/// Format milliseconds as `120 ms`, or as seconds from one second up
pub fn format_duration(ms: f64) -> String {
    let ms = if ms.is_finite() { ms.max(0.0) } else { 0.0 };
    if ms < 1000.0 {
        format!("{} ms", round2(ms))
    } else {
        format!("{} s", round2(ms / 1000.0))
    }
}

/// Display bucket for a status code; picking colors is up to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    Success,
    Redirect,
    ClientError,
    ServerError,
}

/// Bucket a status by range: below 300, below 400, below 500, the rest
pub fn status_color_class(status: u16) -> StatusBucket {
    match status {
        0..300 => StatusBucket::Success,
        300..400 => StatusBucket::Redirect,
        400..500 => StatusBucket::ClientError,
        _ => StatusBucket::ServerError,
    }
}
