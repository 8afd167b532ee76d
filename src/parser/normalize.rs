//! Timestamp prefix handling.

static_regex!(timestamp_re, r"^\[(\d+\.\d+)\]");

/// A log line split into its optional `[seconds]` prefix and the text after it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogLine<'a> {
    pub timestamp: Option<f64>,
    /// Text after the prefix. Indentation is preserved because several
    /// sections are recognized by their leading whitespace.
    pub text: &'a str,
}

impl<'a> LogLine<'a> {
    /// Split `raw` into timestamp and text.
    ///
    /// A single space separating the prefix from the text is dropped. Lines
    /// without a well-formed prefix are returned unchanged with no timestamp.
    pub fn parse(raw: &'a str) -> Self {
        let raw = raw.trim_end_matches(['\r', '\n']);
        let Some(caps) = timestamp_re().captures(raw) else {
            return Self {
                timestamp: None,
                text: raw,
            };
        };
        let Ok(timestamp) = caps[1].parse::<f64>() else {
            return Self {
                timestamp: None,
                text: raw,
            };
        };
        let rest = &raw[caps[0].len()..];
        Self {
            timestamp: Some(timestamp),
            text: rest.strip_prefix(' ').unwrap_or(rest),
        }
    }

    /// Text without leading or trailing whitespace.
    pub fn trimmed(&self) -> &'a str {
        self.text.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
