//! Device-identity fingerprint for RSVP duplicate detection.
//!
//! The invitation page derives a best-effort identifier for the visiting
//! browser before submitting an RSVP. It is a heuristic, not a security
//! boundary: collisions are accepted, and the value only feeds the advisory
//! duplicate check. Generation must never fail — every signal is read by an
//! independent probe, and a probe that cannot deliver is replaced by its
//! sentinel value instead of aborting the whole computation.
//!
//! The signal order and the hash are fixed; changing either would make every
//! returning guest look like a new device.

use thiserror::Error;

use crate::shared::constants::PREF_SESSION_START;

/// Separator between signals in the pre-hash fingerprint string
pub const SIGNAL_SEPARATOR: &str = "|";

/// Sentinel for a signal the environment does not expose
pub const UNKNOWN_SIGNAL: &str = "unknown";

/// Sentinel recorded when reading the graphics debug extension throws
pub const WEBGL_ERROR_SIGNAL: &str = "webgl-error";

/// Raised by a probe whose underlying environment API threw.
#[derive(Debug, Error)]
#[error("signal unavailable: {0}")]
pub struct ProbeError(pub String);

impl ProbeError {
    pub fn missing(signal: &str) -> Self {
        Self(format!("{} not exposed", signal))
    }
}

/// One best-effort signal read. `collect` yields the probe's value, or its
/// sentinel when the read fails.
pub struct Probe {
    sentinel: &'static str,
    read: Box<dyn FnOnce() -> Result<String, ProbeError>>,
}

impl Probe {
    pub fn new<F>(read: F) -> Self
    where
        F: FnOnce() -> Result<String, ProbeError> + 'static,
    {
        Self::with_sentinel(UNKNOWN_SIGNAL, read)
    }

    pub fn with_sentinel<F>(sentinel: &'static str, read: F) -> Self
    where
        F: FnOnce() -> Result<String, ProbeError> + 'static,
    {
        Self {
            sentinel,
            read: Box::new(read),
        }
    }

    fn collect(self) -> String {
        (self.read)().unwrap_or_else(|_| self.sentinel.to_string())
    }
}

/// Run every probe, join the outcomes, and reduce to the short identifier.
/// Infallible by construction.
pub fn generate(probes: Vec<Probe>) -> String {
    let fingerprint = probes
        .into_iter()
        .map(Probe::collect)
        .collect::<Vec<_>>()
        .join(SIGNAL_SEPARATOR);
    rolling_hash(&fingerprint)
}

/// The rolling hash behind the device id: per UTF-16 code unit,
/// `hash = (hash << 5) - hash + unit` kept in the low 32 bits, then the
/// absolute value rendered in base 36.
pub fn rolling_hash(input: &str) -> String {
    let mut hash: i32 = 0;
    for unit in input.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    to_base36((i64::from(hash)).unsigned_abs())
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ASCII")
}

/// Outcome of the graphics-context probe. The debug extension is the one
/// signal that can throw mid-read, so it carries its own three-way state.
#[derive(Debug, Clone, Default)]
pub enum GraphicsInfo {
    /// Debug extension answered; missing strings fall back to "unknown"
    Info {
        vendor: Option<String>,
        renderer: Option<String>,
    },
    /// No graphics context or no debug extension: contributes nothing
    #[default]
    Unavailable,
    /// Reading the extension threw: contributes the error sentinel
    Errored,
}

/// Snapshot of the signals a client environment could collect. Every field
/// is optional; absent signals take the probe sentinel so the generator
/// still returns an identifier on the most locked-down browser.
#[derive(Debug, Clone, Default)]
pub struct BrowserSignals {
    pub user_agent: Option<String>,
    pub language: Option<String>,
    /// Screen width and height in CSS pixels
    pub screen: Option<(u32, u32)>,
    /// Timezone offset in minutes, as the environment reports it
    pub timezone_offset_minutes: Option<i32>,
    /// Data URL of the fixed-text canvas rendering
    pub canvas_data_url: Option<String>,
    pub platform: Option<String>,
    pub hardware_concurrency: Option<u32>,
    pub device_memory_gb: Option<u32>,
    pub color_depth: Option<u32>,
    pub device_pixel_ratio: Option<f64>,
    pub available_screen: Option<(u32, u32)>,
    pub plugin_count: Option<u32>,
    pub touch_support: Option<bool>,
    pub graphics: GraphicsInfo,
    /// Per-tab session-start value cached under [`PREF_SESSION_START`]
    pub session_start: Option<String>,
}

impl BrowserSignals {
    /// The standard probe sequence. Order is part of the identity: the
    /// primary signals first, then the combined secondary fingerprint,
    /// then the session-start value.
    pub fn into_probes(self) -> Vec<Probe> {
        fn value_or_missing(signal: &'static str, value: Option<String>) -> Probe {
            Probe::new(move || value.ok_or_else(|| ProbeError::missing(signal)))
        }

        let additional = self.additional_fingerprint();
        vec![
            value_or_missing("userAgent", self.user_agent),
            value_or_missing("language", self.language),
            value_or_missing("screen", self.screen.map(|(w, h)| format!("{}x{}", w, h))),
            value_or_missing(
                "timezoneOffset",
                self.timezone_offset_minutes.map(|m| m.to_string()),
            ),
            value_or_missing("canvas", self.canvas_data_url),
            Probe::new(move || Ok(additional)),
            value_or_missing(PREF_SESSION_START, self.session_start),
        ]
    }

    /// Secondary fingerprint: platform, CPU count, memory, color depth,
    /// pixel ratio, available screen, plugin count, touch flag and the
    /// graphics vendor/renderer pair, joined with the signal separator.
    fn additional_fingerprint(&self) -> String {
        fn or_unknown(value: Option<String>) -> String {
            value.unwrap_or_else(|| UNKNOWN_SIGNAL.to_string())
        }

        let mut parts = vec![
            or_unknown(self.platform.clone()),
            or_unknown(self.hardware_concurrency.map(|v| v.to_string())),
            or_unknown(self.device_memory_gb.map(|v| v.to_string())),
            or_unknown(self.color_depth.map(|v| v.to_string())),
            or_unknown(self.device_pixel_ratio.map(|v| v.to_string())),
            or_unknown(self.available_screen.map(|(w, h)| format!("{}x{}", w, h))),
            or_unknown(self.plugin_count.map(|v| v.to_string())),
            or_unknown(
                self.touch_support
                    .map(|t| if t { "touch" } else { "no-touch" }.to_string()),
            ),
        ];

        match &self.graphics {
            GraphicsInfo::Info { vendor, renderer } => {
                parts.push(or_unknown(vendor.clone()));
                parts.push(or_unknown(renderer.clone()));
            }
            GraphicsInfo::Unavailable => {}
            GraphicsInfo::Errored => parts.push(WEBGL_ERROR_SIGNAL.to_string()),
        }

        parts.join(SIGNAL_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_signals() -> BrowserSignals {
        BrowserSignals {
            user_agent: Some("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)".to_string()),
            language: Some("ko-KR".to_string()),
            screen: Some((390, 844)),
            timezone_offset_minutes: Some(-540),
            canvas_data_url: Some("data:image/png;base64,AAAA".to_string()),
            platform: Some("iPhone".to_string()),
            hardware_concurrency: Some(6),
            device_memory_gb: Some(4),
            color_depth: Some(24),
            device_pixel_ratio: Some(3.0),
            available_screen: Some((390, 844)),
            plugin_count: Some(0),
            touch_support: Some(true),
            graphics: GraphicsInfo::Info {
                vendor: Some("Apple Inc.".to_string()),
                renderer: Some("Apple GPU".to_string()),
            },
            session_start: Some("1714000000000".to_string()),
        }
    }

    #[test]
    fn test_rolling_hash_known_values() {
        assert_eq!(rolling_hash(""), "0");
        // h("a") = 97 -> base36 "2p"
        assert_eq!(rolling_hash("a"), "2p");
        // h("ab") = 97*31 + 98 = 3105 -> base36 "2e9"
        assert_eq!(rolling_hash("ab"), "2e9");
    }

    #[test]
    fn test_rolling_hash_stays_in_32_bits() {
        let long = "x".repeat(10_000);
        let hashed = rolling_hash(&long);
        // abs of an i32 is at most 2^31, which is 6 base36 digits
        assert!(hashed.len() <= 6);
        assert!(hashed.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate(sample_signals().into_probes());
        let b = generate(sample_signals().into_probes());
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_generate_distinguishes_devices() {
        let mut other = sample_signals();
        other.user_agent = Some("Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string());
        assert_ne!(
            generate(sample_signals().into_probes()),
            generate(other.into_probes())
        );
    }

    #[test]
    fn test_failing_probe_is_replaced_by_sentinel() {
        let failing = vec![
            Probe::new(|| Ok("stable".to_string())),
            Probe::with_sentinel(WEBGL_ERROR_SIGNAL, || {
                Err(ProbeError("debug extension threw".to_string()))
            }),
        ];
        let substituted = vec![
            Probe::new(|| Ok("stable".to_string())),
            Probe::new(|| Ok(WEBGL_ERROR_SIGNAL.to_string())),
        ];
        assert_eq!(generate(failing), generate(substituted));
    }

    #[test]
    fn test_generate_never_fails() {
        // Most hostile environment: every probe throws
        let probes = vec![
            Probe::new(|| Err(ProbeError::missing("userAgent"))),
            Probe::new(|| Err(ProbeError::missing("language"))),
            Probe::with_sentinel(WEBGL_ERROR_SIGNAL, || Err(ProbeError::missing("webgl"))),
        ];
        let id = generate(probes);
        assert!(!id.is_empty());

        // And the empty default snapshot still produces an identifier
        let id = generate(BrowserSignals::default().into_probes());
        assert!(!id.is_empty());
    }

    #[test]
    fn test_probe_order_matches_fingerprint_layout() {
        let signals = sample_signals();
        let expected = [
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)",
            "ko-KR",
            "390x844",
            "-540",
            "data:image/png;base64,AAAA",
            "iPhone|6|4|24|3|390x844|0|touch|Apple Inc.|Apple GPU",
            "1714000000000",
        ]
        .join(SIGNAL_SEPARATOR);
        assert_eq!(generate(signals.into_probes()), rolling_hash(&expected));
    }

    #[test]
    fn test_graphics_error_contributes_single_sentinel() {
        let mut signals = sample_signals();
        signals.graphics = GraphicsInfo::Errored;
        let expected = [
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)",
            "ko-KR",
            "390x844",
            "-540",
            "data:image/png;base64,AAAA",
            "iPhone|6|4|24|3|390x844|0|touch|webgl-error",
            "1714000000000",
        ]
        .join(SIGNAL_SEPARATOR);
        assert_eq!(generate(signals.into_probes()), rolling_hash(&expected));
    }
}
