//! Port statistics page parsing
//!
//! The switch does not serve JSON. `PortStatisticsRpm.htm` embeds a script block:
//!
//! ```text
//! <script>
//! var max_port_num = 8;
//! var all_info = {
//! state:[1,1,0],
//! link_status:[6,6,0],
//! pkts:[100,0,50,2,0,0,0,0,0,0,0,0]
//! };
//! </script>
//! ```
//!
//! Parsing runs in two stages that can be tested separately:
//! 1. [`extract_object_literal`] finds the `name = {...};` literal in the page
//! 2. [`normalize_object_literal`] quotes the known keys so the literal is strict JSON
//!
//! [`parse_port_statistics`] chains both stages, decodes [`AllInfo`] and reshapes it.

use crate::error::{ExporterError, Result};
use crate::tplink::types::{reshape_ports, AllInfo, PortRecord};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Unquoted keys the switch emits in the `all_info` literal
pub const LITERAL_KEYS: [&str; 3] = ["link_status", "state", "pkts"];

static OBJECT_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z_$][\w$]*\s*=\s*(\{[^;]*\})\s*;").expect("object literal pattern is valid")
});

static KEY_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    LITERAL_KEYS
        .iter()
        .map(|key| {
            let pattern = format!(r"([{{,]\s*){}(\s*:)", regex::escape(key));
            (*key, Regex::new(&pattern).expect("key pattern is valid"))
        })
        .collect()
});

/// Return the brace-delimited literal assigned in the page, braces included
pub fn extract_object_literal(body: &str) -> Result<&str> {
    OBJECT_LITERAL
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| ExporterError::parse("no object literal found in port statistics page", body))
}

/// Quote the keys in [`LITERAL_KEYS`] where they appear in key position
///
/// Other keys are left as they are.
pub fn normalize_object_literal(literal: &str) -> String {
    KEY_PATTERNS
        .iter()
        .fold(literal.to_string(), |acc, (key, pattern)| {
            pattern
                .replace_all(&acc, |caps: &Captures| {
                    format!("{}\"{}\"{}", &caps[1], key, &caps[2])
                })
                .into_owned()
        })
}

/// Decode a normalized literal
pub fn decode_all_info(normalized: &str) -> serde_json::Result<AllInfo> {
    serde_json::from_str(normalized)
}

/// Parse a full statistics page into port records, index 0 being port 1
pub fn parse_port_statistics(body: &str) -> Result<Vec<PortRecord>> {
    let literal = extract_object_literal(body)?;
    let normalized = normalize_object_literal(literal);

    let info = decode_all_info(&normalized).map_err(|e| {
        ExporterError::parse(format!("invalid port statistics literal: {}", e), body)
    })?;

    reshape_ports(&info).map_err(|e| ExporterError::parse(e.to_string(), body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tplink::types::PacketCounters;

    const DEVICE_PAGE: &str = "<script>
var max_port_num = 8;
var port_middle_num  = 16;
var all_info = {
state:[1,1,1,1,1,1,1,1,0,0],
link_status:[6,6,0,6,0,0,0,5,0,0],
pkts:[1901830310,0,1338131260,33254,4291149014,0,2311488878,564,0,0,0,0,1814018004,0,33552310,0,0,0,0,0,0,0,0,0,0,0,0,0,1678459124,0,1866169392,0,0,0]
};
var tip = \"\";
</script>";

    #[test]
    fn test_extract_literal_from_page() {
        let literal = extract_object_literal(DEVICE_PAGE).unwrap();
        assert!(literal.starts_with("{\nstate:"));
        assert!(literal.ends_with("0,0]\n}"));
    }

    #[test]
    fn test_extract_skips_scalar_assignments() {
        let body = "var a = 1;\nvar b = {x:[1]};";
        assert_eq!(extract_object_literal(body).unwrap(), "{x:[1]}");
    }

    #[test]
    fn test_extract_missing_literal_is_parse_error() {
        let body = "<html><body>Login</body></html>";
        match extract_object_literal(body) {
            Err(ExporterError::Parse { body: raw, .. }) => assert_eq!(raw, body),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_quotes_known_keys_only() {
        let normalized = normalize_object_literal("{state:[1], link_status:[6],pkts:[1,2,3,4],foo:[0]}");
        assert_eq!(
            normalized,
            "{\"state\":[1], \"link_status\":[6],\"pkts\":[1,2,3,4],foo:[0]}"
        );
    }

    #[test]
    fn test_normalize_leaves_quoted_keys_alone() {
        let literal = "{\"state\":[1],\"link_status\":[6],\"pkts\":[]}";
        assert_eq!(normalize_object_literal(literal), literal);
    }

    #[test]
    fn test_normalize_does_not_touch_values() {
        // "state" inside a string value is not in key position
        let normalized = normalize_object_literal("{state:[0],note:\"state:\"}");
        assert_eq!(normalized, "{\"state\":[0],note:\"state:\"}");
    }

    #[test]
    fn test_decode_missing_key_is_empty() {
        let info = decode_all_info("{\"state\":[0,0],\"link_status\":[0,0]}").unwrap();
        assert_eq!(info.state, vec![0, 0]);
        assert!(info.pkts.is_empty());
    }

    #[test]
    fn test_parse_device_page() {
        let ports = parse_port_statistics(DEVICE_PAGE).unwrap();

        assert_eq!(ports.len(), 10);
        assert_eq!(
            ports[0].counters,
            Some(PacketCounters {
                tx_good: 1901830310,
                tx_bad: 0,
                rx_good: 1338131260,
                rx_bad: 33254,
            })
        );
        assert_eq!(ports[7].link_status, 5);
        assert_eq!(
            ports[7].counters,
            Some(PacketCounters {
                tx_good: 1678459124,
                tx_bad: 0,
                rx_good: 1866169392,
                rx_bad: 0,
            })
        );
        assert!(ports[8].counters.is_none());
        assert!(ports[9].counters.is_none());
    }

    #[test]
    fn test_parse_unquoted_unknown_key_is_parse_error() {
        let body = "var all_info = {\nstate:[1],\nlink_status:[6],\nspeed:[3]\n};";
        assert!(matches!(
            parse_port_statistics(body),
            Err(ExporterError::Parse { .. })
        ));
    }

    #[test]
    fn test_parse_reshape_failure_keeps_body() {
        let body = "var all_info = {\nstate:[1],\nlink_status:[6],\npkts:[1,2]\n};";
        match parse_port_statistics(body) {
            Err(ExporterError::Parse { reason, body: raw }) => {
                assert!(reason.contains("pkts has 2 entries"));
                assert_eq!(raw, body);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
