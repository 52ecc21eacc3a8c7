//! Property-based tests using proptest
//!
//! Tests that verify properties hold for arbitrary inputs.

mod common;

use common::stats_page;
use proptest::prelude::*;
use tplink_exporter::error::ExporterError;
use tplink_exporter::tplink::parser::parse_port_statistics;
use tplink_exporter::tplink::types::{reshape_ports, AllInfo, COUNTERS_PER_PORT};

/// Parallel arrays for `n` port slots with a dense `pkts` array
fn port_arrays() -> impl Strategy<Value = (Vec<i64>, Vec<i64>, Vec<u64>)> {
    (0usize..24).prop_flat_map(|n| {
        (
            prop::collection::vec(0i64..=1, n),
            prop::collection::vec(0i64..=6, n),
            prop::collection::vec(0u64..=u32::MAX as u64, n * COUNTERS_PER_PORT),
        )
    })
}

proptest! {
    #[test]
    fn test_one_record_per_state_entry((state, link_status, pkts) in port_arrays()) {
        // Given: A well-formed page with N entries in state
        let body = stats_page(&state, &link_status, &pkts);

        // When: Parsing it
        let ports = parse_port_statistics(&body).unwrap();

        // Then: N records, index i matching slot i
        prop_assert_eq!(ports.len(), state.len());
        for (i, port) in ports.iter().enumerate() {
            prop_assert_eq!(port.state, state[i]);
            prop_assert_eq!(port.link_status, link_status[i]);
        }
    }

    #[test]
    fn test_counters_present_iff_active((state, link_status, pkts) in port_arrays()) {
        let info = AllInfo { state, link_status, pkts };

        let ports = reshape_ports(&info).unwrap();

        for (i, port) in ports.iter().enumerate() {
            prop_assert_eq!(port.counters.is_some(), port.state == 1);
            if let Some(counters) = port.counters {
                let window = &info.pkts[i * COUNTERS_PER_PORT..(i + 1) * COUNTERS_PER_PORT];
                let values: Vec<u64> = counters.iter().map(|(_, v)| v).collect();
                prop_assert_eq!(values.as_slice(), window);
            }
        }
    }

    #[test]
    fn test_truncated_pkts_never_zero_filled(
        (state, link_status, pkts) in port_arrays(),
        cut in 1usize..8,
    ) {
        // Given: pkts cut short so the last active port's window runs off the end
        let last_active = state.iter().rposition(|s| *s == 1);
        prop_assume!(last_active.is_some());
        let last_active = last_active.unwrap();
        let needed = (last_active + 1) * COUNTERS_PER_PORT;
        let keep = needed.saturating_sub(cut);
        let info = AllInfo {
            state,
            link_status,
            pkts: pkts[..keep].to_vec(),
        };

        // When / Then: Reshape fails instead of inventing counters
        prop_assert!(reshape_ports(&info).is_err());
    }

    #[test]
    fn test_arbitrary_body_never_panics(body in "\\PC*") {
        // Any page either parses or is a parse error
        match parse_port_statistics(&body) {
            Ok(_) | Err(ExporterError::Parse { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_page_without_literal_is_parse_error(text in "[a-zA-Z0-9 <>/=\"\\n]*") {
        // No braces, so no object literal can be found
        let result = parse_port_statistics(&text);
        prop_assert!(
            matches!(result, Err(ExporterError::Parse { .. })),
            "expected parse error"
        );
    }
}
