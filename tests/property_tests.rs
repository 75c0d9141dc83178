//! Property-based tests for gelf_udp_appender using proptest

use gelf_udp_appender::gelf::{
    chunk_count, chunk_payload, is_valid_user_field_name, parse_endpoint, EndpointSpec,
    LogIdCounter, CHUNK_HEADER_SIZE, CHUNK_MAGIC, MAX_CHUNKS, MAX_UDP_PAYLOAD_SIZE,
    RESERVED_FIELD_NAMES,
};
use gelf_udp_appender::prelude::*;
use proptest::prelude::*;
use std::collections::HashSet;
use std::net::SocketAddr;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::All),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Off),
    ]
}

// ============================================================================
// Chunking Tests
// ============================================================================

proptest! {
    /// Payloads that fit are sent as a single, unmodified datagram
    #[test]
    fn test_small_payload_is_one_datagram(
        max in (CHUNK_HEADER_SIZE + 1)..2048usize,
        seed in prop::collection::vec(any::<u8>(), 0..2048),
    ) {
        let payload = &seed[..seed.len().min(max)];
        let datagrams = chunk_payload(payload, max).unwrap();

        prop_assert_eq!(datagrams.len(), 1);
        prop_assert_eq!(&datagrams[0][..], payload);
    }

    /// Chunked payloads reassemble to the original bytes
    #[test]
    fn test_chunks_reassemble(
        max in (CHUNK_HEADER_SIZE + 1)..600usize,
        payload in prop::collection::vec(any::<u8>(), 1..8000),
    ) {
        prop_assume!(payload.len() > max);
        prop_assume!(chunk_count(payload.len(), max) <= MAX_CHUNKS);

        let datagrams = chunk_payload(&payload, max).unwrap();
        let total = datagrams.len();
        prop_assert!(total > 1);
        prop_assert_eq!(total, chunk_count(payload.len(), max));

        let id = &datagrams[0][2..10];
        let mut seqs = HashSet::new();
        let mut reassembled = Vec::with_capacity(payload.len());

        for datagram in &datagrams {
            prop_assert!(datagram.len() <= max);
            prop_assert_eq!(&datagram[..2], &CHUNK_MAGIC[..]);
            prop_assert_eq!(&datagram[2..10], id);
            prop_assert_eq!(datagram[11] as usize, total);
            prop_assert!((datagram[10] as usize) < total);
            prop_assert!(seqs.insert(datagram[10]));
            reassembled.extend_from_slice(&datagram[CHUNK_HEADER_SIZE..]);
        }

        prop_assert_eq!(reassembled, payload);
    }

    /// Every count the header byte can carry is sent in full
    #[test]
    fn test_large_chunk_counts_are_sent(count in 2..=MAX_CHUNKS) {
        let body = 512 - CHUNK_HEADER_SIZE;
        let payload = vec![0x24u8; body * count];

        let datagrams = chunk_payload(&payload, 512).unwrap();
        prop_assert_eq!(datagrams.len(), count);
        prop_assert_eq!(datagrams[count - 1][10] as usize, count - 1);
        prop_assert!(datagrams.iter().all(|d| d[11] as usize == count));
    }

    /// Payloads needing more than the chunk limit are rejected, never truncated
    #[test]
    fn test_too_many_chunks_rejected(max in (CHUNK_HEADER_SIZE + 1)..64usize) {
        let body = max - CHUNK_HEADER_SIZE;
        let payload = vec![0x42u8; body * MAX_CHUNKS + 1];

        let is_too_large = matches!(
            chunk_payload(&payload, max),
            Err(LoggerError::MessageTooLarge { .. })
        );
        prop_assert!(is_too_large);
    }
}

// ============================================================================
// Configuration Tests
// ============================================================================

proptest! {
    /// Underscore-prefixed word names are accepted unless reserved
    #[test]
    fn test_valid_field_names(name in "_[a-zA-Z0-9_.\\-]{0,24}") {
        prop_assert!(is_valid_user_field_name(&name));

        let reserved = RESERVED_FIELD_NAMES.contains(&name.as_str());
        let config = GelfConfig::new("127.0.0.1:12201", "svc1").with_field(name, "v");
        prop_assert_eq!(config.validate().is_ok(), !reserved);
    }

    /// Names without the leading underscore are always rejected
    #[test]
    fn test_names_without_underscore_rejected(name in "[a-zA-Z0-9.\\-][a-zA-Z0-9_.\\-]{0,24}") {
        prop_assert!(!is_valid_user_field_name(&name));

        let config = GelfConfig::new("127.0.0.1:12201", "svc1").with_field(name, 1);
        prop_assert!(config.validate().is_err());
    }

    /// Names containing characters outside the allowed set are rejected
    #[test]
    fn test_names_with_bad_characters_rejected(
        prefix in "_[a-z]{0,8}",
        bad in "[ /:@#$%!]",
        suffix in "[a-z]{0,8}",
    ) {
        let name = format!("{}{}{}", prefix, bad, suffix);
        prop_assert!(!is_valid_user_field_name(&name));
    }

    /// Only payload sizes that leave room for a chunk body are accepted
    #[test]
    fn test_max_payload_size_bounds(size in 0usize..70_000) {
        let config = GelfConfig::new("127.0.0.1:12201", "svc1").with_max_payload_size(size);
        let in_range = size > CHUNK_HEADER_SIZE && size <= MAX_UDP_PAYLOAD_SIZE;
        prop_assert_eq!(config.validate().is_ok(), in_range);
    }
}

// ============================================================================
// Endpoint Tests
// ============================================================================

proptest! {
    /// Numeric endpoints parse without resolution and round-trip
    #[test]
    fn test_literal_endpoint_roundtrip(
        a in any::<u8>(),
        b in any::<u8>(),
        c in any::<u8>(),
        d in any::<u8>(),
        port in any::<u16>(),
    ) {
        let endpoint = format!("{}.{}.{}.{}:{}", a, b, c, d, port);
        let expected: SocketAddr = endpoint.parse().unwrap();

        prop_assert_eq!(parse_endpoint(&endpoint), EndpointSpec::Literal(expected));
        prop_assert_eq!(parse_endpoint(&expected.to_string()), EndpointSpec::Literal(expected));
    }

    /// Host names are deferred to the resolver with the parsed port
    #[test]
    fn test_hostname_needs_resolution(
        host in "[a-z][a-z0-9\\-]{0,20}(\\.[a-z]{2,6}){0,2}",
        port in any::<u16>(),
    ) {
        let parsed = parse_endpoint(&format!("{}:{}", host, port));
        prop_assert_eq!(parsed, EndpointSpec::NeedsResolution { host, port });
    }

    /// Non-numeric ports are rejected before any lookup
    #[test]
    fn test_bad_port_rejected(host in "[a-z]{1,12}", port in "[a-z]{1,6}") {
        let parsed = parse_endpoint(&format!("{}:{}", host, port));
        prop_assert_eq!(parsed, EndpointSpec::Invalid(ResolveError::BadPort { port }));
    }
}

// ============================================================================
// Level and Message Tests
// ============================================================================

proptest! {
    /// Every level maps onto a syslog severity GELF understands
    #[test]
    fn test_level_maps_to_syslog(level in any_level()) {
        let severity = level.syslog_severity();
        prop_assert!([3u8, 4, 6, 7].contains(&severity));
    }

    /// Messages without placeholders render unchanged
    #[test]
    fn test_render_without_placeholders(text in "[^{}]*") {
        let message = LogMessage::new(LogLevel::Info, text.clone());
        prop_assert_eq!(message.render(), text);
    }

    /// Each `{}` consumes one argument in order
    #[test]
    fn test_render_substitutes_in_order(args in prop::collection::vec(any::<i64>(), 0..8)) {
        let format = vec!["{}"; args.len()].join(",");
        let message = args
            .iter()
            .fold(LogMessage::new(LogLevel::Debug, format), |m, &a| m.with_arg(a));

        let expected = args.iter().map(i64::to_string).collect::<Vec<_>>().join(",");
        prop_assert_eq!(message.render(), expected);
    }
}

// ============================================================================
// Log Id Tests
// ============================================================================

proptest! {
    /// Ids start at 1 and grow by one per call
    #[test]
    fn test_log_ids_monotonic(count in 1usize..500) {
        let counter = LogIdCounter::new();
        let ids: Vec<u64> = (0..count).map(|_| counter.next_id()).collect();

        prop_assert_eq!(ids, (1..=count as u64).collect::<Vec<_>>());
        prop_assert_eq!(counter.current(), count as u64);
    }
}
