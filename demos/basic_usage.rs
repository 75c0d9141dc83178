//! Basic GELF appender usage example
//!
//! Starts a local UDP listener standing in for Graylog, ships a few messages
//! to it and prints what arrived.
//!
//! Run with: cargo run --example basic_usage

use flate2::read::ZlibDecoder;
use gelf_udp_appender::prelude::*;
use gelf_udp_appender::{gelf_error, gelf_info, gelf_warn};
use serde_json::json;
use std::io::Read;
use std::net::UdpSocket;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== GELF UDP Appender - Basic Usage Example ===\n");

    // Local stand-in for a Graylog GELF UDP input
    let collector = UdpSocket::bind("127.0.0.1:0")?;
    collector.set_read_timeout(Some(Duration::from_secs(2)))?;
    let endpoint = collector.local_addr()?.to_string();

    println!("1. Building the appender from a JSON configuration:");
    let appender = GelfAppender::start(GelfConfig::from_value(&json!({
        "endpoint": endpoint,
        "host": "demo-node",
        "_environment": "demo",
        "_shard": 3,
    }))?)?;
    println!("   enabled: {}, endpoint: {:?}", appender.is_enabled(), appender.endpoint());

    println!("\n2. Logging with call-site capture:");
    gelf_info!(appender, "service started on port {}", 8080);
    gelf_warn!(appender, "cache miss ratio {} above {}", 0.42, 0.25);
    gelf_error!(appender, "peer {} disconnected", "10.0.0.7");

    println!("\n3. Logging with structured context:");
    let message = LogMessage::new(LogLevel::Debug, "block applied")
        .with_task_name("apply-loop")
        .with_context(LogContext::new().with_field("height", 1024u64));
    appender.log(&message);

    appender.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

    println!("\n4. Records received by the collector:");
    let mut buf = vec![0u8; 65_536];
    while let Ok((len, _)) = collector.recv_from(&mut buf) {
        let mut text = String::new();
        ZlibDecoder::new(&buf[..len]).read_to_string(&mut text)?;
        println!("   {}", text);
    }

    println!("\n5. Configuration errors are reported up front:");
    let reserved = GelfConfig::from_value(&json!({
        "endpoint": endpoint,
        "host": "demo-node",
        "_line": 7,
    }));
    if let Err(e) = reserved {
        println!("   {}", e);
    }

    println!("\n6. Unreachable endpoints disable the appender:");
    let disabled = GelfAppender::start(GelfConfig::new("graylog:not-a-port", "demo-node"))?;
    gelf_info!(disabled, "this goes nowhere");
    println!(
        "   enabled: {}, dropped: {}",
        disabled.is_enabled(),
        disabled.metrics().dropped_disabled()
    );

    let metrics = appender.metrics();
    println!(
        "\nSent {} messages in {} datagrams ({} failed)",
        metrics.messages_sent(),
        metrics.datagrams_sent(),
        metrics.failed()
    );

    Ok(())
}
