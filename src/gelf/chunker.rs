//! GELF UDP chunking
//!
//! A payload that fits in one datagram is sent as is. A larger payload is
//! split into chunks, each prefixed with a 12-byte header:
//!
//! ```text
//! +------+------+----------------+-----+-------+-----------------+
//! | 0x1e | 0x0f | message id (8) | seq | count | body ...        |
//! +------+------+----------------+-----+-------+-----------------+
//! ```
//!
//! The message id is a hash of the whole payload, so every chunk of one
//! message carries the same id and receivers can group chunks that arrive
//! out of order.

use crate::core::{LoggerError, Result};
use fnv::FnvHasher;
use std::hash::Hasher;
use std::io;
use std::net::{SocketAddr, UdpSocket};

/// Marks a datagram as one chunk of a larger message
pub const CHUNK_MAGIC: [u8; 2] = [0x1e, 0x0f];

/// magic (2) + message id (8) + sequence (1) + count (1)
pub const CHUNK_HEADER_SIZE: usize = 2 + 8 + 1 + 1;

/// Datagrams above a few hundred bytes are not reliably delivered across
/// arbitrary networks, even though UDP allows up to 64KB. 1400 or 8100 are
/// usually fine on an intranet.
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 512;

/// IPv4 UDP payload limit
pub const MAX_UDP_PAYLOAD_SIZE: usize = 65_507;

/// Largest chunk count the one-byte count field can carry. Sequence numbers
/// run from 0 to count - 1.
pub const MAX_CHUNKS: usize = u8::MAX as usize;

/// Anything that can put a datagram on the wire
pub trait DatagramSink: Send {
    fn send_datagram(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize>;
}

impl DatagramSink for UdpSocket {
    fn send_datagram(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize> {
        self.send_to(buf, target)
    }
}

/// Content-derived message id, in native byte order
pub fn message_id(payload: &[u8]) -> [u8; 8] {
    let mut hasher = FnvHasher::default();
    hasher.write(payload);
    hasher.finish().to_ne_bytes()
}

/// Number of datagrams `len` bytes need under `max_payload_size`
pub fn chunk_count(len: usize, max_payload_size: usize) -> usize {
    if len <= max_payload_size {
        return 1;
    }
    let body_size = max_payload_size - CHUNK_HEADER_SIZE;
    len.div_ceil(body_size)
}

/// Split a payload into the datagrams that carry it.
///
/// # Errors
///
/// Returns [`LoggerError::MessageTooLarge`] when more than [`MAX_CHUNKS`]
/// chunks would be needed.
pub fn chunk_payload(payload: &[u8], max_payload_size: usize) -> Result<Vec<Vec<u8>>> {
    if payload.len() <= max_payload_size {
        return Ok(vec![payload.to_vec()]);
    }

    let total = chunk_count(payload.len(), max_payload_size);
    if total > MAX_CHUNKS {
        return Err(LoggerError::message_too_large(payload.len(), total, MAX_CHUNKS));
    }

    let id = message_id(payload);
    let body_size = max_payload_size - CHUNK_HEADER_SIZE;

    let datagrams: Vec<Vec<u8>> = payload
        .chunks(body_size)
        .enumerate()
        .map(|(seq, body)| {
            let mut datagram = Vec::with_capacity(CHUNK_HEADER_SIZE + body.len());
            datagram.extend_from_slice(&CHUNK_MAGIC);
            datagram.extend_from_slice(&id);
            // both fit in a byte: total <= MAX_CHUNKS
            datagram.push(seq as u8);
            datagram.push(total as u8);
            datagram.extend_from_slice(body);
            datagram
        })
        .collect();

    assert_eq!(
        datagrams.len(),
        total,
        "GELF chunk accounting mismatch for {} byte payload",
        payload.len()
    );

    Ok(datagrams)
}

/// Send a payload to `target`, chunking when needed. Returns the number of
/// datagrams handed to the sink.
///
/// Every datagram is an independent send. A failed send does not stop the
/// remaining chunks; the first failure is returned once all were attempted.
pub fn send_payload<S: DatagramSink + ?Sized>(
    sink: &S,
    target: SocketAddr,
    payload: &[u8],
    max_payload_size: usize,
) -> Result<usize> {
    let datagrams = chunk_payload(payload, max_payload_size)?;

    let mut first_error = None;
    for datagram in &datagrams {
        if let Err(e) = sink.send_datagram(datagram, target) {
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        None => Ok(datagrams.len()),
        Some(e) => Err(LoggerError::io_operation(
            "sending GELF datagram",
            format!("to {}", target),
            e,
        )),
    }
}
