//! Serialization and compression of GELF records

use crate::core::Result;
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Write;

/// Payload encoding. Graylog's GELF UDP input detects all three by magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GelfCompression {
    #[default]
    Zlib,
    Gzip,
    None,
}

/// Serialize a record to compact JSON and compress it as one unit.
pub fn encode_payload(
    record: &Map<String, Value>,
    compression: GelfCompression,
) -> Result<Vec<u8>> {
    let json = serde_json::to_vec(record)?;
    compress(&json, compression)
}

pub fn compress(data: &[u8], compression: GelfCompression) -> Result<Vec<u8>> {
    match compression {
        GelfCompression::Zlib => {
            let mut encoder =
                ZlibEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
            encoder.write_all(data)?;
            Ok(encoder.finish()?)
        }
        GelfCompression::Gzip => {
            let mut encoder =
                GzEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
            encoder.write_all(data)?;
            Ok(encoder.finish()?)
        }
        GelfCompression::None => Ok(data.to_vec()),
    }
}
