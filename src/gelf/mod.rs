//! GELF building blocks: configuration, endpoint resolution, record
//! encoding, compression, chunking and background dispatch.

pub mod chunker;
pub mod compression;
pub mod config;
pub mod dispatch;
pub mod encoder;
pub mod endpoint;

pub use chunker::{
    chunk_count, chunk_payload, message_id, send_payload, DatagramSink, CHUNK_HEADER_SIZE,
    CHUNK_MAGIC, DEFAULT_MAX_PAYLOAD_SIZE, MAX_CHUNKS, MAX_UDP_PAYLOAD_SIZE,
};
pub use compression::{compress, encode_payload, GelfCompression};
pub use config::{is_valid_user_field_name, GelfConfig, RESERVED_FIELD_NAMES};
pub use dispatch::{DispatchExecutor, Task, TaskObserver, DEFAULT_SHUTDOWN_TIMEOUT};
pub use encoder::{encode_record, stamp_log_id, GelfEncoder, LogIdCounter, GELF_VERSION};
pub use endpoint::{
    parse_endpoint, resolve_endpoint, resolve_endpoint_with, EndpointSpec, HostResolver,
    SystemResolver,
};
