//! Endpoint resolution
//!
//! An endpoint is `ip:port` or `hostname:port`. Literal addresses are parsed
//! without touching the network; host names go through a [`HostResolver`].
//! Only IPv4 literals and DNS names are supported. The host/port split is at
//! the first colon, so bare IPv6 literals are not understood.

use crate::core::ResolveError;
use std::io;
use std::net::{SocketAddr, SocketAddrV4, ToSocketAddrs};

/// Outcome of looking at an endpoint string without doing any I/O
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointSpec {
    /// Numeric `ip:port`, ready to use
    Literal(SocketAddr),
    /// Needs a DNS lookup
    NeedsResolution { host: String, port: u16 },
    /// Can never resolve
    Invalid(ResolveError),
}

/// Name lookup used for non-literal endpoints
pub trait HostResolver {
    fn lookup(&self, host: &str, port: u16) -> io::Result<Vec<SocketAddr>>;
}

/// Resolver backed by the operating system (`getaddrinfo`)
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl HostResolver for SystemResolver {
    fn lookup(&self, host: &str, port: u16) -> io::Result<Vec<SocketAddr>> {
        Ok((host, port).to_socket_addrs()?.collect())
    }
}

/// Classify an endpoint string.
pub fn parse_endpoint(endpoint: &str) -> EndpointSpec {
    if let Ok(addr) = endpoint.parse::<SocketAddrV4>() {
        return EndpointSpec::Literal(SocketAddr::V4(addr));
    }

    let Some((host, port)) = endpoint.split_once(':') else {
        return EndpointSpec::Invalid(ResolveError::MissingPort {
            endpoint: endpoint.to_string(),
        });
    };

    match port.parse::<u16>() {
        Ok(port) => EndpointSpec::NeedsResolution {
            host: host.to_string(),
            port,
        },
        Err(_) => EndpointSpec::Invalid(ResolveError::BadPort {
            port: port.to_string(),
        }),
    }
}

/// Resolve an endpoint with the system resolver.
pub fn resolve_endpoint(endpoint: &str) -> Result<SocketAddr, ResolveError> {
    resolve_endpoint_with(endpoint, &SystemResolver)
}

/// Resolve an endpoint, consulting `resolver` only for host names.
///
/// IPv4 results are preferred when a name has several addresses.
pub fn resolve_endpoint_with<R: HostResolver + ?Sized>(
    endpoint: &str,
    resolver: &R,
) -> Result<SocketAddr, ResolveError> {
    match parse_endpoint(endpoint) {
        EndpointSpec::Literal(addr) => Ok(addr),
        EndpointSpec::Invalid(err) => Err(err),
        EndpointSpec::NeedsResolution { host, port } => {
            let unknown = || ResolveError::UnknownHost {
                hostname: host.clone(),
            };
            let addrs = resolver.lookup(&host, port).map_err(|_| unknown())?;
            addrs
                .iter()
                .find(|addr| addr.is_ipv4())
                .or_else(|| addrs.first())
                .copied()
                .ok_or_else(unknown)
        }
    }
}
