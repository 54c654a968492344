// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

//! Resolve `secrets:<resource>:<key>` references through the secret agent.
//!
//! Any credential-like setting can name a secret instead of holding the
//! value itself. Values without the `secrets:` prefix are used as given.
//!
//! The agent speaks length-prefixed JSON: each message is an 8-byte header
//! (a magic number and the body length, both big-endian) followed by the
//! body.

use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
#[cfg(unix)]
use std::os::unix::net::UnixStream;
use std::time::Duration;

use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::options::SecretAgentOptions;

/// Prefix marking a value as a secret reference.
pub const SECRET_PREFIX: &str = "secrets:";

const MAGIC: u32 = 0x51de_c1cc;
const HEADER_LEN: usize = 8;
/// Larger replies are assumed to be garbage.
const MAX_BODY_LEN: usize = 1 << 20;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("secret agent is not configured")]
    NotConfigured,

    #[error("invalid secret reference {0:?}: expected secrets:<resource>:<key>")]
    BadReference(String),

    #[error("unsupported secret agent connection type {0:?}")]
    UnsupportedConnectionType(String),

    #[error("secret agent TLS (ca file) is not supported")]
    UnsupportedCaFile,

    #[error("failed to connect to secret agent at {address}")]
    Connect {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to talk to secret agent")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("secret agent sent a bad message: {0}")]
    Protocol(String),

    #[error("failed to decode secret agent message")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("secret agent error: {0}")]
    Agent(String),

    #[error("failed to decode base64 secret")]
    Base64 {
        #[from]
        source: base64::DecodeError,
    },

    #[error("secret value is not UTF-8")]
    NotUtf8,
}

pub type Result<T> = std::result::Result<T, SecretError>;

/// Looks up one secret.
pub trait SecretResolver {
    fn resolve(&self, resource: &str, key: &str) -> Result<String>;
}

/// Return `value`, or the secret it refers to.
///
/// A reference with no resolver is an error, rather than being passed
/// through as a literal credential.
pub fn parse_secret(resolver: Option<&dyn SecretResolver>, value: &str) -> Result<String> {
    let Some(reference) = value.strip_prefix(SECRET_PREFIX) else {
        return Ok(value.to_owned());
    };
    let Some(resolver) = resolver else {
        return Err(SecretError::NotConfigured);
    };
    match reference.split_once(':') {
        Some((resource, key)) if !resource.is_empty() && !key.is_empty() => {
            trace!(resource, key, "resolve secret");
            resolver.resolve(resource, key)
        }
        _ => Err(SecretError::BadReference(value.to_owned())),
    }
}

/// True if `value` names a secret.
pub fn is_secret(value: &str) -> bool {
    value.starts_with(SECRET_PREFIX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connection {
    Tcp,
    Uds,
}

/// Talks to a secret agent over TCP or a Unix socket, one connection per
/// lookup.
#[derive(Debug, Clone)]
pub struct SecretAgentClient {
    connection: Connection,
    address: String,
    port: u16,
    timeout: Option<Duration>,
    is_base64: bool,
}

#[derive(Serialize)]
struct Request<'a> {
    #[serde(rename = "Resource")]
    resource: &'a str,
    #[serde(rename = "SecretKey")]
    secret_key: &'a str,
}

#[derive(Deserialize)]
struct Response {
    #[serde(rename = "SecretValue", default)]
    secret_value: String,
    #[serde(rename = "Error", default)]
    error: String,
}

impl SecretAgentClient {
    pub fn new(options: &SecretAgentOptions) -> Result<SecretAgentClient> {
        let connection = if options.connection_type.eq_ignore_ascii_case("tcp") {
            Connection::Tcp
        } else if options.connection_type.eq_ignore_ascii_case("uds") {
            Connection::Uds
        } else {
            return Err(SecretError::UnsupportedConnectionType(
                options.connection_type.clone(),
            ));
        };
        if !options.ca_file.is_empty() {
            return Err(SecretError::UnsupportedCaFile);
        }
        let port = u16::try_from(options.port).map_err(|_| {
            SecretError::Protocol(format!("port {} is out of range", options.port))
        })?;
        Ok(SecretAgentClient {
            connection,
            address: options.address.clone(),
            port,
            // Zero would make socket timeouts fail; treat it as unlimited.
            timeout: u64::try_from(options.timeout)
                .ok()
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis),
            is_base64: options.is_base64,
        })
    }

    fn fetch(&self, request: &[u8]) -> Result<Vec<u8>> {
        match self.connection {
            Connection::Tcp => {
                let stream = self.connect_tcp()?;
                stream.set_read_timeout(self.timeout)?;
                stream.set_write_timeout(self.timeout)?;
                exchange(stream, request)
            }
            #[cfg(unix)]
            Connection::Uds => {
                let stream =
                    UnixStream::connect(&self.address).map_err(|source| SecretError::Connect {
                        address: self.address.clone(),
                        source,
                    })?;
                stream.set_read_timeout(self.timeout)?;
                stream.set_write_timeout(self.timeout)?;
                exchange(stream, request)
            }
            #[cfg(not(unix))]
            Connection::Uds => Err(SecretError::UnsupportedConnectionType("uds".to_owned())),
        }
    }

    fn connect_tcp(&self) -> Result<TcpStream> {
        let address = format!("{}:{}", self.address, self.port);
        let connect_error = |source| SecretError::Connect {
            address: address.clone(),
            source,
        };
        let mut last_error = None;
        for socket_addr in (self.address.as_str(), self.port)
            .to_socket_addrs()
            .map_err(connect_error)?
        {
            let attempt = match self.timeout {
                Some(timeout) => TcpStream::connect_timeout(&socket_addr, timeout),
                None => TcpStream::connect(socket_addr),
            };
            match attempt {
                Ok(stream) => return Ok(stream),
                Err(err) => last_error = Some(err),
            }
        }
        Err(connect_error(last_error.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no addresses")
        })))
    }
}

impl SecretResolver for SecretAgentClient {
    fn resolve(&self, resource: &str, key: &str) -> Result<String> {
        let body = serde_json::to_vec(&Request {
            resource,
            secret_key: key,
        })?;
        let reply = self.fetch(&body)?;
        let response: Response = serde_json::from_slice(&reply)?;
        if !response.error.is_empty() {
            return Err(SecretError::Agent(response.error));
        }
        debug!(resource, key, "resolved secret");
        if self.is_base64 {
            let decoded = base64::engine::general_purpose::STANDARD.decode(&response.secret_value)?;
            String::from_utf8(decoded).map_err(|_| SecretError::NotUtf8)
        } else {
            Ok(response.secret_value)
        }
    }
}

/// Send one framed request and read one framed reply.
fn exchange<S: Read + Write>(mut stream: S, body: &[u8]) -> Result<Vec<u8>> {
    write_frame(&mut stream, body)?;
    stream.flush()?;
    read_frame(&mut stream)
}

fn write_frame<W: Write>(writer: &mut W, body: &[u8]) -> Result<()> {
    let len = u32::try_from(body.len())
        .map_err(|_| SecretError::Protocol("request too large".to_owned()))?;
    let mut header = [0u8; HEADER_LEN];
    header[..4].copy_from_slice(&MAGIC.to_be_bytes());
    header[4..].copy_from_slice(&len.to_be_bytes());
    writer.write_all(&header)?;
    writer.write_all(body)?;
    Ok(())
}

fn read_frame<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut header = [0u8; HEADER_LEN];
    reader.read_exact(&mut header)?;
    let (magic, len) = header.split_at(4);
    let magic = u32::from_be_bytes([magic[0], magic[1], magic[2], magic[3]]);
    if magic != MAGIC {
        return Err(SecretError::Protocol(format!("bad magic {magic:#x}")));
    }
    let len = u32::from_be_bytes([len[0], len[1], len[2], len[3]]) as usize;
    if len > MAX_BODY_LEN {
        return Err(SecretError::Protocol(format!("reply of {len} bytes")));
    }
    let mut body = vec![0u8; len];
    reader.read_exact(&mut body)?;
    Ok(body)
}
