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

//! Partition filters: slices of the fixed partition space, given as
//! `begin-count` ranges, single partition ids, or record digests.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use thiserror::Error;

use crate::defaults::MAX_PARTITIONS;

/// Length in bytes of a record digest.
pub const DIGEST_LEN: usize = 20;

#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PartitionError {
    #[error("invalid partition range {0:?}")]
    BadRange(String),

    #[error("partition {0} is out of range 0-4095")]
    OutOfRange(u64),

    #[error("partition range {begin}-{count} runs past the last partition")]
    PastEnd { begin: u32, count: u32 },

    #[error("invalid digest {digest:?}: {reason}")]
    BadDigest { digest: String, reason: String },
}

type Result<T> = std::result::Result<T, PartitionError>;

/// A half-open range `[begin, begin + count)` of partitions, optionally
/// starting at a record digest within the first partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionFilter {
    pub begin: u32,
    pub count: u32,
    /// Base64 record digest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl PartitionFilter {
    /// Every partition.
    pub fn all() -> PartitionFilter {
        PartitionFilter::range(0, MAX_PARTITIONS)
    }

    pub fn range(begin: u32, count: u32) -> PartitionFilter {
        PartitionFilter {
            begin,
            count,
            digest: None,
        }
    }

    /// One past the last partition covered.
    pub fn end(&self) -> u64 {
        u64::from(self.begin) + u64::from(self.count)
    }

    /// Everything from the record with this digest to the end of the
    /// partition space.
    pub fn after_digest(digest: &str) -> Result<PartitionFilter> {
        let begin = partition_id(&decode_digest(digest)?);
        Ok(PartitionFilter {
            begin,
            count: MAX_PARTITIONS - begin,
            digest: Some(digest.to_owned()),
        })
    }

    /// Just the partition holding the record with this digest.
    pub fn by_digest(digest: &str) -> Result<PartitionFilter> {
        let begin = partition_id(&decode_digest(digest)?);
        Ok(PartitionFilter {
            begin,
            count: 1,
            digest: Some(digest.to_owned()),
        })
    }

    /// Parse one `begin-count`, `id`, or base64 digest.
    pub fn parse(token: &str) -> Result<PartitionFilter> {
        if let Some((begin, count)) = token.split_once('-') {
            let begin = parse_partition(begin, token)?;
            let count: u32 = count
                .parse()
                .map_err(|_| PartitionError::BadRange(token.to_owned()))?;
            if u64::from(begin) + u64::from(count) > u64::from(MAX_PARTITIONS) {
                return Err(PartitionError::PastEnd { begin, count });
            }
            Ok(PartitionFilter::range(begin, count))
        } else if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            Ok(PartitionFilter::range(parse_partition(token, token)?, 1))
        } else {
            PartitionFilter::by_digest(token)
        }
    }

    /// Parse a comma-separated list of filters. An empty list is empty.
    pub fn parse_list(list: &str) -> Result<Vec<PartitionFilter>> {
        crate::assemble::split_by_comma(list)
            .iter()
            .map(|token| PartitionFilter::parse(token))
            .collect()
    }
}

impl fmt::Display for PartitionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.begin, self.count)?;
        if let Some(digest) = &self.digest {
            write!(f, " after {digest}")?;
        }
        Ok(())
    }
}

fn parse_partition(s: &str, token: &str) -> Result<u32> {
    let id: u64 = s
        .parse()
        .map_err(|_| PartitionError::BadRange(token.to_owned()))?;
    if id >= u64::from(MAX_PARTITIONS) {
        return Err(PartitionError::OutOfRange(id));
    }
    Ok(id as u32)
}

fn decode_digest(digest: &str) -> Result<Vec<u8>> {
    let bad = |reason: String| PartitionError::BadDigest {
        digest: digest.to_owned(),
        reason,
    };
    let bytes = STANDARD.decode(digest).map_err(|e| bad(e.to_string()))?;
    if bytes.len() != DIGEST_LEN {
        return Err(bad(format!(
            "expected {DIGEST_LEN} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// The partition a digest belongs to: the low 12 bits of its first two
/// bytes, little-endian.
fn partition_id(digest: &[u8]) -> u32 {
    let low = u32::from(u16::from_le_bytes([digest[0], digest[1]]));
    low & (MAX_PARTITIONS - 1)
}
