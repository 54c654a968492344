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

//! Cross-field checks on populated options.
//!
//! Every check is pure and stops at the first problem.

use itertools::Itertools;
use thiserror::Error;

use crate::options::{
    AzureOptions, BackupOptions, GcsOptions, LocalOptions, Operation, Provider, S3Options,
    StorageProblem,
};
use crate::partition::PartitionFilter;

/// Options that don't make sense together, or a value out of range.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("must specify either output-file or directory")]
    MissingDestination,

    #[error("only one of output-file and directory may be configured at the same time")]
    ConflictingDestination,

    #[error("only one of {} can be configured", .0.iter().join(" or "))]
    ConflictingFilters(Vec<&'static str>),

    #[error("continue and state-file-dst are mutually exclusive")]
    ContinueWithStateFile,

    #[error("estimate with any filter is not allowed")]
    EstimateWithFilter,

    #[error("estimate with output-file or directory is not allowed")]
    EstimateWithDestination,

    #[error("estimate with estimate-samples < 0 is not allowed")]
    NegativeEstimateSamples,

    #[error("only one storage provider can be configured: {}", .0.iter().join(" and "))]
    ConflictingStorage(Vec<Provider>),

    #[error("invalid {provider} settings: {source}")]
    Storage {
        provider: Provider,
        source: StorageProblem,
    },

    #[error("partition filter count must be greater than 0: {0}")]
    EmptyPartitionFilter(PartitionFilter),

    #[error("overlapping partition filters: {first} and {second}")]
    OverlappingPartitionFilters {
        first: PartitionFilter,
        second: PartitionFilter,
    },

    #[error("parallel must be between 0 and 1024, not {0}")]
    ParallelOutOfRange(i64),

    #[error("{0} must be non-negative")]
    Negative(&'static str),

    #[error("input file or directory required")]
    MissingRestoreSource,

    #[error("only one of directory and input-file may be configured at the same time")]
    ConflictingRestoreSource,

    #[error(
        "only one of directory, input-file and directory-list may be configured at the same time"
    )]
    ConflictingDirectoryList,

    #[error("must specify directory-list list")]
    ParentWithoutDirectoryList,

    #[error("{0} is required")]
    Required(&'static str),

    #[error("rewind must be 'all' or a positive number of seconds, not {0:?}")]
    InvalidRewind(String),

    #[error("local port must be between 0 and 65535, not {0}")]
    LocalPortOutOfRange(i64),

    #[error("dc name must be 1-31 characters of [a-zA-Z0-9_$-], not {0:?}")]
    InvalidDcName(String),

    #[error("max throughput must be a multiple of 100, not {0}")]
    MaxThroughputGranularity(i64),

    #[error("missing connection type")]
    MissingConnectionType,

    #[error("unsupported connection type: {0}")]
    UnsupportedConnectionType(String),

    #[error("invalid seed {seed:?}: {reason}")]
    InvalidSeed { seed: String, reason: &'static str },
}

type Result<T> = std::result::Result<T, ValidationError>;

/// At most one of the record selection filters may be set.
pub fn validate_backup_filters(backup: &BackupOptions) -> Result<()> {
    let configured: Vec<&'static str> = [
        ("after-digest", &backup.after_digest),
        ("partition-list", &backup.partition_list),
        ("node-list", &backup.node_list),
        ("rack-list", &backup.rack_list),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(name, _)| name)
    .collect();
    if configured.len() > 1 {
        return Err(ValidationError::ConflictingFilters(configured));
    }
    Ok(())
}

/// Exactly one of output-file and directory, unless only estimating.
pub fn validate_backup_destination(backup: &BackupOptions) -> Result<()> {
    let directory = !backup.common.directory.is_empty();
    let output_file = !backup.output_file.is_empty();
    if !backup.estimate && !directory && !output_file {
        return Err(ValidationError::MissingDestination);
    }
    if directory && output_file {
        return Err(ValidationError::ConflictingDestination);
    }
    Ok(())
}

/// An estimate reads a sample of the whole namespace and writes nothing.
pub fn validate_estimate_constraints(backup: &BackupOptions) -> Result<()> {
    if !backup.estimate {
        return Ok(());
    }
    let any_filter = [
        &backup.partition_list,
        &backup.node_list,
        &backup.after_digest,
        &backup.filter_expression,
        &backup.modified_after,
        &backup.modified_before,
    ]
    .iter()
    .any(|value| !value.is_empty())
        || backup.no_ttl_only;
    if any_filter {
        return Err(ValidationError::EstimateWithFilter);
    }
    if !backup.output_file.is_empty() || !backup.common.directory.is_empty() {
        return Err(ValidationError::EstimateWithDestination);
    }
    if backup.estimate_samples < 0 {
        return Err(ValidationError::NegativeEstimateSamples);
    }
    Ok(())
}

pub fn validate_continuation(backup: &BackupOptions) -> Result<()> {
    if !backup.continue_from.is_empty() && !backup.state_file_dst.is_empty() {
        return Err(ValidationError::ContinueWithStateFile);
    }
    Ok(())
}

/// At most one cloud provider, and its own settings must be valid.
///
/// A provider counts as configured if it names a bucket or container, or
/// just an endpoint. Local disk settings are checked when no cloud
/// provider is configured.
pub fn validate_storage_providers(
    operation: Operation,
    s3: &S3Options,
    gcs: &GcsOptions,
    azure: &AzureOptions,
    local: &LocalOptions,
) -> Result<()> {
    let configured: Vec<Provider> = [
        (Provider::S3, s3.is_configured()),
        (Provider::Gcs, gcs.is_configured()),
        (Provider::Azure, azure.is_configured()),
    ]
    .into_iter()
    .filter_map(|(provider, configured)| configured.then_some(provider))
    .collect();
    if configured.len() > 1 {
        return Err(ValidationError::ConflictingStorage(configured));
    }
    let (provider, checked) = match configured.first() {
        Some(Provider::S3) => (Provider::S3, s3.validate(operation)),
        Some(Provider::Gcs) => (Provider::Gcs, gcs.validate(operation)),
        Some(Provider::Azure) => (Provider::Azure, azure.validate(operation)),
        Some(Provider::Local) | None => (Provider::Local, local.validate(operation)),
    };
    checked.map_err(|source| ValidationError::Storage { provider, source })
}

/// Every filter covers at least one partition, and no two overlap.
///
/// Ranges are half-open, so `0-1000` and `1000-3000` only touch.
pub fn validate_partition_filters(filters: &[PartitionFilter]) -> Result<()> {
    if let Some(empty) = filters.iter().find(|f| f.count == 0) {
        return Err(ValidationError::EmptyPartitionFilter(empty.clone()));
    }
    let sorted: Vec<&PartitionFilter> = filters.iter().sorted_by_key(|f| f.begin).collect();
    for (first, second) in sorted.iter().tuple_windows() {
        if first.begin == second.begin || first.end() > u64::from(second.begin) {
            return Err(ValidationError::OverlappingPartitionFilters {
                first: (*first).clone(),
                second: (*second).clone(),
            });
        }
    }
    Ok(())
}
