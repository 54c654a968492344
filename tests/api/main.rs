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

//! Tests for the asbackup library API.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use asbackup::secrets;
use asbackup::SecretResolver;

mod backup;
mod restore;

/// Write a config file into a new temporary directory.
fn config_file(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::with_prefix("asbackup-api-test-").expect("create temp dir");
    let path = dir.path().join("asbackup.yaml");
    fs::write(&path, content).expect("write config file");
    (dir, path)
}

/// Answers secret lookups from a map, as a secret agent would.
#[derive(Default)]
struct FakeAgent(HashMap<(String, String), String>);

impl FakeAgent {
    fn with(mut self, resource: &str, key: &str, value: &str) -> FakeAgent {
        self.0
            .insert((resource.to_owned(), key.to_owned()), value.to_owned());
        self
    }
}

impl SecretResolver for FakeAgent {
    fn resolve(&self, resource: &str, key: &str) -> secrets::Result<String> {
        self.0
            .get(&(resource.to_owned(), key.to_owned()))
            .cloned()
            .ok_or_else(|| secrets::SecretError::Agent(format!("no secret {resource}:{key}")))
    }
}
