// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Contracts for the services that supply dataset metadata.

use crate::Result;
use crate::principal::EntityType;

/// One grant on a dataset, as reported by the warehouse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessEntry {
    /// The identity of the grantee, for example an email address.
    pub principal: String,
    pub entity_type: EntityType,
    /// The warehouse role tag, such as `READER`.
    pub role: String,
}

impl AccessEntry {
    pub fn new<P, R>(principal: P, entity_type: EntityType, role: R) -> Self
    where
        P: Into<String>,
        R: Into<String>,
    {
        Self {
            principal: principal.into(),
            entity_type,
            role: role.into(),
        }
    }
}

/// Enumerates the datasets of one project and fetches their access lists.
///
/// The enumeration is lazy, finite and cannot be restarted.
/// [next_dataset][DatasetSource::next_dataset] returns `Ok(None)` once the
/// datasets are exhausted, and an error if the enumeration fails midway.
///
/// Datasets are processed one at a time on the caller's task, the futures
/// need not be `Send`.
#[async_trait::async_trait(?Send)]
pub trait DatasetSource {
    /// Returns the identifier of the next dataset.
    async fn next_dataset(&mut self) -> Result<Option<String>>;

    /// Fetches the access entries of `dataset_id`.
    async fn access_entries(&self, dataset_id: &str) -> Result<Vec<AccessEntry>>;
}
