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

//! Reads dataset access lists with the BigQuery v2 `DatasetService`.

use crate::builder::{Audit, build_register};
use crate::principal::EntityType;
use crate::source::{AccessEntry, DatasetSource};
use crate::{Error, Result};
use google_cloud_bigquery_v2::client::DatasetService;
use google_cloud_bigquery_v2::model::{Access, DatasetList, ListFormatDataset};
use google_cloud_gax::error::Error as GaxError;
use google_cloud_gax::paginator::ItemPaginator;

/// Enumerates the datasets of a BigQuery project.
///
/// The datasets come from an [ItemPaginator] over `list_datasets`, see
/// [project_source].
///
/// # Example
/// ```no_run
/// # use access_audit::bigquery::project_source;
/// # use access_audit::builder::build_register;
/// use google_cloud_bigquery_v2::client::DatasetService;
/// async fn example() -> anyhow::Result<()> {
///     let client = DatasetService::builder().build().await?;
///     let mut source = project_source(client, "my-project".to_string());
///     let audit = build_register(&mut source).await?;
///     print!("{}", audit.register());
///     Ok(())
/// }
/// ```
pub struct BigQuerySource<P> {
    client: DatasetService,
    project_id: String,
    datasets: P,
}

impl<P> BigQuerySource<P>
where
    P: ItemPaginator<DatasetList, GaxError>,
{
    /// Creates a source that enumerates the listing items from `datasets`.
    pub fn new(client: DatasetService, project_id: String, datasets: P) -> Self {
        Self {
            client,
            project_id,
            datasets,
        }
    }
}

/// Returns a source over all the datasets in `project_id`.
pub fn project_source(
    client: DatasetService,
    project_id: String,
) -> BigQuerySource<impl ItemPaginator<DatasetList, GaxError>> {
    let datasets = client.list_datasets().set_project_id(&project_id).by_item();
    BigQuerySource::new(client, project_id, datasets)
}

#[async_trait::async_trait(?Send)]
impl<P> DatasetSource for BigQuerySource<P>
where
    P: ItemPaginator<DatasetList, GaxError>,
{
    async fn next_dataset(&mut self) -> Result<Option<String>> {
        while let Some(item) = self.datasets.next().await {
            let item = item.map_err(|e| {
                Error::metadata(format!("datasets in project {}", self.project_id), e)
            })?;
            match dataset_id(&item) {
                Some(id) => return Ok(Some(id)),
                None => tracing::debug!("skipping listing item without a dataset id: {item:?}"),
            }
        }
        Ok(None)
    }

    async fn access_entries(&self, dataset_id: &str) -> Result<Vec<AccessEntry>> {
        let dataset = self
            .client
            .get_dataset()
            .set_project_id(&self.project_id)
            .set_dataset_id(dataset_id)
            .send()
            .await
            .map_err(|e| {
                Error::metadata(
                    format!("dataset {dataset_id} in project {}", self.project_id),
                    e,
                )
            })?;
        Ok(dataset.access.iter().filter_map(access_entry).collect())
    }
}

/// Builds the access register of all the datasets in `project_id`.
#[tracing::instrument(level = "info", skip(client))]
pub async fn scan_project(client: &DatasetService, project_id: &str) -> Result<Audit> {
    let mut source = project_source(client.clone(), project_id.to_string());
    build_register(&mut source).await
}

/// The dataset id of a listing entry.
///
/// Prefers the dataset reference, and falls back to the `project:dataset`
/// form of the listing id.
fn dataset_id(dataset: &ListFormatDataset) -> Option<String> {
    dataset
        .dataset_reference
        .as_ref()
        .map(|r| r.dataset_id.clone())
        .filter(|id| !id.is_empty())
        .or_else(|| {
            dataset
                .id
                .rsplit_once(':')
                .map(|(_, id)| id.to_string())
                .filter(|id| !id.is_empty())
        })
}

/// Classifies an access entry by the identity field that is set.
///
/// Returns `None` if no identity is set.
fn access_entry(access: &Access) -> Option<AccessEntry> {
    let (principal, entity_type) = if !access.user_by_email.is_empty() {
        (access.user_by_email.clone(), EntityType::UserEmail)
    } else if !access.group_by_email.is_empty() {
        (access.group_by_email.clone(), EntityType::GroupEmail)
    } else if !access.special_group.is_empty() {
        (access.special_group.clone(), EntityType::SpecialGroup)
    } else if !access.domain.is_empty() {
        (access.domain.clone(), EntityType::Domain)
    } else if !access.iam_member.is_empty() {
        (access.iam_member.clone(), EntityType::IamMember)
    } else if let Some(v) = &access.view {
        let name = format!("{}.{}.{}", v.project_id, v.dataset_id, v.table_id);
        (name, EntityType::View)
    } else if let Some(r) = &access.routine {
        let name = format!("{}.{}.{}", r.project_id, r.dataset_id, r.routine_id);
        (name, EntityType::Routine)
    } else if let Some(d) = access.dataset.as_ref().and_then(|d| d.dataset.as_ref()) {
        let name = format!("{}.{}", d.project_id, d.dataset_id);
        (name, EntityType::Dataset)
    } else {
        tracing::debug!("skipping access entry without an identity: {access:?}");
        return None;
    };
    Some(AccessEntry::new(principal, entity_type, access.role.clone()))
}
