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

//! Folds dataset access facts into an [AccessRegister].

use crate::permission::role_to_permission;
use crate::principal::{PrincipalType, entity_type_to_principal_type};
use crate::register::AccessRegister;
use crate::source::DatasetSource;
use crate::{Error, Result};
use std::collections::BTreeMap;

/// Accumulates facts into an [AccessRegister].
///
/// The builder remembers the type of every principal it has seen. Recording
/// a principal with a different type fails, and leaves the register as it
/// was before the call.
///
/// # Example
/// ```
/// # use access_audit::builder::AccessRegisterBuilder;
/// # use access_audit::principal::PrincipalType;
/// let mut builder = AccessRegisterBuilder::new();
/// builder.record_fact("alice@x", PrincipalType::User, "sales", "READER")?;
/// builder.record_fact("alice@x", PrincipalType::User, "sales", "WRITER")?;
/// let audit = builder.build();
/// assert_eq!(audit.register().to_string(), "alice@x\tsales\trwx\n\n");
/// # access_audit::Result::<()>::Ok(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct AccessRegisterBuilder {
    principals: BTreeMap<String, PrincipalType>,
    register: AccessRegister,
}

impl AccessRegisterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `principal` holds `role` on `resource`.
    ///
    /// Facts with an unrecognized role are skipped. The principal type is
    /// still checked, and recorded, for those facts.
    pub fn record_fact(
        &mut self,
        principal: &str,
        principal_type: PrincipalType,
        resource: &str,
        role: &str,
    ) -> Result<()> {
        self.check_principal_type(principal, principal_type)?;
        let Some(permission) = role_to_permission(role) else {
            tracing::debug!("skipping {principal} on {resource}: unrecognized role {role:?}");
            return Ok(());
        };
        self.register.grant(principal, resource, permission);
        Ok(())
    }

    fn check_principal_type(&mut self, principal: &str, observed: PrincipalType) -> Result<()> {
        match self.principals.get(principal) {
            Some(&recorded) if recorded != observed => Err(Error::PrincipalTypeConflict {
                principal: principal.to_string(),
                recorded,
                observed,
            }),
            Some(_) => Ok(()),
            None => {
                self.principals.insert(principal.to_string(), observed);
                Ok(())
            }
        }
    }

    /// The register built so far.
    pub fn register(&self) -> &AccessRegister {
        &self.register
    }

    /// Finishes the build.
    pub fn build(self) -> Audit {
        Audit {
            principals: self.principals,
            register: self.register,
        }
    }
}

/// A completed access register and the type of each principal seen while
/// building it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Audit {
    principals: BTreeMap<String, PrincipalType>,
    register: AccessRegister,
}

impl Audit {
    pub fn register(&self) -> &AccessRegister {
        &self.register
    }

    pub fn into_register(self) -> AccessRegister {
        self.register
    }

    /// The type recorded for `principal`.
    pub fn principal_type(&self, principal: &str) -> Option<PrincipalType> {
        self.principals.get(principal).copied()
    }

    /// The principals that a group-membership service could expand.
    pub fn expandable_principals(&self) -> impl Iterator<Item = (&str, PrincipalType)> {
        self.principals
            .iter()
            .filter(|(_, t)| t.is_expandable())
            .map(|(p, t)| (p.as_str(), *t))
    }
}

/// Builds the access register for all the datasets in `source`.
///
/// Datasets and their entries are processed in the order the source yields
/// them. Entries whose entity kind does not name a principal are skipped.
/// The first metadata error or principal type conflict aborts the build.
pub async fn build_register<S>(source: &mut S) -> Result<Audit>
where
    S: DatasetSource + ?Sized,
{
    let mut builder = AccessRegisterBuilder::new();
    let mut datasets = 0_usize;
    while let Some(dataset) = source.next_dataset().await? {
        datasets += 1;
        let entries = source.access_entries(&dataset).await?;
        tracing::debug!("dataset {dataset} has {} access entries", entries.len());
        for entry in entries {
            let Some(principal_type) = entity_type_to_principal_type(entry.entity_type) else {
                tracing::debug!(
                    "skipping {:?} entry {} on {dataset}",
                    entry.entity_type,
                    entry.principal
                );
                continue;
            };
            builder.record_fact(&entry.principal, principal_type, &dataset, &entry.role)?;
        }
    }
    let audit = builder.build();
    for (principal, principal_type) in audit.expandable_principals() {
        tracing::debug!("{principal} is a {principal_type}, reporting it without expansion");
    }
    tracing::info!(
        "scanned {datasets} datasets, found {} principals",
        audit.register().len()
    );
    Ok(audit)
}

/// Returns the union of two audits, for example of different projects.
///
/// Permissions for the same principal and resource are combined with a
/// bitwise OR. Fails if a principal has a different type in each audit.
pub fn merge_registers(a: &Audit, b: &Audit) -> Result<Audit> {
    let mut principals = a.principals.clone();
    for (principal, &observed) in &b.principals {
        match principals.get(principal) {
            Some(&recorded) if recorded != observed => {
                return Err(Error::PrincipalTypeConflict {
                    principal: principal.clone(),
                    recorded,
                    observed,
                });
            }
            Some(_) => {}
            None => {
                principals.insert(principal.clone(), observed);
            }
        }
    }
    Ok(Audit {
        principals,
        register: a.register.merge(&b.register),
    })
}
