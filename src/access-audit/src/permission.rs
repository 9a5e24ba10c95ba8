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

//! Generalized permissions and the mapping from warehouse roles.
//!
//! Permissions use a Unix-style `rwx` scheme. The bits granted to a
//! principal on a resource only ever widen during a scan.

use std::fmt;
use std::str::FromStr;

bitflags::bitflags! {
    /// The access a principal has on a resource.
    ///
    /// # Example
    /// ```
    /// # use access_audit::permission::Permission;
    /// let p = Permission::READ | Permission::WRITE;
    /// assert_eq!(p.to_string(), "rw-");
    /// ```
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Permission: u8 {
        const READ    = 0b001;
        const WRITE   = 0b010;
        /// Execute or administer.
        const EXECUTE = 0b100;
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |bit: Permission, c: char| if self.contains(bit) { c } else { '-' };
        write!(
            f,
            "{}{}{}",
            flag(Permission::READ, 'r'),
            flag(Permission::WRITE, 'w'),
            flag(Permission::EXECUTE, 'x')
        )
    }
}

/// The dataset roles understood by the audit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Reader,
    Writer,
    Owner,
}

impl Role {
    /// The generalized permission granted by this role.
    pub fn permission(self) -> Permission {
        match self {
            Self::Reader => Permission::READ,
            Self::Writer | Self::Owner => Permission::all(),
        }
    }
}

/// Returned when a role tag is not one of the known dataset roles.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("unrecognized role {0:?}")]
pub struct UnrecognizedRole(pub String);

impl FromStr for Role {
    type Err = UnrecognizedRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The service may report a basic role through its IAM equivalent.
        match s {
            "READER" | "roles/bigquery.dataViewer" => Ok(Self::Reader),
            "WRITER" | "roles/bigquery.dataEditor" => Ok(Self::Writer),
            "OWNER" | "roles/bigquery.dataOwner" => Ok(Self::Owner),
            _ => Err(UnrecognizedRole(s.to_string())),
        }
    }
}

/// Maps a warehouse role tag to a [Permission].
///
/// Returns `None` for unrecognized roles, callers skip those entries.
pub fn role_to_permission(role: &str) -> Option<Permission> {
    role.parse::<Role>().ok().map(Role::permission)
}
