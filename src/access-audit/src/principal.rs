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

//! Principal kinds, generalized away from the warehouse vocabulary.

use std::fmt;

/// The kinds of entity that can appear in a dataset access entry.
///
/// Only some kinds identify a principal, see
/// [entity_type_to_principal_type].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum EntityType {
    UserEmail,
    GroupEmail,
    SpecialGroup,
    Domain,
    IamMember,
    View,
    Routine,
    Dataset,
}

/// The generalized type of a principal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrincipalType {
    User,
    Group,
    SpecialGroup,
}

impl PrincipalType {
    /// Returns true if a group-membership service could expand this
    /// principal into its members. Only users are atomic.
    pub fn is_expandable(self) -> bool {
        self != Self::User
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Group => "Group",
            Self::SpecialGroup => "SpecialGroup",
        }
    }
}

impl fmt::Display for PrincipalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps a warehouse entity kind to a [PrincipalType].
///
/// Returns `None` for kinds that do not name a principal, such as
/// authorized views or domain-wide grants. Callers skip those entries.
pub fn entity_type_to_principal_type(entity_type: EntityType) -> Option<PrincipalType> {
    match entity_type {
        EntityType::UserEmail => Some(PrincipalType::User),
        EntityType::GroupEmail => Some(PrincipalType::Group),
        EntityType::SpecialGroup => Some(PrincipalType::SpecialGroup),
        EntityType::Domain
        | EntityType::IamMember
        | EntityType::View
        | EntityType::Routine
        | EntityType::Dataset => None,
    }
}

/// Returns true if `principal_type` is expandable into member principals.
pub fn is_expandable(principal_type: PrincipalType) -> bool {
    principal_type.is_expandable()
}
