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

//! Errors returned while building an access register.

use crate::principal::PrincipalType;

/// The result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Represents the fatal conditions of an access scan.
///
/// Unrecognized roles and entity kinds are not errors, the scan skips them.
/// Any of the conditions below aborts the whole scan, and no partial
/// register is returned.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The same principal was observed with two different principal types.
    ///
    /// # Troubleshooting
    ///
    /// This indicates an inconsistent metadata feed. The same identity
    /// appears, for example, as a user email in one dataset and as a group
    /// email in another.
    #[error("principal type mismatch for {principal}: recorded {recorded}, observed {observed}")]
    PrincipalTypeConflict {
        principal: String,
        recorded: PrincipalType,
        observed: PrincipalType,
    },

    /// The dataset enumeration or a per-dataset metadata fetch failed.
    #[error("cannot fetch {context}")]
    Metadata {
        context: String,
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Creates a [Error::Metadata] wrapping `source`.
    pub fn metadata<C, E>(context: C, source: E) -> Self
    where
        C: Into<String>,
        E: Into<BoxError>,
    {
        Self::Metadata {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Returns true if the error is a principal type conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::PrincipalTypeConflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_message() {
        let err = Error::PrincipalTypeConflict {
            principal: "p".to_string(),
            recorded: PrincipalType::User,
            observed: PrincipalType::Group,
        };
        assert!(err.is_conflict(), "{err:?}");
        let msg = err.to_string();
        assert!(msg.contains("p"), "{msg}");
        assert!(msg.contains("User"), "{msg}");
        assert!(msg.contains("Group"), "{msg}");
    }

    #[test]
    fn metadata_source() {
        use std::error::Error as _;
        let err = Error::metadata("datasets for project p", "connection reset");
        assert!(!err.is_conflict(), "{err:?}");
        assert_eq!(err.to_string(), "cannot fetch datasets for project p");
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("connection reset"));
    }
}
