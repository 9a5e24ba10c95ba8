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

//! The per-principal access register and its textual report.

use crate::permission::Permission;
use std::collections::BTreeMap;
use std::fmt;

/// The permission a principal holds on one resource.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceAccess {
    /// The dataset identifier, unique within the project.
    pub resource: String,
    pub permission: Permission,
}

impl ResourceAccess {
    pub fn new<T: Into<String>>(resource: T, permission: Permission) -> Self {
        Self {
            resource: resource.into(),
            permission,
        }
    }
}

/// Maps each principal to the resources it can access.
///
/// A principal holds at most one entry per resource. Granting more access on
/// a resource widens the existing entry, it never adds a second one and it
/// never removes bits.
///
/// Entries keep the order in which their resources were first granted.
/// Equality ignores that order: two registers are equal when they grant the
/// same permissions to the same principals.
#[derive(Clone, Debug, Default)]
pub struct AccessRegister {
    principals: BTreeMap<String, Vec<ResourceAccess>>,
}

impl AccessRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Widens the permission of `principal` on `resource`.
    pub(crate) fn grant(&mut self, principal: &str, resource: &str, permission: Permission) {
        let entries = self.principals.entry(principal.to_string()).or_default();
        match entries.iter_mut().find(|e| e.resource == resource) {
            Some(existing) => existing.permission |= permission,
            None => entries.push(ResourceAccess::new(resource, permission)),
        }
    }

    /// Returns the entries for `principal`, in first-grant order.
    pub fn get(&self, principal: &str) -> Option<&[ResourceAccess]> {
        self.principals.get(principal).map(Vec::as_slice)
    }

    /// Returns the accumulated permission of `principal` on `resource`.
    pub fn permission(&self, principal: &str, resource: &str) -> Option<Permission> {
        self.get(principal)?
            .iter()
            .find(|e| e.resource == resource)
            .map(|e| e.permission)
    }

    /// Iterates over the principals in ascending lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ResourceAccess])> {
        self.principals
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// The number of principals in the register.
    pub fn len(&self) -> usize {
        self.principals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.principals.is_empty()
    }

    /// Returns the union of `self` and `other`.
    ///
    /// Permissions for the same principal and resource are combined with a
    /// bitwise OR. This does not check principal types, see
    /// [merge_registers][crate::builder::merge_registers] for that.
    pub fn merge(&self, other: &AccessRegister) -> AccessRegister {
        let mut merged = self.clone();
        for (principal, entries) in other.iter() {
            for e in entries {
                merged.grant(principal, &e.resource, e.permission);
            }
        }
        merged
    }
}

impl PartialEq for AccessRegister {
    fn eq(&self, other: &Self) -> bool {
        if self.principals.len() != other.principals.len() {
            return false;
        }
        self.iter().all(|(principal, entries)| {
            other.get(principal).is_some_and(|theirs| {
                theirs.len() == entries.len()
                    && entries
                        .iter()
                        .all(|e| other.permission(principal, &e.resource) == Some(e.permission))
            })
        })
    }
}

impl Eq for AccessRegister {}

/// Formats the register as the audit report.
///
/// Each entry is a `principal<TAB>resource<TAB>rwx` line. A blank line
/// follows each principal's block.
impl fmt::Display for AccessRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (principal, entries) in self.iter() {
            for e in entries {
                writeln!(f, "{principal}\t{}\t{}", e.resource, e.permission)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn grant_appends_new_resources() {
        let mut register = AccessRegister::new();
        register.grant("g@x", "a", Permission::all());
        register.grant("g@x", "b", Permission::READ);
        let got = register.get("g@x").map(<[_]>::to_vec);
        let want = vec![
            ResourceAccess::new("a", Permission::all()),
            ResourceAccess::new("b", Permission::READ),
        ];
        assert_eq!(got, Some(want));
    }

    #[test]
    fn grant_widens_existing_resource() {
        let mut register = AccessRegister::new();
        register.grant("p", "sales", Permission::READ);
        register.grant("p", "sales", Permission::WRITE);
        register.grant("p", "sales", Permission::READ);
        assert_eq!(register.get("p").map(<[_]>::len), Some(1));
        assert_eq!(
            register.permission("p", "sales"),
            Some(Permission::READ | Permission::WRITE)
        );
    }

    #[test]
    fn lookups() {
        let mut register = AccessRegister::new();
        assert!(register.is_empty());
        register.grant("p", "sales", Permission::READ);
        assert_eq!(register.len(), 1);
        assert_eq!(register.permission("p", "hr"), None);
        assert_eq!(register.permission("q", "sales"), None);
        assert!(register.get("q").is_none());
    }

    #[test]
    fn equality_ignores_order() {
        let mut a = AccessRegister::new();
        a.grant("p", "x", Permission::READ);
        a.grant("p", "y", Permission::all());
        let mut b = AccessRegister::new();
        b.grant("p", "y", Permission::all());
        b.grant("p", "x", Permission::READ);
        assert_eq!(a, b);

        b.grant("p", "x", Permission::WRITE);
        assert_ne!(a, b);
        b = a.clone();
        b.grant("q", "x", Permission::READ);
        assert_ne!(a, b);
    }

    #[test]
    fn merge() {
        let mut a = AccessRegister::new();
        a.grant("p", "x", Permission::READ);
        a.grant("q", "x", Permission::READ);
        let mut b = AccessRegister::new();
        b.grant("p", "x", Permission::WRITE);
        b.grant("p", "y", Permission::READ);

        let got = a.merge(&b);
        assert_eq!(
            got.permission("p", "x"),
            Some(Permission::READ | Permission::WRITE)
        );
        assert_eq!(got.permission("p", "y"), Some(Permission::READ));
        assert_eq!(got.permission("q", "x"), Some(Permission::READ));
        assert_eq!(got, b.merge(&a));
        assert_eq!(a.merge(&a), a);
        assert_eq!(a.merge(&AccessRegister::new()), a);
    }

    #[test]
    fn report() {
        let mut register = AccessRegister::new();
        register.grant("g@x", "a", Permission::all());
        register.grant("alice@x", "sales", Permission::READ);
        register.grant("g@x", "b", Permission::READ);
        let want = concat!(
            "alice@x\tsales\tr--\n",
            "\n",
            "g@x\ta\trwx\n",
            "g@x\tb\tr--\n",
            "\n",
        );
        assert_eq!(register.to_string(), want);
        assert_eq!(AccessRegister::new().to_string(), "");
    }
}
