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

//! Audits who can access the datasets of a BigQuery project.
//!
//! The audit converts the access list of every dataset into an
//! [AccessRegister][register::AccessRegister]: for each principal, the
//! datasets it can access and the generalized `rwx` permission it holds on
//! each of them.
//!
//! Warehouse roles map to [Permission][permission::Permission] bits, and
//! warehouse entity kinds map to a [PrincipalType][principal::PrincipalType].
//! Grants for the same principal and dataset are combined, the permission
//! only ever widens. A principal seen with two different types aborts the
//! scan.
//!
//! # Example
//! ```
//! # use access_audit::builder::AccessRegisterBuilder;
//! # use access_audit::principal::PrincipalType;
//! let mut builder = AccessRegisterBuilder::new();
//! builder.record_fact("g@x", PrincipalType::Group, "a", "OWNER")?;
//! builder.record_fact("g@x", PrincipalType::Group, "b", "READER")?;
//! print!("{}", builder.build().register());
//! # access_audit::Result::<()>::Ok(())
//! ```

pub mod bigquery;
pub mod builder;
pub mod error;
pub mod permission;
pub mod principal;
pub mod register;
pub mod source;

pub use error::{Error, Result};
