// Dweve KVDF - Valve KeyValues Data Format
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Condition sets and default platform conditions.
//!
//! A [`ConditionSet`] holds the names that `$NAME` atoms in conditional
//! attributes test against. Sessions start with the conditions returned by
//! [`default_conditions`] for the target they run on; the legacy format uses
//! the same names the Source engine defines for its build platforms.
//!
//! ```
//! use kvdf_core::{default_conditions, TargetPlatform};
//!
//! let linux = default_conditions(TargetPlatform::Linux);
//! assert!(linux.contains("POSIX"));
//! assert!(linux.contains("LINUX"));
//! assert!(!linux.contains("WINDOWS"));
//! ```

use std::collections::BTreeSet;
use std::fmt;

/// A set of distinct, case-sensitive condition names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionSet {
    names: BTreeSet<String>,
}

impl ConditionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name`. Adding a name twice has no further effect.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Removes `name`, returning whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for ConditionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

/// The platform a session seeds its default conditions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPlatform {
    Windows,
    MacOs,
    Linux,
    /// Xbox 360 console builds.
    Xbox360,
    /// Any platform without conventional condition names.
    Other,
}

impl TargetPlatform {
    /// The platform this process is running on.
    pub fn host() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Maps an `std::env::consts::OS` style name to a platform.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            "linux" => Self::Linux,
            "xbox360" => Self::Xbox360,
            _ => Self::Other,
        }
    }
}

impl Default for TargetPlatform {
    fn default() -> Self {
        Self::host()
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
            Self::Xbox360 => "xbox360",
            Self::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// Condition names a session starts with on `target`.
///
/// Desktop POSIX platforms also get `WIN32`, which the legacy format treats
/// as "any PC build" rather than "Windows".
pub fn default_conditions(target: TargetPlatform) -> ConditionSet {
    let names: &[&str] = match target {
        TargetPlatform::Xbox360 => &["X360"],
        TargetPlatform::Windows => &["WIN32", "WINDOWS"],
        TargetPlatform::MacOs => &["WIN32", "POSIX", "OSX"],
        TargetPlatform::Linux => &["WIN32", "POSIX", "LINUX"],
        TargetPlatform::Other => &[],
    };
    names.iter().copied().collect()
}
