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

//! Condition flags shared by all commands.

use clap::{Args, ValueEnum};
use kvdf_core::TargetPlatform;

/// Platform names accepted by `--target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    Windows,
    Macos,
    Linux,
    X360,
    Other,
}

impl From<Target> for TargetPlatform {
    fn from(target: Target) -> Self {
        match target {
            Target::Windows => TargetPlatform::Windows,
            Target::Macos => TargetPlatform::MacOs,
            Target::Linux => TargetPlatform::Linux,
            Target::X360 => TargetPlatform::Xbox360,
            Target::Other => TargetPlatform::Other,
        }
    }
}

/// How the active condition set is built.
///
/// Defaults for the target platform are applied first, then `--define`,
/// then `--undefine`.
#[derive(Debug, Clone, Default, Args)]
pub struct ConditionArgs {
    /// Activate a condition (repeatable), e.g. `-D DEBUG`
    #[arg(short = 'D', long = "define", value_name = "NAME")]
    pub define: Vec<String>,

    /// Deactivate a condition (repeatable), e.g. `-U WIN32`
    #[arg(short = 'U', long = "undefine", value_name = "NAME")]
    pub undefine: Vec<String>,

    /// Start from an empty condition set
    #[arg(long)]
    pub no_default_conditions: bool,

    /// Platform to take default conditions from (defaults to the host)
    #[arg(long, value_enum, value_name = "PLATFORM")]
    pub target: Option<Target>,
}

impl ConditionArgs {
    pub fn target_platform(&self) -> TargetPlatform {
        self.target
            .map(TargetPlatform::from)
            .unwrap_or_else(TargetPlatform::host)
    }
}
