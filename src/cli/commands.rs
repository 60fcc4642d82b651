// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// CLI command definitions

use super::resource::{
    ApplyCommand, DeleteCommand, GetCommand, ImportCommand, ListCommand, ManifestCommand,
    SchemaCommand, TypesCommand,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "hazelcast-kube",
    version,
    about = "Declarative management of Hazelcast operator resources",
    long_about = "Apply, read, import and delete hazelcast.com custom resources on Kubernetes using server-side apply"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// List the resource types this tool manages
    Types(TypesCommand),

    /// Show the attribute schema of a resource type
    Schema(SchemaCommand),

    /// Render the Kubernetes object for a record file without contacting the cluster
    Manifest(ManifestCommand),

    /// Create or update a resource from a record file (server-side apply)
    Apply(ApplyCommand),

    /// Read a single resource
    Get(GetCommand),

    /// Read several resources of one type
    List(ListCommand),

    /// Adopt an existing resource by its <namespace>/<name> identifier
    Import(ImportCommand),

    /// Delete a resource, optionally waiting until it is gone
    Delete(DeleteCommand),
}
