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

pub mod catalog;
pub mod descriptor;
pub mod identity;
pub mod record;

pub use self::catalog::{catalog, Catalog};
pub use self::descriptor::ResourceDescriptor;
pub use self::identity::{is_valid_k8s_name, is_valid_namespace, ResourceId};
pub use self::record::{
    RecordMetadata, ResourceRecord, WaitCondition, WaitForDelete, WaitForUpsert,
};
