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

/// Hazelcast operator API group and version
pub const HAZELCAST_GROUP: &str = "hazelcast.com";
pub const HAZELCAST_VERSION: &str = "v1alpha1";

/// Server-side apply defaults
pub const DEFAULT_FIELD_MANAGER: &str = "hazelcast-kube";
pub const DEFAULT_FORCE_CONFLICTS: bool = false;

/// Namespace used when neither the record nor the config names one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Wait loop settings
pub const DEFAULT_POLL_INTERVAL: &str = "5s";
pub const DEFAULT_DELETE_TIMEOUT: &str = "0s";
pub const DEFAULT_UPSERT_TIMEOUT: &str = "30s";
pub const NEGATIVE_TIMEOUT_CAP_SECS: u64 = 7 * 24 * 60 * 60;

/// Separator of the composite identifier and the import identifier
pub const ID_SEPARATOR: char = '/';

/// Kubernetes name limits
pub const MAX_NAME_LENGTH: usize = 253;
pub const MAX_NAMESPACE_LENGTH: usize = 63;

/// Provider config file lookup
pub const CONFIG_FILE_ENV: &str = "HAZELCAST_KUBE_CONFIG";
