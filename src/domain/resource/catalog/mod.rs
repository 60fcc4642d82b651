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

//! Descriptors for the custom resources of the Hazelcast platform operator.

mod backup;
mod common;
mod data_structures;
mod jet;
mod platform;
mod user_code;
mod wan;

use crate::domain::resource::descriptor::ResourceDescriptor;
use crate::shared::error::{ProviderError, Result};
use std::sync::OnceLock;

pub struct Catalog {
    descriptors: Vec<ResourceDescriptor>,
}

impl Catalog {
    pub fn new(descriptors: Vec<ResourceDescriptor>) -> Self {
        Self { descriptors }
    }

    pub fn hazelcast() -> Self {
        Self::new(vec![
            platform::hazelcast(),
            platform::management_center(),
            data_structures::map(),
            data_structures::topic(),
            data_structures::queue(),
            data_structures::cache(),
            data_structures::multi_map(),
            data_structures::replicated_map(),
            backup::hot_backup(),
            backup::cron_hot_backup(),
            wan::wan_replication(),
            wan::wan_sync(),
            jet::jet_job(),
            jet::jet_job_snapshot(),
            user_code::user_code_namespace(),
        ])
    }

    /// Look up by type name (`hazelcast_com_map_v1alpha1`) or, failing that,
    /// by kind (`Map`, case-insensitive).
    pub fn get(&self, type_or_kind: &str) -> Result<&ResourceDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.type_name() == type_or_kind)
            .or_else(|| {
                self.descriptors
                    .iter()
                    .find(|d| d.kind.eq_ignore_ascii_case(type_or_kind))
            })
            .ok_or_else(|| ProviderError::UnknownType(type_or_kind.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Process-wide catalog of the Hazelcast descriptors.
pub fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(Catalog::hazelcast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::{Attribute, Presence};
    use std::collections::HashSet;

    #[test]
    fn test_lookup_by_type_name_and_kind() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 15);
        assert_eq!(catalog.get("hazelcast_com_map_v1alpha1").unwrap().kind, "Map");
        assert_eq!(catalog.get("multimap").unwrap().kind, "MultiMap");
        assert!(matches!(
            catalog.get("hazelcast_com_set_v1alpha1"),
            Err(ProviderError::UnknownType(_))
        ));
    }

    #[test]
    fn test_type_names_and_plurals_are_unique() {
        let names: HashSet<_> = catalog().iter().map(|d| d.type_name()).collect();
        let plurals: HashSet<_> = catalog().iter().map(|d| d.plural.clone()).collect();
        assert_eq!(names.len(), catalog().len());
        assert_eq!(plurals.len(), catalog().len());
    }

    fn walk<'a>(attrs: &'a [Attribute], out: &mut Vec<&'a Attribute>) {
        for attr in attrs {
            out.push(attr);
            if let Some(children) = attr.kind.children() {
                walk(children, out);
            }
        }
    }

    #[test]
    fn test_every_schema_is_well_formed() {
        for descriptor in catalog().iter() {
            let mut siblings = HashSet::new();
            for attr in &descriptor.spec {
                assert!(
                    siblings.insert(attr.name.clone()),
                    "{} declares '{}' twice",
                    descriptor.kind,
                    attr.name
                );
            }

            let mut all = Vec::new();
            walk(&descriptor.spec, &mut all);
            for attr in all {
                assert!(!attr.wire.contains('_'), "{}: wire name {}", descriptor.kind, attr.wire);
                if let Some(default) = &attr.default {
                    for validator in &attr.validators {
                        assert!(
                            validator.check(default).is_none(),
                            "{}.{} default violates {}",
                            descriptor.kind,
                            attr.name,
                            validator
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_data_structures_target_a_hazelcast_cluster() {
        for kind in ["Map", "Topic", "Queue", "Cache", "MultiMap", "ReplicatedMap", "HotBackup"] {
            let descriptor = catalog().get(kind).unwrap();
            let attr = descriptor
                .spec
                .iter()
                .find(|a| a.name == "hazelcast_resource_name")
                .unwrap_or_else(|| panic!("{} has no hazelcast_resource_name", kind));
            assert_eq!(attr.presence, Presence::Required);
            assert_eq!(attr.wire, "hazelcastResourceName");
        }
    }

    #[test]
    fn test_server_filled_attributes_have_no_local_default() {
        let mut server_filled = Vec::new();
        for descriptor in catalog().iter() {
            let mut all = Vec::new();
            walk(&descriptor.spec, &mut all);
            for attr in all.into_iter().filter(|a| a.presence == Presence::OptionalComputed) {
                assert!(attr.default.is_none(), "{}.{}", descriptor.kind, attr.name);
                server_filled.push(format!("{}.{}", descriptor.kind, attr.name));
            }
        }
        assert!(server_filled.contains(&"JetJob.name".to_string()));
        assert!(server_filled.contains(&"Hazelcast.version".to_string()));
    }
}
