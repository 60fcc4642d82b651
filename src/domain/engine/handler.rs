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

use crate::domain::config::ProviderConfig;
use crate::domain::engine::jsonpath::JsonPath;
use crate::domain::engine::manifest::{prepare_record, render_manifest};
use crate::domain::engine::wait::{poll_until, PollSettings, Probe};
use crate::domain::resource::{ResourceDescriptor, ResourceId, ResourceRecord, WaitCondition};
use crate::infrastructure::kubernetes::client::{ApplyParams, CustomResourceClient, DynamicResourceClient};
use crate::shared::error::{ProviderError, Result};
use serde_json::Value;
use tracing::{debug, info};

/// Drives the lifecycle of any custom resource described by a
/// [`ResourceDescriptor`]: apply, read, delete, import and the wait loops.
///
/// Every call is independent. The engine holds no per-resource state, only
/// the cluster client and the provider settings it was built with.
pub struct ResourceEngine {
    client: Box<dyn CustomResourceClient>,
    config: ProviderConfig,
}

impl ResourceEngine {
    pub fn new(client: Box<dyn CustomResourceClient>, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    /// Build an engine talking to the cluster selected by the configured
    /// kubeconfig and context. With neither set, in-cluster credentials are
    /// accepted too.
    pub async fn connect(config: ProviderConfig) -> Result<Self> {
        config.validate()?;
        let client = match (&config.kubeconfig, &config.context) {
            (None, None) => DynamicResourceClient::new().await?,
            (kubeconfig, context) => {
                DynamicResourceClient::new_with_config(kubeconfig.clone(), context.clone()).await?
            }
        };
        Ok(Self::new(Box::new(client), config))
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Field manager and force flag for one apply; record settings win over
    /// provider settings.
    pub fn apply_params(&self, record: &ResourceRecord) -> ApplyParams {
        ApplyParams {
            field_manager: record
                .field_manager
                .clone()
                .unwrap_or_else(|| self.config.field_manager.clone()),
            force: record.force_conflicts.unwrap_or(self.config.force_conflicts),
        }
    }

    /// See [`prepare_record`].
    pub fn prepare(&self, descriptor: &ResourceDescriptor, record: &ResourceRecord) -> Result<ResourceRecord> {
        prepare_record(&self.config, descriptor, record)
    }

    pub fn render_manifest(&self, descriptor: &ResourceDescriptor, record: &ResourceRecord) -> Result<Value> {
        render_manifest(&self.config, descriptor, record)
    }

    pub async fn create(&self, descriptor: &ResourceDescriptor, planned: &ResourceRecord) -> Result<ResourceRecord> {
        let prepared = self.prepare(descriptor, planned)?;
        let applied = self.apply(descriptor, prepared).await?;
        info!(kind = %descriptor.kind, id = applied.id.as_deref().unwrap_or_default(), "created");
        Ok(applied)
    }

    /// Apply a changed record. Namespace and name are fixed at creation.
    pub async fn update(
        &self,
        descriptor: &ResourceDescriptor,
        prior: &ResourceRecord,
        planned: &ResourceRecord,
    ) -> Result<ResourceRecord> {
        let prepared = self.prepare(descriptor, planned)?;
        let before = prior.identity();
        let after = prepared.identity();

        if before.namespace != after.namespace {
            return Err(ProviderError::RequiresReplacement {
                field: "metadata.namespace".to_string(),
            });
        }
        if before.name != after.name {
            return Err(ProviderError::RequiresReplacement {
                field: "metadata.name".to_string(),
            });
        }

        let applied = self.apply(descriptor, prepared).await?;
        info!(kind = %descriptor.kind, id = applied.id.as_deref().unwrap_or_default(), "updated");
        Ok(applied)
    }

    async fn apply(&self, descriptor: &ResourceDescriptor, mut record: ResourceRecord) -> Result<ResourceRecord> {
        let identity = record.identity();
        let params = self.apply_params(&record);
        let object = record.to_wire(descriptor);

        let applied = self
            .client
            .apply(
                &descriptor.api_resource(),
                &identity.namespace,
                &identity.name,
                &object,
                &params,
            )
            .await?;
        record.refresh_from_wire(descriptor, &applied)?;

        if let Some(wait) = record.wait_for_upsert.clone() {
            let settings = PollSettings::new(wait.timeout()?, wait.poll_interval()?);
            let ready = self
                .wait_for_conditions(descriptor, &identity, &wait.conditions, settings)
                .await?;
            record.refresh_from_wire(descriptor, &ready)?;
        }
        Ok(record)
    }

    /// Refresh a known record from the cluster. `None` means the object is
    /// gone and the record should be forgotten.
    pub async fn read(&self, descriptor: &ResourceDescriptor, prior: &ResourceRecord) -> Result<Option<ResourceRecord>> {
        let identity = self.resolve_identity(prior);
        let object = match self
            .client
            .get(&descriptor.api_resource(), &identity.namespace, &identity.name)
            .await
        {
            Ok(object) => object,
            Err(e) if e.is_not_found() => {
                debug!(kind = %descriptor.kind, id = %identity, "object no longer exists");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let mut record = prior.clone();
        record.refresh_from_wire(descriptor, &object)?;
        Ok(Some(record))
    }

    /// Record identity with an empty namespace replaced by the provider default.
    fn resolve_identity(&self, record: &ResourceRecord) -> ResourceId {
        let mut identity = record.identity();
        if identity.namespace.is_empty() {
            identity.namespace = self.config.default_namespace.clone();
        }
        identity
    }

    /// Look up an object that must exist.
    pub async fn read_data_source(
        &self,
        descriptor: &ResourceDescriptor,
        namespace: &str,
        name: &str,
    ) -> Result<ResourceRecord> {
        let identity = ResourceId::new(namespace, name);
        identity.validate()?;

        let object = self
            .client
            .get(&descriptor.api_resource(), &identity.namespace, &identity.name)
            .await?;
        let mut record = ResourceRecord::new(descriptor.type_name(), namespace, name);
        record.refresh_from_wire(descriptor, &object)?;
        Ok(record)
    }

    /// Adopt an existing object from its `<namespace>/<name>` identifier.
    pub async fn import(&self, descriptor: &ResourceDescriptor, import_id: &str) -> Result<ResourceRecord> {
        let identity = ResourceId::parse_import_id(import_id)?;
        let prior = ResourceRecord::new(descriptor.type_name(), &identity.namespace, &identity.name);

        match self.read(descriptor, &prior).await? {
            Some(record) => {
                info!(kind = %descriptor.kind, id = %identity, "imported");
                Ok(record)
            }
            None => Err(ProviderError::not_found(
                &descriptor.kind,
                &identity.name,
                &identity.namespace,
            )),
        }
    }

    /// Delete the object; an object that is already gone counts as deleted.
    /// Waits for removal when the record asks for it, or when the provider
    /// has a non-zero delete timeout.
    pub async fn delete(&self, descriptor: &ResourceDescriptor, record: &ResourceRecord) -> Result<()> {
        let identity = self.resolve_identity(record);

        let settings = match &record.wait_for_delete {
            Some(wait) => Some(PollSettings::new(wait.timeout()?, wait.poll_interval()?)),
            None => {
                let timeout = self.config.delete_timeout()?;
                if timeout.is_zero() {
                    None
                } else {
                    Some(PollSettings::new(timeout, self.config.poll_interval()?))
                }
            }
        };

        match self
            .client
            .delete(&descriptor.api_resource(), &identity.namespace, &identity.name)
            .await
        {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                debug!(kind = %descriptor.kind, id = %identity, "already deleted");
                return Ok(());
            }
            Err(e) => return Err(e),
        }

        if let Some(settings) = settings {
            self.wait_for_deletion(descriptor, &identity, settings).await?;
        }
        info!(kind = %descriptor.kind, id = %identity, "deleted");
        Ok(())
    }

    /// Poll until GET reports the object as not found.
    pub async fn wait_for_deletion(
        &self,
        descriptor: &ResourceDescriptor,
        identity: &ResourceId,
        settings: PollSettings,
    ) -> Result<()> {
        let client = self.client.as_ref();
        let resource = descriptor.api_resource();
        let resource = &resource;
        let what = format!("deletion of {} {}", descriptor.kind, identity);

        poll_until(&what, settings, || async move {
            match client.get(resource, &identity.namespace, &identity.name).await {
                Ok(_) => Ok(Probe::Pending("object still exists".to_string())),
                Err(e) if e.is_not_found() => Ok(Probe::Done(())),
                Err(e) => Err(e),
            }
        })
        .await
    }

    /// Poll until every condition's JSONPath renders to its expected value
    /// and return the object that satisfied them. A missing object counts as
    /// not ready yet.
    pub async fn wait_for_conditions(
        &self,
        descriptor: &ResourceDescriptor,
        identity: &ResourceId,
        conditions: &[WaitCondition],
        settings: PollSettings,
    ) -> Result<Value> {
        let compiled = conditions
            .iter()
            .map(|c| JsonPath::parse(&c.jsonpath).map(|path| (path, c.value.as_str())))
            .collect::<Result<Vec<_>>>()?;
        let compiled = &compiled;

        let client = self.client.as_ref();
        let resource = descriptor.api_resource();
        let resource = &resource;
        let what = format!("conditions on {} {}", descriptor.kind, identity);

        poll_until(&what, settings, || async move {
            let object = match client.get(resource, &identity.namespace, &identity.name).await {
                Ok(object) => object,
                Err(e) if e.is_not_found() => {
                    return Ok(Probe::Pending("object does not exist yet".to_string()))
                }
                Err(e) => return Err(e),
            };

            let unmet: Vec<String> = compiled
                .iter()
                .filter_map(|(path, expected)| {
                    let actual = path.find_string(&object);
                    if actual.as_deref() == Some(*expected) {
                        None
                    } else {
                        Some(format!(
                            "{} is {:?}, want {:?}",
                            path.expression(),
                            actual.unwrap_or_default(),
                            expected
                        ))
                    }
                })
                .collect();

            if unmet.is_empty() {
                Ok(Probe::Done(object))
            } else {
                Ok(Probe::Pending(unmet.join("; ")))
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resource::{catalog, WaitForUpsert};
    use kube::discovery::ApiResource;
    use serde_json::json;

    /// A client for code paths that must not reach the cluster.
    struct OfflineClient;

    #[async_trait::async_trait]
    impl CustomResourceClient for OfflineClient {
        async fn apply(
            &self,
            _: &ApiResource,
            _: &str,
            _: &str,
            _: &Value,
            _: &ApplyParams,
        ) -> Result<Value> {
            Err(ProviderError::config_error("offline"))
        }

        async fn get(&self, _: &ApiResource, _: &str, _: &str) -> Result<Value> {
            Err(ProviderError::config_error("offline"))
        }

        async fn delete(&self, _: &ApiResource, _: &str, _: &str) -> Result<()> {
            Err(ProviderError::config_error("offline"))
        }
    }

    fn engine() -> ResourceEngine {
        ResourceEngine::new(Box::new(OfflineClient), ProviderConfig::default())
    }

    fn topic() -> ResourceRecord {
        ResourceRecord::new("hazelcast_com_topic_v1alpha1", "", "events")
            .with_spec(json!({"hazelcast_resource_name": "hazelcast"}))
    }

    #[test]
    fn test_apply_params_prefer_record_settings() {
        let engine = engine();
        let mut record = topic();
        assert_eq!(
            engine.apply_params(&record),
            ApplyParams {
                field_manager: "hazelcast-kube".to_string(),
                force: false
            }
        );

        record.field_manager = Some("ci".to_string());
        record.force_conflicts = Some(true);
        assert_eq!(
            engine.apply_params(&record),
            ApplyParams {
                field_manager: "ci".to_string(),
                force: true
            }
        );
    }

    #[test]
    fn test_prepare_fills_namespace_and_defaults() {
        let descriptor = catalog().get("Topic").unwrap();
        let prepared = engine().prepare(descriptor, &topic()).unwrap();
        assert_eq!(prepared.metadata.namespace, "default");
        assert_eq!(prepared.spec.get("global_ordering_enabled"), Some(&json!(false)));
    }

    #[test]
    fn test_prepare_rejects_mismatched_type() {
        let descriptor = catalog().get("Queue").unwrap();
        let err = engine().prepare(descriptor, &topic()).unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)));
    }

    #[test]
    fn test_prepare_rejects_bad_wait_expression() {
        let descriptor = catalog().get("Topic").unwrap();
        let mut record = topic();
        record.wait_for_upsert = Some(WaitForUpsert {
            conditions: vec![WaitCondition {
                jsonpath: "{.status..state}".to_string(),
                value: "Success".to_string(),
            }],
            timeout: "10s".to_string(),
            poll_interval: "1s".to_string(),
        });
        let err = engine().prepare(descriptor, &record).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidJsonPath { .. }));
    }

    #[tokio::test]
    async fn test_import_rejects_malformed_id_before_calling_cluster() {
        let descriptor = catalog().get("Topic").unwrap();
        let err = engine().import(descriptor, "events").await.unwrap_err();
        assert!(matches!(err, ProviderError::MalformedImportId(_)));
    }

    #[tokio::test]
    async fn test_connect_reports_unreadable_kubeconfig() {
        let config = ProviderConfig {
            kubeconfig: Some("/nonexistent/kubeconfig".to_string()),
            ..Default::default()
        };
        let err = match ResourceEngine::connect(config).await {
            Ok(_) => panic!("connected without a kubeconfig"),
            Err(e) => e,
        };
        assert!(matches!(err, ProviderError::Config(ref msg) if msg.contains("kubeconfig")));
    }

    #[tokio::test]
    async fn test_connect_validates_config_first() {
        let config = ProviderConfig {
            poll_interval: "0s".to_string(),
            ..Default::default()
        };
        let err = match ResourceEngine::connect(config).await {
            Ok(_) => panic!("connected with an invalid config"),
            Err(e) => e,
        };
        assert!(err.to_string().contains("poll_interval must be > 0"));
    }
}
