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

use crate::shared::error::{ProviderError, Result};
use kube::api::{Api, DeleteParams, DynamicObject, Patch, PatchParams};
use kube::discovery::ApiResource;
use kube::Client;
use serde_json::Value;
use tracing::debug;

/// Per-call server-side apply settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyParams {
    pub field_manager: String,
    pub force: bool,
}

/// The three verbs the resource engine needs from the cluster.
///
/// Objects cross this boundary as plain JSON so that the engine never depends
/// on a concrete Kubernetes type. `get` and `delete` report a missing object
/// as [`ProviderError::NotFound`].
#[async_trait::async_trait]
pub trait CustomResourceClient: Send + Sync {
    async fn apply(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
        object: &Value,
        params: &ApplyParams,
    ) -> Result<Value>;

    async fn get(&self, resource: &ApiResource, namespace: &str, name: &str) -> Result<Value>;

    async fn delete(&self, resource: &ApiResource, namespace: &str, name: &str) -> Result<()>;
}

pub struct DynamicResourceClient {
    client: Client,
}

impl DynamicResourceClient {
    /// Default client resolution: `KUBECONFIG` or `~/.kube/config`, then the
    /// in-cluster service account.
    pub async fn new() -> Result<Self> {
        let client = Client::try_default().await.map_err(|e| {
            ProviderError::config_error(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self { client })
    }

    pub async fn new_with_config(
        kubeconfig_path: Option<String>,
        context: Option<String>,
    ) -> Result<Self> {
        use kube::config::{KubeConfigOptions, Kubeconfig};

        let kubeconfig = if let Some(path) = kubeconfig_path {
            Kubeconfig::read_from(path).map_err(|e| {
                ProviderError::config_error(format!("Failed to load kubeconfig: {}", e))
            })?
        } else {
            Kubeconfig::read().map_err(|e| {
                ProviderError::config_error(format!("Failed to load kubeconfig: {}", e))
            })?
        };

        let config_options = KubeConfigOptions {
            context,
            cluster: None,
            user: None,
        };

        let config = kube::Config::from_custom_kubeconfig(kubeconfig, &config_options)
            .await
            .map_err(|e| {
                ProviderError::config_error(format!("Failed to create Kubernetes config: {}", e))
            })?;

        let client = Client::try_from(config).map_err(|e| {
            ProviderError::config_error(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self { client })
    }

    fn api(&self, resource: &ApiResource, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, resource)
    }
}

fn classify(
    verb: &'static str,
    resource: &ApiResource,
    namespace: &str,
    name: &str,
    err: kube::Error,
) -> ProviderError {
    match err {
        kube::Error::Api(ae) if ae.code == 404 => {
            ProviderError::not_found(&resource.kind, name, namespace)
        }
        other => ProviderError::api(verb, other),
    }
}

#[async_trait::async_trait]
impl CustomResourceClient for DynamicResourceClient {
    async fn apply(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
        object: &Value,
        params: &ApplyParams,
    ) -> Result<Value> {
        let api = self.api(resource, namespace);
        let mut patch_params = PatchParams::apply(&params.field_manager).validation_strict();
        if params.force {
            patch_params = patch_params.force();
        }

        debug!(
            kind = %resource.kind,
            namespace,
            name,
            field_manager = %params.field_manager,
            force = params.force,
            "server-side apply"
        );

        let applied = api
            .patch(name, &patch_params, &Patch::Apply(object))
            .await
            .map_err(|e| ProviderError::api("apply", e))?;

        serde_json::to_value(&applied).map_err(|e| ProviderError::Decode(e.to_string()))
    }

    async fn get(&self, resource: &ApiResource, namespace: &str, name: &str) -> Result<Value> {
        let api = self.api(resource, namespace);
        let object = api
            .get(name)
            .await
            .map_err(|e| classify("get", resource, namespace, name, e))?;

        serde_json::to_value(&object).map_err(|e| ProviderError::Decode(e.to_string()))
    }

    async fn delete(&self, resource: &ApiResource, namespace: &str, name: &str) -> Result<()> {
        let api = self.api(resource, namespace);
        debug!(kind = %resource.kind, namespace, name, "delete");

        api.delete(name, &DeleteParams::default())
            .await
            .map_err(|e| classify("delete", resource, namespace, name, e))?;
        Ok(())
    }
}
