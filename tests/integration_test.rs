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

#[cfg(test)]
mod tests {
    use hazelcast_kube::domain::resource::WaitForDelete;
    use hazelcast_kube::*;
    use serde_json::json;

    const NAMESPACE: &str = "default";

    fn create_test_config() -> ProviderConfig {
        ProviderConfig {
            context: std::env::var("HAZELCAST_KUBE_TEST_CONTEXT").ok(),
            field_manager: "hazelcast-kube-it".to_string(),
            default_namespace: NAMESPACE.to_string(),
            poll_interval: "1s".to_string(),
            ..Default::default()
        }
    }

    fn create_test_topic(name: &str) -> ResourceRecord {
        ResourceRecord::new("hazelcast_com_topic_v1alpha1", NAMESPACE, name).with_spec(json!({
            "hazelcast_resource_name": "hazelcast",
            "global_ordering_enabled": true
        }))
    }

    #[tokio::test]
    #[ignore] // Requires Kubernetes cluster
    async fn test_engine_connects() {
        let engine = ResourceEngine::connect(create_test_config())
            .await
            .expect("Failed to connect");

        assert_eq!(engine.config().field_manager, "hazelcast-kube-it");
    }

    #[tokio::test]
    #[ignore] // Requires Kubernetes cluster with the Hazelcast operator CRDs
    async fn test_topic_lifecycle() {
        let engine = ResourceEngine::connect(create_test_config())
            .await
            .expect("Failed to connect");
        let descriptor = catalog().get("Topic").unwrap();

        let created = engine
            .create(descriptor, &create_test_topic("it-topic"))
            .await
            .expect("Failed to create topic");
        assert_eq!(created.id.as_deref(), Some("default/it-topic"));

        let imported = engine
            .import(descriptor, "default/it-topic")
            .await
            .expect("Failed to import topic");
        assert_eq!(imported.spec.get("global_ordering_enabled"), Some(&json!(true)));

        let mut record = created.clone();
        record.wait_for_delete = Some(WaitForDelete {
            timeout: "2m".to_string(),
            poll_interval: "1s".to_string(),
        });
        engine
            .delete(descriptor, &record)
            .await
            .expect("Failed to delete topic");

        assert!(engine.read(descriptor, &created).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore] // Requires Kubernetes cluster with the Hazelcast operator CRDs
    async fn test_delete_missing_object() {
        let engine = ResourceEngine::connect(create_test_config())
            .await
            .expect("Failed to connect");
        let descriptor = catalog().get("Map").unwrap();

        let record = ResourceRecord::new(descriptor.type_name(), NAMESPACE, "it-does-not-exist");
        assert!(engine.delete(descriptor, &record).await.is_ok());
    }
}
