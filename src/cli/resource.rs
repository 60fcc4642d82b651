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

use crate::cli::display::{StatusIcon, TableRenderer};
use crate::domain::config::{apply_to_provider_config, parse_dynamic_configs, ProviderConfig};
use crate::domain::engine::{render_manifest_json, render_manifest_yaml, ResourceEngine};
use crate::domain::resource::{catalog, ResourceDescriptor, ResourceRecord, WaitForDelete};
use chrono::Utc;
use clap::{Args, Parser, ValueEnum};
use colored::Colorize;
use futures::future::join_all;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Yaml,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
}

/// Provider settings shared by every command that needs them
#[derive(Args, Debug, Clone, Default)]
pub struct ProviderArgs {
    /// Provider configuration file (TOML)
    /// If not specified, HAZELCAST_KUBE_CONFIG is consulted, then built-in defaults
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Path to kubeconfig file
    /// If not specified, uses default kubeconfig resolution (KUBECONFIG env or ~/.kube/config)
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use
    /// If not specified, uses current context from kubeconfig
    #[arg(long)]
    pub context: Option<String>,

    /// Field manager recorded by server-side apply
    #[arg(long)]
    pub field_manager: Option<String>,

    /// Take ownership of fields managed by other field managers
    #[arg(long)]
    pub force_conflicts: bool,

    /// Dynamic configuration properties to override any settings (-D key=value)
    ///
    /// Keys: provider.kubeconfig, provider.context, provider.field-manager,
    /// provider.force-conflicts, provider.namespace, provider.poll-interval,
    /// provider.delete-timeout
    ///
    /// Example: -Dprovider.field-manager=platform -Dprovider.delete-timeout=2m
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub properties: Vec<String>,
}

impl ProviderArgs {
    /// Configuration file, then command line flags, then -D properties.
    pub fn resolve(&self) -> anyhow::Result<ProviderConfig> {
        let mut conf = ProviderConfig::load(self.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load provider configuration: {}", e))?;

        if let Some(ref kubeconfig) = self.kubeconfig {
            conf.kubeconfig = Some(kubeconfig.clone());
        }
        if let Some(ref context) = self.context {
            conf.context = Some(context.clone());
        }
        if let Some(ref manager) = self.field_manager {
            conf.field_manager = manager.clone();
        }
        if self.force_conflicts {
            conf.force_conflicts = true;
        }

        if !self.properties.is_empty() {
            let configs = parse_dynamic_configs(&self.properties)
                .map_err(|e| anyhow::anyhow!("Failed to parse dynamic configs: {}", e))?;
            apply_to_provider_config(&configs, &mut conf)?;
        }

        conf.validate()?;
        Ok(conf)
    }

    pub async fn connect(&self) -> anyhow::Result<ResourceEngine> {
        let conf = self.resolve()?;
        ResourceEngine::connect(conf)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to connect to Kubernetes: {}", e))
    }
}

#[derive(Parser, Debug, Clone)]
pub struct TypesCommand {}

#[derive(Parser, Debug, Clone)]
pub struct SchemaCommand {
    /// Type name (hazelcast_com_map_v1alpha1) or kind (Map)
    pub type_name: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ManifestCommand {
    /// Record file (YAML or JSON)
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: String,

    #[arg(long, short = 'o', value_enum, default_value = "yaml")]
    pub output: ManifestFormat,

    #[command(flatten)]
    pub provider: ProviderArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct ApplyCommand {
    /// Record file (YAML or JSON)
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: String,

    #[arg(long, short = 'o', value_enum, default_value = "table")]
    pub output: OutputFormat,

    #[command(flatten)]
    pub provider: ProviderArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct GetCommand {
    /// Type name (hazelcast_com_map_v1alpha1) or kind (Map)
    pub type_name: String,

    /// Object name
    pub name: String,

    /// Kubernetes namespace (defaults to the provider namespace)
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,

    #[arg(long, short = 'o', value_enum, default_value = "table")]
    pub output: OutputFormat,

    #[command(flatten)]
    pub provider: ProviderArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Type name (hazelcast_com_map_v1alpha1) or kind (Map)
    pub type_name: String,

    /// Object names
    #[arg(required = true)]
    pub names: Vec<String>,

    /// Kubernetes namespace (defaults to the provider namespace)
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,

    #[arg(long, short = 'o', value_enum, default_value = "table")]
    pub output: OutputFormat,

    #[command(flatten)]
    pub provider: ProviderArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct ImportCommand {
    /// Type name (hazelcast_com_map_v1alpha1) or kind (Map)
    pub type_name: String,

    /// Identifier in <namespace>/<name> form
    pub id: String,

    #[arg(long, short = 'o', value_enum, default_value = "yaml")]
    pub output: OutputFormat,

    #[command(flatten)]
    pub provider: ProviderArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// Record file (YAML or JSON); replaces TYPE and NAME
    #[arg(long, short = 'f', value_name = "PATH", conflicts_with_all = ["type_name", "name"])]
    pub file: Option<String>,

    /// Type name (hazelcast_com_map_v1alpha1) or kind (Map)
    #[arg(required_unless_present = "file")]
    pub type_name: Option<String>,

    /// Object name
    #[arg(required_unless_present = "file")]
    pub name: Option<String>,

    /// Kubernetes namespace (defaults to the provider namespace)
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,

    /// Wait until the object is gone ("0s" checks once, negative waits up to a week)
    #[arg(long, value_name = "DURATION", allow_hyphen_values = true)]
    pub wait_timeout: Option<String>,

    /// Interval between checks while waiting
    #[arg(long, value_name = "DURATION")]
    pub poll_interval: Option<String>,

    #[command(flatten)]
    pub provider: ProviderArgs,
}

impl TypesCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        println!("{}", TableRenderer::new().render_types(catalog()));
        Ok(())
    }
}

impl SchemaCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let descriptor = catalog().get(&self.type_name)?;
        println!("{}", TableRenderer::new().render_schema(descriptor));
        Ok(())
    }
}

impl ManifestCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let conf = self.provider.resolve()?;
        let record = ResourceRecord::from_file(&self.file)?;
        let descriptor = catalog().get(&record.type_name)?;

        let text = match self.output {
            ManifestFormat::Yaml => render_manifest_yaml(&conf, descriptor, &record)?,
            ManifestFormat::Json => render_manifest_json(&conf, descriptor, &record)?,
        };
        println!("{}", text);
        Ok(())
    }
}

impl ApplyCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let record = ResourceRecord::from_file(&self.file)?;
        let descriptor = catalog().get(&record.type_name)?;
        let engine = self.provider.connect().await?;

        let planned = engine.prepare(descriptor, &record)?;
        let applied = match engine.read(descriptor, &planned).await? {
            Some(prior) => engine.update(descriptor, &prior, &planned).await,
            None => engine.create(descriptor, &planned).await,
        }
        .map_err(|e| anyhow::anyhow!("Failed to apply {} {}: {}", descriptor.kind, planned.identity(), e))?;

        println!(
            "{} {} {} applied",
            StatusIcon::SUCCESS.green(),
            descriptor.kind,
            applied.identity()
        );
        print_records(&[applied], &[], self.output)
    }
}

impl GetCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let descriptor = catalog().get(&self.type_name)?;
        let engine = self.provider.connect().await?;
        let namespace = resolve_namespace(&self.namespace, &engine);

        let record = engine
            .read_data_source(descriptor, &namespace, &self.name)
            .await?;
        print_records(&[record], &[], self.output)
    }
}

impl ListCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let descriptor = catalog().get(&self.type_name)?;
        let engine = self.provider.connect().await?;
        let namespace = resolve_namespace(&self.namespace, &engine);

        let results = join_all(
            self.names
                .iter()
                .map(|name| engine.read_data_source(descriptor, &namespace, name)),
        )
        .await;

        let mut records = Vec::new();
        let mut missing = Vec::new();
        for (name, result) in self.names.iter().zip(results) {
            match result {
                Ok(record) => records.push(record),
                Err(e) if e.is_not_found() => missing.push(format!("{}/{}", namespace, name)),
                Err(e) => return Err(anyhow::anyhow!("Failed to read {} {}/{}: {}", descriptor.kind, namespace, name, e)),
            }
        }

        print_records(&records, &missing, self.output)
    }
}

impl ImportCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let descriptor = catalog().get(&self.type_name)?;
        let engine = self.provider.connect().await?;

        let record = engine.import(descriptor, &self.id).await?;
        print_records(&[record], &[], self.output)
    }
}

impl DeleteCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let engine = self.provider.connect().await?;
        let (descriptor, mut record) = self.target(&engine)?;

        if let Some(wait) = self.wait_for_delete(engine.config())? {
            record.wait_for_delete = Some(wait);
        }

        engine
            .delete(descriptor, &record)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to delete {} {}: {}", descriptor.kind, record.identity(), e))?;

        println!(
            "{} {} {} deleted",
            StatusIcon::SUCCESS.green(),
            descriptor.kind,
            record.identity()
        );
        Ok(())
    }

    /// Wait settings from `--wait-timeout` and `--poll-interval`; the
    /// interval falls back to the provider's.
    fn wait_for_delete(&self, config: &ProviderConfig) -> anyhow::Result<Option<WaitForDelete>> {
        let Some(ref timeout) = self.wait_timeout else {
            return Ok(None);
        };
        let wait = WaitForDelete {
            timeout: timeout.clone(),
            poll_interval: self
                .poll_interval
                .clone()
                .unwrap_or_else(|| config.poll_interval.clone()),
        };
        wait.timeout()?;
        wait.poll_interval()
            .map_err(|e| anyhow::anyhow!("--poll-interval: {}", e))?;
        Ok(Some(wait))
    }

    fn target(&self, engine: &ResourceEngine) -> anyhow::Result<(&'static ResourceDescriptor, ResourceRecord)> {
        let mut record = match (&self.file, &self.type_name, &self.name) {
            (Some(file), _, _) => ResourceRecord::from_file(file)?,
            (None, Some(type_name), Some(name)) => {
                let descriptor = catalog().get(type_name)?;
                ResourceRecord::new(descriptor.type_name(), "", name)
            }
            _ => anyhow::bail!("either --file or TYPE and NAME are required"),
        };

        if let Some(ref namespace) = self.namespace {
            record.metadata.namespace = namespace.clone();
        }
        if record.metadata.namespace.is_empty() {
            record.metadata.namespace = engine.config().default_namespace.clone();
        }
        record.identity().validate()?;

        let descriptor = catalog().get(&record.type_name)?;
        Ok((descriptor, record))
    }
}

fn resolve_namespace(namespace: &Option<String>, engine: &ResourceEngine) -> String {
    namespace
        .clone()
        .unwrap_or_else(|| engine.config().default_namespace.clone())
}

fn print_records(records: &[ResourceRecord], missing: &[String], output: OutputFormat) -> anyhow::Result<()> {
    match output {
        OutputFormat::Table => {
            println!(
                "{}",
                TableRenderer::new().render_records(records, missing, Utc::now())
            );
        }
        OutputFormat::Yaml => {
            for record in records {
                println!("---\n{}", serde_yaml::to_string(record)?);
            }
        }
        OutputFormat::Json => {
            let text = match records {
                [single] => serde_json::to_string_pretty(single)?,
                _ => serde_json::to_string_pretty(records)?,
            };
            println!("{}", text);
        }
    }

    if output != OutputFormat::Table {
        for id in missing {
            eprintln!("{} {} not found", StatusIcon::WARNING.yellow(), id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn delete_command(wait_timeout: Option<&str>, poll_interval: Option<&str>) -> DeleteCommand {
        DeleteCommand {
            file: None,
            type_name: Some("Map".to_string()),
            name: Some("orders".to_string()),
            namespace: None,
            wait_timeout: wait_timeout.map(str::to_string),
            poll_interval: poll_interval.map(str::to_string),
            provider: ProviderArgs::default(),
        }
    }

    #[test]
    fn test_resolve_layers_file_then_flags_then_properties() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
field_manager = "from-file"
default_namespace = "from-file"
poll_interval = "3s"
"#
        )
        .unwrap();

        let args = ProviderArgs {
            config: Some(file.path().to_str().unwrap().to_string()),
            field_manager: Some("from-flag".to_string()),
            context: Some("from-flag".to_string()),
            properties: vec![
                "provider.field-manager=from-property".to_string(),
                "provider.namespace=from-property".to_string(),
            ],
            ..Default::default()
        };
        let conf = args.resolve().unwrap();

        // -D beats the flag, the flag beats the file
        assert_eq!(conf.field_manager, "from-property");
        assert_eq!(conf.context.as_deref(), Some("from-flag"));
        assert_eq!(conf.default_namespace, "from-property");
        // untouched file settings survive
        assert_eq!(conf.poll_interval, "3s");
    }

    #[test]
    fn test_resolve_flag_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"field_manager = "from-file""#).unwrap();

        let args = ProviderArgs {
            config: Some(file.path().to_str().unwrap().to_string()),
            field_manager: Some("from-flag".to_string()),
            force_conflicts: true,
            ..Default::default()
        };
        let conf = args.resolve().unwrap();
        assert_eq!(conf.field_manager, "from-flag");
        assert!(conf.force_conflicts);
    }

    #[test]
    fn test_resolve_rejects_invalid_result() {
        let args = ProviderArgs {
            properties: vec!["provider.poll-interval=0s".to_string()],
            ..Default::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_delete_wait_settings() {
        let config = ProviderConfig::default();
        assert!(delete_command(None, Some("1s"))
            .wait_for_delete(&config)
            .unwrap()
            .is_none());

        let wait = delete_command(Some("30s"), None)
            .wait_for_delete(&config)
            .unwrap()
            .unwrap();
        assert_eq!(wait.poll_interval, config.poll_interval);

        let err = delete_command(Some("30s"), Some("0s"))
            .wait_for_delete(&config)
            .unwrap_err();
        assert!(err.to_string().contains("poll_interval must be > 0"));
    }
}
