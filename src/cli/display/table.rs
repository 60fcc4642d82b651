//! Table rendering for CLI output

use super::{status_phase, ColorTheme, ObjectState, StatusIcon};
use crate::domain::resource::{Catalog, ResourceDescriptor, ResourceRecord};
use crate::domain::schema::Attribute;
use chrono::{DateTime, Utc};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render the managed resource types
    pub fn render_types(&self, catalog: &Catalog) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("TYPE").set_alignment(CellAlignment::Left),
                Cell::new("KIND").set_alignment(CellAlignment::Left),
                Cell::new("API VERSION").set_alignment(CellAlignment::Left),
                Cell::new("ATTRIBUTES").set_alignment(CellAlignment::Center),
            ]);

        for descriptor in catalog.iter() {
            table.add_row(vec![
                Cell::new(descriptor.type_name()),
                Cell::new(&descriptor.kind).fg(self.theme.info),
                Cell::new(descriptor.api_version()),
                Cell::new(flatten(&descriptor.spec).len()).set_alignment(CellAlignment::Center),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Hazelcast Resource Types {} ─╮\n",
            format!("[{} types]", catalog.len()).bright_black()
        ));
        output.push_str(&table.to_string());
        output
    }

    /// Render every spec attribute of one type, nested ones as dotted paths
    pub fn render_schema(&self, descriptor: &ResourceDescriptor) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("ATTRIBUTE"),
                Cell::new("WIRE NAME"),
                Cell::new("TYPE"),
                Cell::new("PRESENCE"),
                Cell::new("DEFAULT"),
                Cell::new("DESCRIPTION"),
            ]);

        for (path, attribute) in flatten(&descriptor.spec) {
            let default = attribute
                .default
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_default();
            let mut rules: Vec<String> = attribute.validators.iter().map(|v| v.to_string()).collect();
            if !attribute.description.is_empty() {
                rules.insert(0, attribute.description.clone());
            }

            table.add_row(vec![
                Cell::new(path),
                Cell::new(&attribute.wire).fg(self.theme.muted),
                Cell::new(attribute.kind.label()),
                Cell::new(attribute.presence).fg(self.theme.get_presence_color(attribute.presence)),
                Cell::new(default),
                Cell::new(rules.join("\n")),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "{} ({})\n",
            descriptor.type_name().bold(),
            descriptor.api_version()
        ));
        if !descriptor.description.is_empty() {
            output.push_str(&format!("{}\n", descriptor.description.bright_black()));
        }
        output.push_str(&table.to_string());
        output
    }

    /// Render records read from the cluster; `missing` lists identifiers
    /// that were not found.
    pub fn render_records(
        &self,
        records: &[ResourceRecord],
        missing: &[String],
        now: DateTime<Utc>,
    ) -> String {
        if records.is_empty() && missing.is_empty() {
            return "No Hazelcast resources found".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("KIND").set_alignment(CellAlignment::Left),
                Cell::new("NAMESPACE").set_alignment(CellAlignment::Left),
                Cell::new("NAME").set_alignment(CellAlignment::Left),
                Cell::new("STATUS").set_alignment(CellAlignment::Center),
                Cell::new("AGE").set_alignment(CellAlignment::Right),
            ]);

        for record in records {
            let state = ObjectState::from_status(record.status.as_ref());
            let phase = status_phase(record.status.as_ref()).unwrap_or("Unknown");

            table.add_row(vec![
                Cell::new(record.kind.as_deref().unwrap_or(&record.type_name)),
                Cell::new(&record.metadata.namespace),
                Cell::new(&record.metadata.name),
                Cell::new(format!("{} {}", StatusIcon::get_state_icon(state), phase))
                    .fg(self.theme.get_state_color(state)),
                Cell::new(format_age(record.metadata.creation_timestamp.as_deref(), now))
                    .set_alignment(CellAlignment::Right),
            ]);
        }

        for id in missing {
            let (namespace, name) = id.split_once('/').unwrap_or(("", id.as_str()));
            table.add_row(vec![
                Cell::new("-"),
                Cell::new(namespace),
                Cell::new(name),
                Cell::new(format!("{} NotFound", StatusIcon::WARNING)).fg(Color::Yellow),
                Cell::new("-").set_alignment(CellAlignment::Right),
            ]);
        }

        let mut output = String::new();
        output.push_str(&table.to_string());
        output.push('\n');
        output.push_str(&format!(
            "Legend: {} Ready  {} Progressing  {} Failed  {} Missing\n",
            StatusIcon::SUCCESS.green(),
            StatusIcon::PENDING.yellow(),
            StatusIcon::ERROR.red(),
            StatusIcon::WARNING.yellow()
        ));

        output
    }
}

/// kubectl-style age: `45s`, `12m`, `3h`, `9d`.
pub fn format_age(created: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(created) = created.and_then(|ts| DateTime::parse_from_rfc3339(ts).ok()) else {
        return "<unknown>".to_string();
    };

    let seconds = (now - created.with_timezone(&Utc)).num_seconds().max(0);
    match seconds {
        s if s < 60 => format!("{}s", s),
        s if s < 3_600 => format!("{}m", s / 60),
        s if s < 86_400 => format!("{}h", s / 3_600),
        s => format!("{}d", s / 86_400),
    }
}

fn flatten(attributes: &[Attribute]) -> Vec<(String, &Attribute)> {
    let mut rows = Vec::new();
    collect(attributes, "spec", &mut rows);
    rows
}

fn collect<'a>(attributes: &'a [Attribute], prefix: &str, rows: &mut Vec<(String, &'a Attribute)>) {
    for attribute in attributes {
        let path = format!("{}.{}", prefix, attribute.name);
        rows.push((path.clone(), attribute));
        if let Some(children) = attribute.kind.children() {
            collect(children, &path, rows);
        }
    }
}
