use serde_json::json;
use tabled::Tabled;

use crate::cli::output::{print_json, print_listing, print_table};
use crate::config::{OutputMode, RuntimeConfig};
use crate::error::AppError;
use crate::models::catalog::{VariableDefinition, VariableKind, CATALOG};
use crate::models::colour::{ColourTarget, ColourType};

#[derive(Tabled)]
struct VariableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "LABEL")]
    label: String,
    #[tabled(rename = "KIND")]
    kind: String,
    #[tabled(rename = "RANGE")]
    range: String,
}

#[derive(Tabled)]
struct ColourTargetRow {
    #[tabled(rename = "CID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
}

#[derive(Tabled)]
struct ColourTypeRow {
    #[tabled(rename = "CTYPE")]
    code: u8,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "VALUES")]
    components: String,
}

/// Accepted input range as the caller writes it (levels in percent).
fn input_range(def: &VariableDefinition) -> String {
    match def.kind {
        VariableKind::ScaledNumber { min, max, scale } => format!(
            "{:.1}-{:.1}",
            min as f64 / scale as f64,
            max as f64 / scale as f64
        ),
        VariableKind::Enumerated { options } => options
            .iter()
            .map(|(code, label)| format!("{}={}", code, label))
            .collect::<Vec<_>>()
            .join(", "),
        VariableKind::Number { .. } | VariableKind::Bitmask { .. } => def
            .bounds()
            .map(|(min, max)| format!("{}-{}", min, max))
            .unwrap_or_default(),
        VariableKind::Text => String::new(),
    }
}

pub fn handle_variables(config: &RuntimeConfig) -> Result<(), AppError> {
    let rows: Vec<VariableRow> = CATALOG
        .iter()
        .map(|def| VariableRow {
            id: def.id.to_string(),
            label: def.label.to_string(),
            kind: def.kind.name().to_string(),
            range: input_range(def),
        })
        .collect();
    let value = serde_json::Value::Array(CATALOG.iter().map(VariableDefinition::to_json).collect());
    print_listing(&rows, &value, config);
    Ok(())
}

pub fn handle_colours(config: &RuntimeConfig) -> Result<(), AppError> {
    let targets = ColourTarget::all();

    if config.output_mode == OutputMode::Table {
        let target_rows: Vec<ColourTargetRow> = targets
            .iter()
            .map(|target| ColourTargetRow {
                id: target.id(),
                name: target.name(),
            })
            .collect();
        let type_rows: Vec<ColourTypeRow> = ColourType::ALL
            .iter()
            .map(|ct| ColourTypeRow {
                code: ct.code(),
                name: ct.display_name().to_string(),
                components: ct.component_names().join(", "),
            })
            .collect();
        print_table(&target_rows);
        print_table(&type_rows);
        return Ok(());
    }

    print_json(&json!({
        "targets": targets
            .iter()
            .map(|target| json!({"id": target.id(), "name": target.name()}))
            .collect::<Vec<_>>(),
        "types": ColourType::ALL
            .iter()
            .map(|ct| json!({
                "code": ct.code(),
                "name": ct.display_name(),
                "values": ct.component_names(),
            }))
            .collect::<Vec<_>>(),
    }));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::lookup_by_id;

    #[test]
    fn test_input_range() {
        assert_eq!(input_range(lookup_by_id("dval").unwrap()), "0.0-100.0");
        assert_eq!(input_range(lookup_by_id("dvgr").unwrap()), "0-65535");
        assert!(input_range(lookup_by_id("dvft").unwrap()).starts_with("0=No fade, 1=0.7"));
        assert_eq!(input_range(lookup_by_id("na").unwrap()), "");
    }
}
