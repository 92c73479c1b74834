use serde_json::json;

use crate::api::request;
use crate::cli::output::{print_json, print_request};
use crate::cli::{prompt, request_url, DestinationArgs};
use crate::config::RuntimeConfig;
use crate::error::AppError;
use crate::gateway::Gateway;
use crate::models::catalog::{self, VariableDefinition};
use crate::models::codec::{self, DomainValue};
use crate::models::destination::Destination;

/// Variable written by `set-level`.
const LEVEL_VARIABLE: &str = "dval";

fn variable_or_prompt(id: Option<&str>) -> Result<&'static VariableDefinition, AppError> {
    match id {
        Some(id) => catalog::lookup_by_id(id),
        None => prompt::variable(),
    }
}

pub async fn handle_get(
    target: &DestinationArgs,
    id: Option<&str>,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    let destination = target.resolve()?;
    let variable = variable_or_prompt(id)?;
    let address = prompt::gateway(config)?;

    if config.dry_run {
        print_request(&request_url(&request::get_device(&destination), &address)?);
        return Ok(());
    }

    let gateway = Gateway::new(&address, config.timeout)?;
    let value = gateway.get_device(&destination, variable).await?;
    print_json(&device_json(&destination, variable, value.as_ref()));
    Ok(())
}

pub async fn handle_set(
    target: &DestinationArgs,
    id: Option<&str>,
    value: Option<&str>,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    let destination = target.resolve()?;
    let variable = variable_or_prompt(id)?;
    let raw = match value {
        Some(value) => value.to_string(),
        None => prompt::variable_value(variable)?,
    };
    set_variable(&destination, variable, &raw, config).await
}

pub async fn handle_level(
    target: &DestinationArgs,
    percent: Option<&str>,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    let destination = target.resolve()?;
    let variable = catalog::lookup_by_id(LEVEL_VARIABLE)?;
    let raw = match percent {
        Some(percent) => percent.to_string(),
        None => prompt::variable_value(variable)?,
    };
    set_variable(&destination, variable, &raw, config).await
}

async fn set_variable(
    destination: &Destination,
    variable: &VariableDefinition,
    raw: &str,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    let wire = codec::encode(variable, raw)?;
    let request = request::set_device(destination, variable, &wire)?;
    let address = prompt::gateway(config)?;
    let url = request_url(&request, &address)?;

    if config.dry_run {
        print_request(&url);
        return Ok(());
    }

    let gateway = Gateway::new(&address, config.timeout)?;
    let response = gateway.set_device(destination, variable, &wire).await?;
    print_json(&json!({"request": url.as_str(), "response": response}));
    Ok(())
}

fn device_json(
    destination: &Destination,
    variable: &VariableDefinition,
    value: Option<&DomainValue>,
) -> serde_json::Value {
    let mut obj = json!({
        "channel": destination.channel(),
        "destination": destination.kind().display_name(),
        "index": destination.index(),
        "id": variable.id,
        "value": value,
    });
    if let Some(label) = value
        .and_then(DomainValue::as_i64)
        .and_then(|code| variable.option_label(code))
    {
        obj["label"] = json!(label);
    }
    obj
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::destination::{resolve, DestinationKind};

    #[test]
    fn test_device_json_level() {
        let destination = resolve(2, DestinationKind::Lamp, 5).unwrap();
        let variable = catalog::lookup_by_id("dval").unwrap();
        let obj = device_json(&destination, variable, Some(&DomainValue::Decimal(90.0)));
        assert_eq!(obj["channel"], 2);
        assert_eq!(obj["destination"], "lamp");
        assert_eq!(obj["index"], 5);
        assert_eq!(obj["id"], "dval");
        assert_eq!(obj["value"], 90.0);
        assert!(obj.get("label").is_none());
    }

    #[test]
    fn test_device_json_enumerated_label() {
        let destination = resolve(1, DestinationKind::Channel, -1).unwrap();
        let variable = catalog::lookup_by_id("dvft").unwrap();
        let value = DomainValue::Raw(json!("2"));
        let obj = device_json(&destination, variable, Some(&value));
        assert_eq!(obj["value"], "2");
        assert_eq!(obj["label"], "1.0");
    }

    #[test]
    fn test_device_json_absent() {
        let destination = resolve(1, DestinationKind::Group, 3).unwrap();
        let variable = catalog::lookup_by_id("na").unwrap();
        let obj = device_json(&destination, variable, None);
        assert!(obj["value"].is_null());
    }
}
