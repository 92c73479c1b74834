use dialoguer::{Input, Select};

use crate::config::RuntimeConfig;
use crate::error::AppError;
use crate::models::catalog::{VariableDefinition, VariableKind, CATALOG};
use crate::models::colour::{ColourTarget, ColourType};
use crate::models::control_device::ControlDeviceField;
use crate::models::destination::DestinationKind;

pub fn text(prompt: &str) -> Result<String, AppError> {
    Ok(Input::<String>::new().with_prompt(prompt).interact_text()?)
}

pub fn number(prompt: &str) -> Result<i64, AppError> {
    Ok(Input::<i64>::new().with_prompt(prompt).interact_text()?)
}

fn select<T: ToString>(prompt: &str, items: &[T]) -> Result<usize, AppError> {
    Ok(Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?)
}

/// Gateway address from the config, or asked for.
pub fn gateway(config: &RuntimeConfig) -> Result<String, AppError> {
    match &config.gateway {
        Some(address) => Ok(address.clone()),
        None => text("Enter DALION IP address"),
    }
}

pub fn destination_kind() -> Result<DestinationKind, AppError> {
    let items: Vec<String> = DestinationKind::ALL
        .iter()
        .map(|kind| kind.display_name().to_string())
        .collect();
    let choice = select("Select destination", &items)?;
    Ok(DestinationKind::ALL[choice])
}

pub fn variable() -> Result<&'static VariableDefinition, AppError> {
    let items: Vec<String> = CATALOG
        .iter()
        .map(|def| format!("{} ({})", def.label, def.id))
        .collect();
    let choice = select("Select variable", &items)?;
    Ok(&CATALOG[choice])
}

/// Ask for a value; enumerated variables offer their labels.
pub fn variable_value(variable: &VariableDefinition) -> Result<String, AppError> {
    if let VariableKind::Enumerated { options } = variable.kind {
        let items: Vec<String> = options
            .iter()
            .map(|(code, label)| format!("{} - {}", code, label))
            .collect();
        let choice = select(&format!("Select {}", variable.label), &items)?;
        return Ok(options[choice].0.to_string());
    }
    match variable.kind {
        VariableKind::ScaledNumber { min, max, scale } => text(&format!(
            "Enter {} ({}-{})",
            variable.label,
            min as f64 / scale as f64,
            max as f64 / scale as f64
        )),
        _ => match variable.bounds() {
            Some((min, max)) => text(&format!("Enter {} ({}-{})", variable.label, min, max)),
            None => text(&format!("Enter {}", variable.label)),
        },
    }
}

pub fn colour_target() -> Result<ColourTarget, AppError> {
    let targets = ColourTarget::all();
    let items: Vec<String> = targets
        .iter()
        .map(|target| format!("{} ({})", target.name(), target.id()))
        .collect();
    let choice = select("Select colour target", &items)?;
    Ok(targets[choice])
}

pub fn colour_type() -> Result<ColourType, AppError> {
    let items: Vec<String> = ColourType::ALL
        .iter()
        .map(|ct| format!("{} ({})", ct.display_name(), ct.code()))
        .collect();
    let choice = select("Select colour type", &items)?;
    Ok(ColourType::ALL[choice])
}

pub fn colour_values(colour_type: ColourType) -> Result<Vec<i64>, AppError> {
    colour_type
        .component_names()
        .iter()
        .map(|name| number(&format!("Enter {}", name)))
        .collect()
}

pub fn control_field() -> Result<ControlDeviceField, AppError> {
    let items: Vec<String> = ControlDeviceField::ALL
        .iter()
        .map(|field| format!("{} ({})", field.display_name(), field.key()))
        .collect();
    let choice = select("Select field", &items)?;
    Ok(ControlDeviceField::ALL[choice])
}
