use serde_json::json;

use crate::api::request;
use crate::cli::output::{print_json, print_request};
use crate::cli::{prompt, request_url};
use crate::config::RuntimeConfig;
use crate::error::AppError;
use crate::gateway::Gateway;
use crate::models::control_device::{self, ControlDeviceField};

pub async fn handle_get(
    channel: Option<i64>,
    index: Option<i64>,
    field: Option<&str>,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    let channel = match channel {
        Some(channel) => channel,
        None => prompt::number("Enter channel number (1-4)")?,
    };
    let index = match index {
        Some(index) => index,
        None => prompt::number("Enter control device index (0-63)")?,
    };
    let field = match field {
        Some(field) => field.parse::<ControlDeviceField>()?,
        None => prompt::control_field()?,
    };
    let query = control_device::build_query(channel, index, field)?;
    let address = prompt::gateway(config)?;

    if config.dry_run {
        print_request(&request_url(&request::get_control_devices(&query), &address)?);
        return Ok(());
    }

    let gateway = Gateway::new(&address, config.timeout)?;
    let value = gateway.get_control_device(&query).await?;
    print_json(&json!({
        "channel": query.channel(),
        "index": query.index(),
        "field": query.field().key(),
        "value": value,
    }));
    Ok(())
}
