use serde_json::json;

use crate::api::request;
use crate::cli::output::{print_json, print_request};
use crate::cli::{prompt, request_url, DestinationArgs};
use crate::config::RuntimeConfig;
use crate::error::AppError;
use crate::gateway::Gateway;
use crate::models::colour::{ColourCommand, ColourComponents, ColourTarget, ColourType};

pub async fn handle_set(
    target: &DestinationArgs,
    cid: Option<&str>,
    ctype: Option<i64>,
    values: &[i64],
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    let destination = target.resolve()?;
    let colour_target = match cid {
        Some(cid) => cid.parse::<ColourTarget>()?,
        None => prompt::colour_target()?,
    };
    let colour_type = match ctype {
        Some(code) => ColourType::from_code(code)?,
        None => prompt::colour_type()?,
    };
    let values = if values.is_empty() {
        prompt::colour_values(colour_type)?
    } else {
        values.to_vec()
    };
    let components = ColourComponents::from_values(colour_type, &values)?;
    let command = ColourCommand::new(destination, colour_target, &components);

    let address = prompt::gateway(config)?;
    let url = request_url(&request::set_colour(&command)?, &address)?;

    if config.dry_run {
        print_request(&url);
        return Ok(());
    }

    let gateway = Gateway::new(&address, config.timeout)?;
    let response = gateway.set_colour(&command).await?;
    print_json(&json!({"request": url.as_str(), "response": response}));
    Ok(())
}
