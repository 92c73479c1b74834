use reqwest::Url;
use serde::Serialize;

use crate::error::AppError;
use crate::models::catalog::VariableDefinition;
use crate::models::codec::WireValue;
use crate::models::colour::ColourCommand;
use crate::models::control_device::ControlDeviceQuery;
use crate::models::destination::{Destination, DestinationKind, CHANNEL_INDEX};

pub const DEVICES_PATH: &str = "/api/v100/dali_devices.ssi";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetDevice,
    SetDevice,
    SetColour,
    GetControlDevices,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::GetDevice => "get_device",
            Action::SetDevice => "set_device",
            Action::SetColour => "set_colour",
            Action::GetControlDevices => "get",
        }
    }
}

/// Path plus ordered query parameters of one gateway call. `action` is
/// always the first parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRequest {
    action: Action,
    params: Vec<(&'static str, String)>,
}

impl GatewayRequest {
    fn new(action: Action, channel: u8) -> Self {
        Self {
            action,
            params: vec![
                ("action", action.as_str().to_string()),
                ("ch", channel.to_string()),
            ],
        }
    }

    fn push(mut self, key: &'static str, value: String) -> Self {
        self.params.push((key, value));
        self
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn path(&self) -> &'static str {
        DEVICES_PATH
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Full request URL with form-urlencoded parameters.
    pub fn url(&self, base_url: &str) -> Result<Url, AppError> {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), self.path());
        Url::parse_with_params(&endpoint, &self.params).map_err(|e| {
            AppError::InvalidInput(format!("Invalid gateway address '{}': {}", base_url, e))
        })
    }
}

/// Normalize a gateway address (`192.168.0.210`, `host:8080`, or a full
/// URL) to a base URL.
pub fn base_url(gateway: &str) -> Result<String, AppError> {
    let gateway = gateway.trim();
    if gateway.is_empty() {
        return Err(AppError::InvalidInput("IP is invalid.".into()));
    }
    if gateway.starts_with("http://") || gateway.starts_with("https://") {
        Ok(gateway.to_string())
    } else {
        Ok(format!("http://{}", gateway))
    }
}

fn device_addressing(destination: &Destination) -> (&'static str, String) {
    match destination.kind() {
        DestinationKind::Lamp => ("di", destination.index().to_string()),
        DestinationKind::Group => ("gi", destination.index().to_string()),
        DestinationKind::Channel => ("gi", CHANNEL_INDEX.to_string()),
    }
}

/// `set_colour` addresses take a JSON list of indices.
fn colour_addressing(destination: &Destination) -> Result<(&'static str, String), AppError> {
    let (key, index) = match destination.kind() {
        DestinationKind::Lamp => ("sa", i64::from(destination.index())),
        DestinationKind::Group => ("gi", i64::from(destination.index())),
        DestinationKind::Channel => ("gi", CHANNEL_INDEX),
    };
    Ok((key, serde_json::to_string(&[index])?))
}

#[derive(Serialize)]
struct DeviceAssignment<'a> {
    id: &'a str,
    va: &'a WireValue,
}

pub fn get_device(destination: &Destination) -> GatewayRequest {
    let (key, index) = device_addressing(destination);
    GatewayRequest::new(Action::GetDevice, destination.channel()).push(key, index)
}

pub fn set_device(
    destination: &Destination,
    variable: &VariableDefinition,
    value: &WireValue,
) -> Result<GatewayRequest, AppError> {
    let (key, index) = device_addressing(destination);
    let device = serde_json::to_string(&[DeviceAssignment {
        id: variable.id,
        va: value,
    }])?;
    Ok(GatewayRequest::new(Action::SetDevice, destination.channel())
        .push(key, index)
        .push("device", device))
}

pub fn set_colour(command: &ColourCommand) -> Result<GatewayRequest, AppError> {
    let (key, indices) = colour_addressing(&command.destination)?;
    let cvalue = serde_json::to_string(&command.value)?;
    Ok(
        GatewayRequest::new(Action::SetColour, command.destination.channel())
            .push(key, indices)
            .push("cid", command.target.id())
            .push("ctype", command.value.colour_type().code().to_string())
            .push("cvalue", cvalue),
    )
}

/// Index and field selection happen client-side on the response.
pub fn get_control_devices(query: &ControlDeviceQuery) -> GatewayRequest {
    GatewayRequest::new(Action::GetControlDevices, query.channel())
}
