use std::time::Duration;

use tracing::debug;

use crate::api::client::GatewayClient;
use crate::api::request;
use crate::api::response::{self, ControlDevicesData, DeviceData};
use crate::error::AppError;
use crate::models::catalog::VariableDefinition;
use crate::models::codec::{self, DomainValue, WireValue};
use crate::models::colour::ColourCommand;
use crate::models::control_device::ControlDeviceQuery;
use crate::models::destination::Destination;

/// Decode the requested variable out of a `get_device` body. A variable the
/// gateway did not report is `None`.
pub fn decode_device(
    body: &[u8],
    variable: &VariableDefinition,
) -> Result<Option<DomainValue>, AppError> {
    let data: DeviceData = response::parse(body)?;
    match data.device.find(variable.id) {
        Some(entry) => codec::decode(variable, &entry.va).map(Some),
        None => {
            debug!("variable '{}' absent from response", variable.id);
            Ok(None)
        }
    }
}

/// Extract the queried field out of a control-device `get` body.
pub fn decode_control_device(
    body: &[u8],
    query: &ControlDeviceQuery,
) -> Result<Option<serde_json::Value>, AppError> {
    let data: ControlDevicesData = response::parse(body)?;
    let value = query.extract(&data.control_devices.devices);
    if value.is_none() {
        debug!(
            "control device {} ({}) absent from response",
            query.index(),
            query.field()
        );
    }
    Ok(value)
}

/// Typed operations against one gateway. All inputs are already validated.
pub struct Gateway {
    client: GatewayClient,
}

impl Gateway {
    pub fn new(address: &str, timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            client: GatewayClient::new(address, timeout)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub async fn get_device(
        &self,
        destination: &Destination,
        variable: &VariableDefinition,
    ) -> Result<Option<DomainValue>, AppError> {
        let body = self.client.send(&request::get_device(destination)).await?;
        decode_device(&body, variable)
    }

    pub async fn set_device(
        &self,
        destination: &Destination,
        variable: &VariableDefinition,
        value: &WireValue,
    ) -> Result<serde_json::Value, AppError> {
        let request = request::set_device(destination, variable, value)?;
        let body = self.client.send(&request).await?;
        Ok(response::body_value(&body))
    }

    pub async fn set_colour(&self, command: &ColourCommand) -> Result<serde_json::Value, AppError> {
        let request = request::set_colour(command)?;
        let body = self.client.send(&request).await?;
        Ok(response::body_value(&body))
    }

    pub async fn get_control_device(
        &self,
        query: &ControlDeviceQuery,
    ) -> Result<Option<serde_json::Value>, AppError> {
        let body = self
            .client
            .send(&request::get_control_devices(query))
            .await?;
        decode_control_device(&body, query)
    }
}
