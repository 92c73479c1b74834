use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::control_device::ControlDevice;

#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct DeviceData {
    pub device: DeviceVariables,
}

#[derive(Debug, Deserialize)]
pub struct DeviceVariables {
    pub variables: Vec<VariableEntry>,
}

/// One `{id, ty, va}` entry of a `get_device` response.
#[derive(Debug, Clone, Deserialize)]
pub struct VariableEntry {
    pub id: String,
    #[serde(default)]
    pub ty: Option<String>,
    pub va: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct ControlDevicesData {
    pub control_devices: ControlDeviceList,
}

#[derive(Debug, Deserialize)]
pub struct ControlDeviceList {
    pub devices: Vec<ControlDevice>,
}

/// Parse a response body. Invalid JSON surfaces as `AppError::Json`; valid
/// JSON of the wrong shape as `AppError::Decode`.
pub fn parse<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    serde_json::from_value::<ApiResponse<T>>(value)
        .map(|response| response.data)
        .map_err(|e| AppError::Decode(e.to_string()))
}

/// Body of a `set_*` response: JSON when it parses, the raw text otherwise.
pub fn body_value(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(body).into_owned()))
}

impl DeviceVariables {
    pub fn find(&self, id: &str) -> Option<&VariableEntry> {
        self.variables.iter().find(|entry| entry.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_device() {
        let body = br#"{"data":{"device":{"variables":[
            {"id":"dval","ty":"nb10","va":"900"},
            {"id":"dvft","ty":"se","va":2}
        ]}}}"#;
        let data: DeviceData = parse(body).unwrap();
        assert_eq!(data.device.variables.len(), 2);
        assert_eq!(data.device.find("dvft").unwrap().va, serde_json::json!(2));
        assert!(data.device.find("na").is_none());
    }

    #[test]
    fn test_parse_control_devices() {
        let body = br#"{"data":{"control_devices":{"devices":[{"ii":3,"os":1,"ls":55}]}}}"#;
        let data: ControlDevicesData = parse(body).unwrap();
        assert_eq!(data.control_devices.devices[0].index(), Some(3));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse::<DeviceData>(b"not json"),
            Err(AppError::Json(_))
        ));
        assert!(matches!(
            parse::<DeviceData>(br#"{"data":{}}"#),
            Err(AppError::Decode(_))
        ));
    }

    #[test]
    fn test_body_value() {
        assert_eq!(body_value(br#"{"ok":true}"#)["ok"], true);
        assert_eq!(body_value(b"OK"), serde_json::json!("OK"));
    }
}
