use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::AppError;
use crate::models::destination::check_channel;

pub const MAX_CONTROL_DEVICE_INDEX: i64 = 63;

/// Readable state of a DALI-2 control device (sensor, push button).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlDeviceField {
    OccupancyState,
    LightLevel,
}

impl ControlDeviceField {
    pub const ALL: [ControlDeviceField; 2] = [
        ControlDeviceField::OccupancyState,
        ControlDeviceField::LightLevel,
    ];

    /// Response key of the field.
    pub fn key(&self) -> &'static str {
        match self {
            ControlDeviceField::OccupancyState => "os",
            ControlDeviceField::LightLevel => "ls",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ControlDeviceField::OccupancyState => "Occupancy state",
            ControlDeviceField::LightLevel => "Light",
        }
    }
}

impl fmt::Display for ControlDeviceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ControlDeviceField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        ControlDeviceField::ALL
            .into_iter()
            .find(|field| field.key() == key)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "control device field '{}'. Use os or ls",
                    key
                ))
            })
    }
}

/// One entry of `data.control_devices.devices`.
#[derive(Debug, Clone, Deserialize)]
pub struct ControlDevice {
    /// Instance index; some firmware sends it as a string.
    pub ii: serde_json::Value,
    #[serde(default)]
    pub os: Option<serde_json::Value>,
    #[serde(default)]
    pub ls: Option<serde_json::Value>,
}

impl ControlDevice {
    pub fn index(&self) -> Option<i64> {
        self.ii
            .as_i64()
            .or_else(|| self.ii.as_str().and_then(|s| s.trim().parse().ok()))
    }

    pub fn field(&self, field: ControlDeviceField) -> Option<&serde_json::Value> {
        match field {
            ControlDeviceField::OccupancyState => self.os.as_ref(),
            ControlDeviceField::LightLevel => self.ls.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlDeviceQuery {
    channel: u8,
    index: u8,
    field: ControlDeviceField,
}

impl ControlDeviceQuery {
    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn field(&self) -> ControlDeviceField {
        self.field
    }

    /// Pick this query's field out of a device list. A device missing from
    /// the list is reported as `None`, not as an error.
    pub fn extract(&self, devices: &[ControlDevice]) -> Option<serde_json::Value> {
        extract(devices, self.index, self.field)
    }
}

pub fn build_query(
    channel: i64,
    index: i64,
    field: ControlDeviceField,
) -> Result<ControlDeviceQuery, AppError> {
    let mut problems: Vec<String> = check_channel(channel).into_iter().collect();
    if !(0..=MAX_CONTROL_DEVICE_INDEX).contains(&index) {
        problems.push(format!(
            "control device index {} is outside [0, {}]",
            index, MAX_CONTROL_DEVICE_INDEX
        ));
    }
    if !problems.is_empty() {
        return Err(AppError::InvalidDestination(problems.join("; ")));
    }

    Ok(ControlDeviceQuery {
        channel: channel as u8,
        index: index as u8,
        field,
    })
}

pub fn extract(
    devices: &[ControlDevice],
    index: u8,
    field: ControlDeviceField,
) -> Option<serde_json::Value> {
    devices
        .iter()
        .find(|device| device.index() == Some(i64::from(index)))
        .and_then(|device| device.field(field).cloned())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn devices() -> Vec<ControlDevice> {
        serde_json::from_value(json!([
            {"ii": 0, "os": 1, "ls": 340},
            {"ii": "5", "os": 0, "ls": 12},
            {"ii": 7, "ls": 80}
        ]))
        .unwrap()
    }

    #[test]
    fn test_build_query_bounds() {
        assert!(build_query(1, 0, ControlDeviceField::LightLevel).is_ok());
        assert!(build_query(4, 63, ControlDeviceField::OccupancyState).is_ok());
        assert!(matches!(
            build_query(1, 64, ControlDeviceField::LightLevel),
            Err(AppError::InvalidDestination(_))
        ));
        assert!(build_query(1, -1, ControlDeviceField::LightLevel).is_err());
        assert!(build_query(0, 0, ControlDeviceField::LightLevel).is_err());
    }

    #[test]
    fn test_build_query_reports_channel_and_index() {
        match build_query(7, 70, ControlDeviceField::OccupancyState) {
            Err(AppError::InvalidDestination(message)) => {
                assert!(message.contains("channel 7 is outside [1, 4]"));
                assert!(message.contains("control device index 70"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_extract_fields() {
        let devices = devices();
        let query = build_query(1, 0, ControlDeviceField::OccupancyState).unwrap();
        assert_eq!(query.extract(&devices), Some(json!(1)));
        let query = build_query(1, 0, ControlDeviceField::LightLevel).unwrap();
        assert_eq!(query.extract(&devices), Some(json!(340)));
    }

    #[test]
    fn test_extract_string_index() {
        assert_eq!(
            extract(&devices(), 5, ControlDeviceField::LightLevel),
            Some(json!(12))
        );
    }

    #[test]
    fn test_extract_absent() {
        let devices = devices();
        assert_eq!(extract(&devices, 9, ControlDeviceField::LightLevel), None);
        assert_eq!(extract(&devices, 7, ControlDeviceField::OccupancyState), None);
        assert_eq!(extract(&[], 0, ControlDeviceField::LightLevel), None);
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!(
            "os".parse::<ControlDeviceField>().unwrap(),
            ControlDeviceField::OccupancyState
        );
        assert_eq!(
            "ls".parse::<ControlDeviceField>().unwrap(),
            ControlDeviceField::LightLevel
        );
        assert!(matches!(
            "xx".parse::<ControlDeviceField>(),
            Err(AppError::NotFound(_))
        ));
    }
}
