use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::AppError;
use crate::models::catalog::{VariableDefinition, VariableKind};

/// A variable value in the form the gateway expects in `va`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireValue {
    Integer(i64),
    /// Scaled integer of a one-decimal variable.
    Scaled(i64),
    /// Passed through unchanged.
    Raw(String),
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireValue::Integer(n) => write!(f, "{}", n),
            // The gateway receives scaled levels in float notation, e.g. "900.0".
            WireValue::Scaled(n) => write!(f, "{}.0", n),
            WireValue::Raw(s) => f.write_str(s),
        }
    }
}

/// `va` is always sent as a JSON string.
impl Serialize for WireValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A decoded variable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DomainValue {
    Decimal(f64),
    Raw(serde_json::Value),
}

impl DomainValue {
    /// Integer view of the value, accepting numeric strings.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DomainValue::Decimal(_) => None,
            DomainValue::Raw(value) => value
                .as_i64()
                .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok())),
        }
    }
}

fn parse_integer(def: &VariableDefinition, raw: &str) -> Result<i64, AppError> {
    raw.trim().parse::<i64>().map_err(|_| {
        AppError::InvalidInput(format!(
            "'{}' is not an integer value for '{}'",
            raw, def.id
        ))
    })
}

fn check_range(def: &VariableDefinition, value: i64) -> Result<i64, AppError> {
    match def.bounds() {
        Some((min, max)) if !(min..=max).contains(&value) => Err(AppError::OutOfRange {
            id: def.id.to_string(),
            value,
            min,
            max,
        }),
        _ => Ok(value),
    }
}

/// Encode a raw caller value for `def`, applying scaling and range checks.
pub fn encode(def: &VariableDefinition, raw: &str) -> Result<WireValue, AppError> {
    match def.kind {
        VariableKind::Number { .. } | VariableKind::Bitmask { .. } => {
            let value = parse_integer(def, raw)?;
            check_range(def, value).map(WireValue::Integer)
        }
        VariableKind::ScaledNumber { scale, .. } => {
            let value: f64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|v: &f64| v.is_finite())
                .ok_or_else(|| {
                    AppError::InvalidInput(format!(
                        "'{}' is not a decimal value for '{}'",
                        raw, def.id
                    ))
                })?;
            let scaled = (value * scale as f64).round() as i64;
            check_range(def, scaled).map(WireValue::Scaled)
        }
        VariableKind::Enumerated { .. } | VariableKind::Text => {
            Ok(WireValue::Raw(raw.to_string()))
        }
    }
}

/// Decode a `va` value from a gateway response using the same rules as
/// [`encode`].
pub fn decode(def: &VariableDefinition, wire: &serde_json::Value) -> Result<DomainValue, AppError> {
    match def.kind {
        VariableKind::ScaledNumber { scale, .. } => {
            let scaled = wire
                .as_f64()
                .or_else(|| wire.as_str().and_then(|s| s.trim().parse().ok()))
                .ok_or_else(|| {
                    AppError::Decode(format!("'{}' has non-numeric value {}", def.id, wire))
                })?;
            Ok(DomainValue::Decimal(scaled.round() / scale as f64))
        }
        _ => Ok(DomainValue::Raw(wire.clone())),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::catalog::lookup_by_id;

    #[test]
    fn test_scaled_encode() {
        let dval = lookup_by_id("dval").unwrap();
        assert_eq!(encode(dval, "90").unwrap(), WireValue::Scaled(900));
        assert_eq!(encode(dval, "90").unwrap().to_string(), "900.0");
        assert_eq!(encode(dval, "10.0").unwrap(), WireValue::Scaled(100));
        assert_eq!(encode(dval, "12.34").unwrap(), WireValue::Scaled(123));
    }

    #[test]
    fn test_scaled_range_boundary() {
        let dval = lookup_by_id("dval").unwrap();
        assert_eq!(encode(dval, "100.0").unwrap(), WireValue::Scaled(1000));
        match encode(dval, "100.1") {
            Err(AppError::OutOfRange { value, max, .. }) => {
                assert_eq!(value, 1001);
                assert_eq!(max, 1000);
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(encode(dval, "-0.1").is_err());
        assert!(matches!(
            encode(lookup_by_id("dvnl").unwrap(), "0"),
            Err(AppError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_scaled_round_trip() {
        let dval = lookup_by_id("dval").unwrap();
        for tenths in 0..=1000 {
            let raw = format!("{:.1}", tenths as f64 / 10.0);
            let wire = encode(dval, &raw).unwrap();
            let decoded = decode(dval, &json!(wire.to_string())).unwrap();
            assert_eq!(decoded, DomainValue::Decimal(tenths as f64 / 10.0), "{}", raw);
        }
    }

    #[test]
    fn test_scaled_decode_accepts_numbers() {
        let dval = lookup_by_id("dval").unwrap();
        assert_eq!(decode(dval, &json!(100)).unwrap(), DomainValue::Decimal(10.0));
        assert_eq!(decode(dval, &json!("255")).unwrap(), DomainValue::Decimal(25.5));
        assert!(matches!(
            decode(dval, &json!("abc")),
            Err(AppError::Decode(_))
        ));
    }

    #[test]
    fn test_number_encode() {
        let dvsa = lookup_by_id("dvsa").unwrap();
        assert_eq!(encode(dvsa, "63").unwrap(), WireValue::Integer(63));
        assert!(matches!(
            encode(dvsa, "64"),
            Err(AppError::OutOfRange { .. })
        ));
        assert!(matches!(
            encode(dvsa, "4.5"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_bitmask_range() {
        let dvgr = lookup_by_id("dvgr").unwrap();
        assert_eq!(encode(dvgr, "7").unwrap(), WireValue::Integer(7));
        assert_eq!(encode(dvgr, "65535").unwrap().to_string(), "65535");
        assert!(matches!(
            encode(dvgr, "65536"),
            Err(AppError::OutOfRange { max: 65535, .. })
        ));
        assert!(matches!(
            encode(dvgr, "abc"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_passthrough_kinds() {
        let name = lookup_by_id("na").unwrap();
        assert_eq!(
            encode(name, "Hall 1").unwrap(),
            WireValue::Raw("Hall 1".into())
        );
        let fade_time = lookup_by_id("dvft").unwrap();
        assert_eq!(encode(fade_time, "2").unwrap().to_string(), "2");
        assert_eq!(
            decode(fade_time, &json!(2)).unwrap(),
            DomainValue::Raw(json!(2))
        );
        assert_eq!(decode(fade_time, &json!("2")).unwrap().as_i64(), Some(2));
    }

    #[test]
    fn test_wire_value_serializes_as_string() {
        let json = serde_json::to_string(&WireValue::Scaled(900)).unwrap();
        assert_eq!(json, r#""900.0""#);
        let json = serde_json::to_string(&WireValue::Integer(7)).unwrap();
        assert_eq!(json, r#""7""#);
    }
}
