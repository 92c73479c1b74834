use serde_json::json;

use crate::error::AppError;

/// Wire scale of the one-decimal level variables (`nb10` on the gateway).
pub const LEVEL_SCALE: i64 = 10;

/// How a variable's value is validated, encoded and decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// Integer sent as-is.
    Number { min: i64, max: i64 },
    /// One-decimal value sent as `round(value * scale)`. Bounds apply to the
    /// scaled integer.
    ScaledNumber { min: i64, max: i64, scale: i64 },
    /// Discrete step code; each code has a display label.
    Enumerated {
        options: &'static [(i64, &'static str)],
    },
    /// Group membership, one bit per group.
    Bitmask { bits: u32 },
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: VariableKind,
}

const FADE_RATE_OPTIONS: &[(i64, &str)] = &[
    (1, "358"),
    (2, "253"),
    (3, "179"),
    (4, "127"),
    (5, "89.4"),
    (6, "63.3"),
    (7, "44.7"),
    (8, "31.6"),
    (9, "22.4"),
    (10, "15.8"),
    (11, "11.2"),
    (12, "7.9"),
    (13, "5.6"),
    (14, "4.0"),
    (15, "2.8"),
];

const FADE_TIME_OPTIONS: &[(i64, &str)] = &[
    (0, "No fade"),
    (1, "0.7"),
    (2, "1.0"),
    (3, "1.4"),
    (4, "2.0"),
    (5, "2.8"),
    (6, "4.0"),
    (7, "5.7"),
    (8, "8.0"),
    (9, "11.3"),
    (10, "16.0"),
    (11, "22.6"),
    (12, "32.0"),
    (13, "45.3"),
    (14, "64.0"),
    (15, "90.5"),
];

const fn level(id: &'static str, label: &'static str, min: i64) -> VariableDefinition {
    VariableDefinition {
        id,
        label,
        kind: VariableKind::ScaledNumber {
            min,
            max: 1000,
            scale: LEVEL_SCALE,
        },
    }
}

/// Device variables exposed by `get_device` / `set_device`, in menu order.
pub const CATALOG: &[VariableDefinition] = &[
    level("dval", "Actual Level %", 0),
    VariableDefinition {
        id: "na",
        label: "Name",
        kind: VariableKind::Text,
    },
    level("dvpl", "Power On Level %", 0),
    level("dvsl", "System Failure Level %", 0),
    level("dvnl", "Minimum Level %", 1),
    level("dvxl", "Maximum Level %", 10),
    VariableDefinition {
        id: "dvfr",
        label: "Fade Rate steps/s",
        kind: VariableKind::Enumerated {
            options: FADE_RATE_OPTIONS,
        },
    },
    VariableDefinition {
        id: "dvft",
        label: "Fade Time seconds",
        kind: VariableKind::Enumerated {
            options: FADE_TIME_OPTIONS,
        },
    },
    VariableDefinition {
        id: "dvgr",
        label: "Groups",
        kind: VariableKind::Bitmask { bits: 16 },
    },
    VariableDefinition {
        id: "dvsa",
        label: "Short Address",
        kind: VariableKind::Number { min: 0, max: 63 },
    },
    VariableDefinition {
        id: "dvrh",
        label: "Run Hours (seconds)",
        kind: VariableKind::Number {
            min: 0,
            max: i32::MAX as i64,
        },
    },
    VariableDefinition {
        id: "dvbi",
        label: "Burn-In (seconds)",
        kind: VariableKind::Number {
            min: 0,
            max: i32::MAX as i64,
        },
    },
];

pub fn lookup_by_id(id: &str) -> Result<&'static VariableDefinition, AppError> {
    CATALOG
        .iter()
        .find(|def| def.id == id)
        .ok_or_else(|| AppError::NotFound(format!("variable '{}'", id)))
}

impl VariableKind {
    pub fn name(&self) -> &'static str {
        match self {
            VariableKind::Number { .. } => "number",
            VariableKind::ScaledNumber { .. } => "scaled",
            VariableKind::Enumerated { .. } => "enumerated",
            VariableKind::Bitmask { .. } => "bitmask",
            VariableKind::Text => "text",
        }
    }
}

impl VariableDefinition {
    /// Inclusive wire-level bounds, if the variable has any.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        match self.kind {
            VariableKind::Number { min, max } | VariableKind::ScaledNumber { min, max, .. } => {
                Some((min, max))
            }
            VariableKind::Bitmask { bits } => Some((0, (1i64 << bits) - 1)),
            VariableKind::Enumerated { .. } | VariableKind::Text => None,
        }
    }

    pub fn option_label(&self, code: i64) -> Option<&'static str> {
        match self.kind {
            VariableKind::Enumerated { options } => options
                .iter()
                .find(|(c, _)| *c == code)
                .map(|(_, label)| *label),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = json!({
            "id": self.id,
            "label": self.label,
            "kind": self.kind.name(),
        });
        if let Some((min, max)) = self.bounds() {
            obj["min"] = json!(min);
            obj["max"] = json!(max);
        }
        if let VariableKind::ScaledNumber { scale, .. } = self.kind {
            obj["scale"] = json!(scale);
        }
        if let VariableKind::Enumerated { options } = self.kind {
            obj["options"] = options
                .iter()
                .map(|(code, label)| json!({"code": code, "label": label}))
                .collect();
        }
        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_ids() {
        for id in [
            "dval", "na", "dvpl", "dvsl", "dvnl", "dvxl", "dvfr", "dvft", "dvgr", "dvsa", "dvrh",
            "dvbi",
        ] {
            assert_eq!(lookup_by_id(id).unwrap().id, id);
        }
        assert_eq!(CATALOG.len(), 12);
    }

    #[test]
    fn test_lookup_unknown_id() {
        assert!(matches!(lookup_by_id("dvzz"), Err(AppError::NotFound(_))));
        assert!(matches!(lookup_by_id(""), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_level_bounds() {
        let dval = lookup_by_id("dval").unwrap();
        assert_eq!(dval.bounds(), Some((0, 1000)));
        assert_eq!(lookup_by_id("dvnl").unwrap().bounds(), Some((1, 1000)));
        assert_eq!(lookup_by_id("dvxl").unwrap().bounds(), Some((10, 1000)));
        assert_eq!(lookup_by_id("dvgr").unwrap().bounds(), Some((0, 65535)));
        assert_eq!(lookup_by_id("na").unwrap().bounds(), None);
    }

    #[test]
    fn test_option_label() {
        let fade_time = lookup_by_id("dvft").unwrap();
        assert_eq!(fade_time.option_label(0), Some("No fade"));
        assert_eq!(fade_time.option_label(2), Some("1.0"));
        assert_eq!(fade_time.option_label(16), None);
        assert_eq!(lookup_by_id("dval").unwrap().option_label(2), None);
    }

    #[test]
    fn test_to_json() {
        let json = lookup_by_id("dvfr").unwrap().to_json();
        assert_eq!(json["kind"], "enumerated");
        assert_eq!(json["options"][0]["code"], 1);
        assert_eq!(json["options"][0]["label"], "358");

        let json = lookup_by_id("dval").unwrap().to_json();
        assert_eq!(json["scale"], 10);
        assert_eq!(json["max"], 1000);
    }
}
