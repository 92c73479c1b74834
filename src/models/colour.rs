//! DALI DT8 colour commands (`set_colour`).
//!
//! A colour value is a fixed record of 16 fields. Each field carries an
//! active flag; inactive fields hold their bit-width sentinel and are
//! serialized with `<name>_isMask: true`, which the gateway reads as
//! "leave unchanged". Only the fields of the selected colour type are
//! active.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::AppError;
use crate::models::destination::Destination;

/// Sentinel for inactive 16-bit fields.
pub const MASK_16: u16 = 65535;
/// Sentinel for inactive 8-bit colour-channel fields.
pub const MASK_8: u8 = 255;

pub const PRIMARY_FIELDS: [&str; 6] = ["p0", "p1", "p2", "p3", "p4", "p5"];
pub const RGBWAF_FIELDS: [&str; 6] = ["rr", "rg", "rb", "rw", "ra", "rf"];

const KELVIN_MIREK_PRODUCT: i64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourType {
    Xy,
    Tc,
    PrimaryN,
    Rgbwaf,
}

impl ColourType {
    pub const ALL: [ColourType; 4] = [
        ColourType::Xy,
        ColourType::Tc,
        ColourType::PrimaryN,
        ColourType::Rgbwaf,
    ];

    /// The `ctype` code on the wire.
    pub fn code(&self) -> u8 {
        match self {
            ColourType::Xy => 16,
            ColourType::Tc => 32,
            ColourType::PrimaryN => 64,
            ColourType::Rgbwaf => 128,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, AppError> {
        ColourType::ALL
            .into_iter()
            .find(|t| i64::from(t.code()) == code)
            .ok_or(AppError::InvalidColourType(code))
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ColourType::Xy => "xy-coordinate",
            ColourType::Tc => "colour temperature Tc",
            ColourType::PrimaryN => "primary N",
            ColourType::Rgbwaf => "RGBWAF",
        }
    }

    /// Caller-supplied component names, in argument order.
    pub fn component_names(&self) -> &'static [&'static str] {
        match self {
            ColourType::Xy => &["x-coordinate", "y-coordinate"],
            ColourType::Tc => &["Kelvin"],
            ColourType::PrimaryN => &[
                "primary N 0",
                "primary N 1",
                "primary N 2",
                "primary N 3",
                "primary N 4",
                "primary N 5",
            ],
            ColourType::Rgbwaf => &["Red", "Green", "Blue", "White", "Amber", "Freecolour"],
        }
    }
}

impl fmt::Display for ColourType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Which colour setting of the gear a command addresses (`cid`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourTarget {
    ActualLevel,
    PowerOnLevel,
    SystemFailureLevel,
    Scene(u8),
    WarmestTc,
    CoolestTc,
}

impl ColourTarget {
    pub const SCENE_COUNT: u8 = 16;

    /// All targets in gateway menu order.
    pub fn all() -> Vec<ColourTarget> {
        let mut targets = vec![
            ColourTarget::ActualLevel,
            ColourTarget::PowerOnLevel,
            ColourTarget::SystemFailureLevel,
        ];
        targets.extend((0..Self::SCENE_COUNT).map(ColourTarget::Scene));
        targets.push(ColourTarget::WarmestTc);
        targets.push(ColourTarget::CoolestTc);
        targets
    }

    pub fn id(&self) -> String {
        match self {
            ColourTarget::ActualLevel => "d8ac".into(),
            ColourTarget::PowerOnLevel => "d8tp".into(),
            ColourTarget::SystemFailureLevel => "d8tf".into(),
            ColourTarget::Scene(n) => format!("d8s{}", n),
            ColourTarget::WarmestTc => "d8tw".into(),
            ColourTarget::CoolestTc => "d8tc".into(),
        }
    }

    pub fn name(&self) -> String {
        match self {
            ColourTarget::ActualLevel => "Actual Level".into(),
            ColourTarget::PowerOnLevel => "Power On Level".into(),
            ColourTarget::SystemFailureLevel => "System Failure Level".into(),
            ColourTarget::Scene(n) => format!("Scene {}", n),
            ColourTarget::WarmestTc => "Warmest Tc".into(),
            ColourTarget::CoolestTc => "Coolest Tc".into(),
        }
    }
}

impl FromStr for ColourTarget {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        ColourTarget::all()
            .into_iter()
            .find(|target| target.id() == id)
            .ok_or_else(|| AppError::NotFound(format!("colour target '{}'", id)))
    }
}

/// Convert a colour temperature in Kelvin to Mirek, truncated to a whole
/// Mirek.
pub fn kelvin_to_mirek(kelvin: i64) -> Result<u16, AppError> {
    if kelvin <= 0 {
        return Err(AppError::InvalidColourValue(format!(
            "colour temperature must be positive, got {} K",
            kelvin
        )));
    }
    let mirek = KELVIN_MIREK_PRODUCT / kelvin;
    if mirek < 1 || mirek >= i64::from(MASK_16) {
        return Err(AppError::InvalidColourValue(format!(
            "{} K is outside the representable Mirek range",
            kelvin
        )));
    }
    Ok(mirek as u16)
}

/// Component values for exactly one colour type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourComponents {
    Xy { x: u16, y: u16 },
    Tc { mirek: u16 },
    PrimaryN([u16; 6]),
    Rgbwaf([u8; 6]),
}

fn component<T: TryFrom<i64>>(
    colour_type: ColourType,
    index: usize,
    value: i64,
    max: i64,
) -> Result<T, AppError> {
    T::try_from(value).map_err(|_| {
        AppError::InvalidColourValue(format!(
            "{} must be in [0, {}], got {}",
            colour_type.component_names()[index],
            max,
            value
        ))
    })
}

impl ColourComponents {
    /// Kelvin input for colour temperature.
    pub fn tc_kelvin(kelvin: i64) -> Result<Self, AppError> {
        Ok(ColourComponents::Tc {
            mirek: kelvin_to_mirek(kelvin)?,
        })
    }

    /// Parse the positional component values of `colour_type`: `x y`,
    /// `kelvin`, six primaries, or six RGBWAF channels.
    pub fn from_values(colour_type: ColourType, values: &[i64]) -> Result<Self, AppError> {
        let expected = colour_type.component_names().len();
        if values.len() != expected {
            return Err(AppError::InvalidColourValue(format!(
                "{} takes {} value(s) ({}), got {}",
                colour_type,
                expected,
                colour_type.component_names().join(", "),
                values.len()
            )));
        }

        let wide = |i: usize| component::<u16>(colour_type, i, values[i], i64::from(MASK_16));
        let narrow = |i: usize| component::<u8>(colour_type, i, values[i], i64::from(MASK_8));

        match colour_type {
            ColourType::Xy => Ok(ColourComponents::Xy {
                x: wide(0)?,
                y: wide(1)?,
            }),
            ColourType::Tc => ColourComponents::tc_kelvin(values[0]),
            ColourType::PrimaryN => {
                let mut primaries = [0u16; 6];
                for (i, slot) in primaries.iter_mut().enumerate() {
                    *slot = wide(i)?;
                }
                Ok(ColourComponents::PrimaryN(primaries))
            }
            ColourType::Rgbwaf => {
                let mut channels = [0u8; 6];
                for (i, slot) in channels.iter_mut().enumerate() {
                    *slot = narrow(i)?;
                }
                Ok(ColourComponents::Rgbwaf(channels))
            }
        }
    }

    pub fn colour_type(&self) -> ColourType {
        match self {
            ColourComponents::Xy { .. } => ColourType::Xy,
            ColourComponents::Tc { .. } => ColourType::Tc,
            ColourComponents::PrimaryN(_) => ColourType::PrimaryN,
            ColourComponents::Rgbwaf(_) => ColourType::Rgbwaf,
        }
    }
}

/// One field of a colour value record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColourField<T> {
    value: T,
    active: bool,
}

impl<T: Copy> ColourField<T> {
    fn masked(sentinel: T) -> Self {
        Self {
            value: sentinel,
            active: false,
        }
    }

    fn set(value: T) -> Self {
        Self {
            value,
            active: true,
        }
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// The `cvalue` payload: colour type plus the full masked field record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColourValue {
    colour_type: ColourType,
    ll: ColourField<u16>,
    xx: ColourField<u16>,
    xy: ColourField<u16>,
    tc: ColourField<u16>,
    primaries: [ColourField<u16>; 6],
    channels: [ColourField<u8>; 6],
}

impl ColourValue {
    fn all_masked(colour_type: ColourType) -> Self {
        Self {
            colour_type,
            ll: ColourField::masked(MASK_16),
            xx: ColourField::masked(MASK_16),
            xy: ColourField::masked(MASK_16),
            tc: ColourField::masked(MASK_16),
            primaries: [ColourField::masked(MASK_16); 6],
            channels: [ColourField::masked(MASK_8); 6],
        }
    }

    /// Build a fresh record with only the fields of `components` active.
    pub fn encode(components: &ColourComponents) -> Self {
        let mut record = ColourValue::all_masked(components.colour_type());
        match *components {
            ColourComponents::Xy { x, y } => {
                record.xx = ColourField::set(x);
                record.xy = ColourField::set(y);
            }
            ColourComponents::Tc { mirek } => {
                record.tc = ColourField::set(mirek);
            }
            ColourComponents::PrimaryN(values) => {
                record.primaries = values.map(ColourField::set);
            }
            ColourComponents::Rgbwaf(values) => {
                record.channels = values.map(ColourField::set);
            }
        }
        record
    }

    pub fn colour_type(&self) -> ColourType {
        self.colour_type
    }

    /// Every field as `(name, value, active)`, in wire order. 8-bit fields
    /// are widened.
    pub fn fields(&self) -> Vec<(&'static str, u16, bool)> {
        let mut fields = vec![
            ("ll", self.ll.value(), self.ll.is_active()),
            ("xx", self.xx.value(), self.xx.is_active()),
            ("xy", self.xy.value(), self.xy.is_active()),
            ("tc", self.tc.value(), self.tc.is_active()),
        ];
        for (name, field) in PRIMARY_FIELDS.iter().zip(&self.primaries) {
            fields.push((*name, field.value(), field.is_active()));
        }
        for (name, field) in RGBWAF_FIELDS.iter().zip(&self.channels) {
            fields.push((*name, u16::from(field.value()), field.is_active()));
        }
        fields
    }

    pub fn active_fields(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(_, _, active)| *active)
            .map(|(name, _, _)| name)
            .collect()
    }
}

/// Field values first, then their `_isMask` companions.
struct FieldRecord<'a>(&'a ColourValue);

impl Serialize for FieldRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.0.fields();
        let mut map = serializer.serialize_map(Some(fields.len() * 2))?;
        for (name, value, _) in &fields {
            map.serialize_entry(name, value)?;
        }
        for (name, _, active) in &fields {
            map.serialize_entry(&format!("{}_isMask", name), &!active)?;
        }
        map.end()
    }
}

impl Serialize for ColourValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", &self.colour_type.code())?;
        map.serialize_entry("value", &FieldRecord(self))?;
        map.end()
    }
}

/// A complete, validated `set_colour` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColourCommand {
    pub destination: Destination,
    pub target: ColourTarget,
    pub value: ColourValue,
}

impl ColourCommand {
    pub fn new(destination: Destination, target: ColourTarget, components: &ColourComponents) -> Self {
        Self {
            destination,
            target,
            value: ColourValue::encode(components),
        }
    }

    /// Validate raw `cid`, `ctype` and component values and build the command.
    pub fn from_raw(
        destination: Destination,
        target_id: &str,
        colour_type: i64,
        values: &[i64],
    ) -> Result<Self, AppError> {
        let target: ColourTarget = target_id.parse()?;
        let colour_type = ColourType::from_code(colour_type)?;
        let components = ColourComponents::from_values(colour_type, values)?;
        Ok(Self::new(destination, target, &components))
    }
}
