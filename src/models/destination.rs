use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

pub const MIN_CHANNEL: i64 = 1;
pub const MAX_CHANNEL: i64 = 4;
pub const MAX_LAMP_INDEX: i64 = 63;
pub const MAX_GROUP_INDEX: i64 = 15;
/// Index value meaning "no index" for channel-wide destinations.
pub const CHANNEL_INDEX: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationKind {
    Lamp,
    Group,
    Channel,
}

impl DestinationKind {
    pub const ALL: [DestinationKind; 3] = [
        DestinationKind::Lamp,
        DestinationKind::Group,
        DestinationKind::Channel,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            DestinationKind::Lamp => "lamp",
            DestinationKind::Group => "group",
            DestinationKind::Channel => "channel",
        }
    }
}

impl fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Accepts the gateway menu codes (`1`, `2`, `3`) as well as the names.
impl FromStr for DestinationKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "lamp" => Ok(DestinationKind::Lamp),
            "2" | "group" => Ok(DestinationKind::Group),
            "3" | "channel" => Ok(DestinationKind::Channel),
            other => Err(AppError::InvalidDestination(format!(
                "unknown destination '{}'. Use 1/lamp, 2/group or 3/channel",
                other
            ))),
        }
    }
}

/// A validated addressing target: one lamp, one group, or a whole channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    channel: u8,
    kind: DestinationKind,
    index: i8,
}

impl Destination {
    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn kind(&self) -> DestinationKind {
        self.kind
    }

    /// Lamp or group index, or `-1` for a channel.
    pub fn index(&self) -> i8 {
        self.index
    }
}

/// Bound violation of a channel number, if any.
pub fn check_channel(channel: i64) -> Option<String> {
    if (MIN_CHANNEL..=MAX_CHANNEL).contains(&channel) {
        None
    } else {
        Some(format!(
            "channel {} is outside [{}, {}]",
            channel, MIN_CHANNEL, MAX_CHANNEL
        ))
    }
}

/// Validate a raw (channel, kind, index) triple.
///
/// Every violated bound is reported, not just the first one.
pub fn resolve(channel: i64, kind: DestinationKind, index: i64) -> Result<Destination, AppError> {
    let mut problems: Vec<String> = check_channel(channel).into_iter().collect();

    match kind {
        DestinationKind::Lamp if !(0..=MAX_LAMP_INDEX).contains(&index) => {
            problems.push(format!(
                "lamp index {} is outside [0, {}]",
                index, MAX_LAMP_INDEX
            ));
        }
        DestinationKind::Group if !(0..=MAX_GROUP_INDEX).contains(&index) => {
            problems.push(format!(
                "group index {} is outside [0, {}]",
                index, MAX_GROUP_INDEX
            ));
        }
        DestinationKind::Channel if index != CHANNEL_INDEX => {
            problems.push(format!(
                "channel index must be {}, got {}",
                CHANNEL_INDEX, index
            ));
        }
        _ => {}
    }

    if !problems.is_empty() {
        return Err(AppError::InvalidDestination(problems.join("; ")));
    }

    Ok(Destination {
        channel: channel as u8,
        kind,
        index: index as i8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_channel() {
        assert_eq!(check_channel(1), None);
        assert_eq!(check_channel(4), None);
        assert_eq!(check_channel(5).unwrap(), "channel 5 is outside [1, 4]");
        assert!(check_channel(0).is_some());
    }

    #[test]
    fn test_channel_bounds() {
        for channel in 1..=4 {
            assert!(resolve(channel, DestinationKind::Channel, -1).is_ok());
        }
        for channel in [-1, 0, 5, 255] {
            assert!(matches!(
                resolve(channel, DestinationKind::Channel, -1),
                Err(AppError::InvalidDestination(_))
            ));
        }
    }

    #[test]
    fn test_lamp_bounds() {
        for index in 0..=63 {
            let dest = resolve(1, DestinationKind::Lamp, index).unwrap();
            assert_eq!(dest.index() as i64, index);
        }
        assert!(resolve(1, DestinationKind::Lamp, 64).is_err());
        assert!(resolve(1, DestinationKind::Lamp, -1).is_err());
    }

    #[test]
    fn test_group_bounds() {
        for index in 0..=15 {
            assert!(resolve(2, DestinationKind::Group, index).is_ok());
        }
        assert!(resolve(2, DestinationKind::Group, 16).is_err());
        assert!(resolve(2, DestinationKind::Group, -1).is_err());
    }

    #[test]
    fn test_channel_requires_sentinel() {
        let dest = resolve(3, DestinationKind::Channel, -1).unwrap();
        assert_eq!(dest.channel(), 3);
        assert_eq!(dest.kind(), DestinationKind::Channel);
        assert_eq!(dest.index(), -1);
        assert!(resolve(3, DestinationKind::Channel, 0).is_err());
        assert!(resolve(3, DestinationKind::Channel, 5).is_err());
    }

    #[test]
    fn test_all_violations_reported() {
        match resolve(9, DestinationKind::Lamp, 64) {
            Err(AppError::InvalidDestination(msg)) => {
                assert!(msg.contains("channel 9"));
                assert!(msg.contains("lamp index 64"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("1".parse::<DestinationKind>().unwrap(), DestinationKind::Lamp);
        assert_eq!("group".parse::<DestinationKind>().unwrap(), DestinationKind::Group);
        assert_eq!("Channel".parse::<DestinationKind>().unwrap(), DestinationKind::Channel);
        assert!("4".parse::<DestinationKind>().is_err());
    }
}
