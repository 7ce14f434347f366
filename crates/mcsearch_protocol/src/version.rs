use std::fmt;

use crate::types::VarInt;

/// Protocol version numbers for different Minecraft versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version(i32);

impl Version {
    /// Protocol version for Minecraft 1.20.1
    pub const V1_20_1: Version = Version(763);
    /// Protocol version for Minecraft 1.20.2
    pub const V1_20_2: Version = Version(764);
    /// Protocol version for Minecraft 1.20.3 and 1.20.4
    pub const V1_20_4: Version = Version(765);
    /// Protocol version for Minecraft 1.21 and 1.21.1
    pub const V1_21: Version = Version(767);
    /// Protocol version for Minecraft 1.21.4
    pub const V1_21_4: Version = Version(769);

    /// Version announced in the handshake unless the caller picks another.
    /// Servers answer status queries for any version number.
    pub const DEFAULT: Version = Self::V1_20_4;

    pub const fn new(protocol: i32) -> Self {
        Version(protocol)
    }

    pub const fn protocol_number(&self) -> i32 {
        self.0
    }

    pub fn name(&self) -> &'static str {
        match self.0 {
            763 => "1.20.1",
            764 => "1.20.2",
            765 => "1.20.4",
            767 => "1.21.1",
            769 => "1.21.4",
            _ => "Unknown Version",
        }
    }

    pub fn to_varint(&self) -> VarInt {
        VarInt(self.0)
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<i32> for Version {
    fn from(protocol: i32) -> Self {
        Version(protocol)
    }
}

impl From<Version> for i32 {
    fn from(version: Version) -> Self {
        version.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_version() {
        assert_eq!(Version::default().protocol_number(), 765);
        assert_eq!(Version::default().to_varint(), VarInt(765));
    }

    #[test]
    fn test_version_display() {
        assert_eq!(format!("{}", Version::V1_20_4), "1.20.4 (765)");
        assert_eq!(format!("{}", Version::new(5)), "Unknown Version (5)");
    }

    #[test]
    fn test_version_conversion() {
        let version = Version::from(769);
        assert_eq!(version, Version::V1_21_4);
        assert_eq!(i32::from(version), 769);
    }
}
