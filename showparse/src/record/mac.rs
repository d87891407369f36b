//! MAC address value type.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A 48-bit IEEE MAC address.
///
/// Accepts the notations network devices print:
///
/// ```text
/// 02e5.7847.6000        Cisco dotted (1-4 hex digits per group)
/// 02:e5:78:47:60:00     colon separated
/// 02-E5-78-47-60-00     dash separated
/// 2.e5.78.47.60.0       dotted octets
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress([u8; 6]);

/// Error returned when text is not a MAC address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid MAC address: '{0}'")]
pub struct ParseMacError(String);

impl MacAddress {
    /// Create a MAC address from its six octets.
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// The six octets.
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Format in Cisco dotted notation (`02e5.7847.6000`).
    pub fn to_dotted(&self) -> String {
        let o = self.0;
        format!(
            "{:02x}{:02x}.{:02x}{:02x}.{:02x}{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

impl FromStr for MacAddress {
    type Err = ParseMacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMacError(s.to_string());

        let (groups, width): (Vec<&str>, usize) = if s.contains(':') {
            (s.split(':').collect(), 2)
        } else if s.contains('-') {
            (s.split('-').collect(), 2)
        } else {
            let groups: Vec<&str> = s.split('.').collect();
            match groups.len() {
                3 => (groups, 4),
                6 => (groups, 2),
                _ => return Err(err()),
            }
        };

        let expected = if width == 4 { 3 } else { 6 };
        if groups.len() != expected {
            return Err(err());
        }

        let mut value: u64 = 0;
        for group in groups {
            if group.is_empty()
                || group.len() > width
                || !group.bytes().all(|b| b.is_ascii_hexdigit())
            {
                return Err(err());
            }
            let n = u64::from_str_radix(group, 16).map_err(|_| err())?;
            value = (value << (width * 4)) | n;
        }

        let bytes = value.to_be_bytes();
        let mut octets = [0u8; 6];
        octets.copy_from_slice(&bytes[2..]);
        Ok(Self(octets))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl Serialize for MacAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED: MacAddress = MacAddress::new([0x02, 0xe5, 0x78, 0x47, 0x60, 0x00]);

    #[test]
    fn test_parse_notations() {
        assert_eq!("02e5.7847.6000".parse::<MacAddress>().unwrap(), EXPECTED);
        assert_eq!("02:e5:78:47:60:00".parse::<MacAddress>().unwrap(), EXPECTED);
        assert_eq!("02-E5-78-47-60-00".parse::<MacAddress>().unwrap(), EXPECTED);
        assert_eq!("2.e5.78.47.60.0".parse::<MacAddress>().unwrap(), EXPECTED);
    }

    #[test]
    fn test_short_dotted_groups() {
        let mac: MacAddress = "0.0.1".parse().unwrap();
        assert_eq!(mac.octets(), [0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("Local".parse::<MacAddress>().is_err());
        assert!("02e5.7847".parse::<MacAddress>().is_err());
        assert!("02e5.7847.60000".parse::<MacAddress>().is_err());
        assert!("zz:e5:78:47:60:00".parse::<MacAddress>().is_err());
    }

    #[test]
    fn test_display_and_dotted() {
        assert_eq!(EXPECTED.to_string(), "02:e5:78:47:60:00");
        assert_eq!(EXPECTED.to_dotted(), "02e5.7847.6000");
    }
}
