//! IPv4 CIDR value type.
//!
//! Provides [`Ipv4`] for representing address blocks in CIDR notation,
//! plus the octet-shifting helpers used when cloning a topology into a
//! disaster-recovery region.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum prefix length for an IPv4 CIDR block (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Highest value an octet may be shifted to when bumping address space.
pub const OCTET_CAP: u8 = 254;

/// IPv4 address block in CIDR notation.
#[derive(Eq, Ord, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The network address.
    pub addr: Ipv4Addr,
    /// The prefix length (0-32).
    pub mask: u8,
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/16").
    pub fn new(addr_cidr: &str) -> Result<Ipv4, Box<dyn Error>> {
        let addr_cidr = addr_cidr.trim();
        let parts: Vec<&str> = addr_cidr.split('/').collect();
        if parts.len() != 2 {
            return Err("Invalid address/mask".into());
        }
        let addr: Ipv4Addr = parts[0]
            .parse()
            .map_err(|_| format!("Invalid address {}", parts[0]))?;
        let mask: u8 = parts[1].parse()?;
        if mask > MAX_LENGTH {
            return Err("Network length is too long".into());
        }
        Ok(Ipv4 { addr, mask })
    }

    /// Return a copy with the second octet increased by `inc`, capped at
    /// [`OCTET_CAP`]. Used to move a cloned VNet into fresh address space.
    pub fn shift_octet2(&self, inc: u8) -> Ipv4 {
        let mut octets = self.addr.octets();
        octets[1] = octets[1].saturating_add(inc).min(OCTET_CAP);
        Ipv4 {
            addr: Ipv4Addr::from(octets),
            mask: self.mask,
        }
    }

    /// Return a copy with both the second and third octet increased by
    /// `inc`, capped at [`OCTET_CAP`]. Cloned subnets follow their parent
    /// VNet's second-octet shift so they stay nested inside it.
    pub fn shift_octet2_and_3(&self, inc: u8) -> Ipv4 {
        let mut octets = self.addr.octets();
        octets[1] = octets[1].saturating_add(inc).min(OCTET_CAP);
        octets[2] = octets[2].saturating_add(inc).min(OCTET_CAP);
        Ipv4 {
            addr: Ipv4Addr::from(octets),
            mask: self.mask,
        }
    }

    /// True when `other` is fully contained within this block.
    pub fn contains(&self, other: &Ipv4) -> bool {
        if other.mask < self.mask {
            return false;
        }
        let right_len = u32::from(MAX_LENGTH - self.mask);
        let self_net = (u64::from(u32::from(self.addr)) >> right_len) << right_len;
        let other_net = (u64::from(u32::from(other.addr)) >> right_len) << right_len;
        self_net == other_net
    }
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let cidr = format!("{}/{}", self.addr, self.mask);
        serializer.serialize_str(&cidr)
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 {
            return Err(de::Error::custom(format!("invalid CIDR format: {}", s)));
        }

        let addr = Ipv4Addr::from_str(parts[0])
            .map_err(|_| de::Error::custom(format!("invalid IP address: {}", parts[0])))?;
        let mask = u8::from_str(parts[1])
            .map_err(|_| de::Error::custom(format!("invalid subnet mask: {}", parts[1])))?;

        Ok(Ipv4 { addr, mask })
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl PartialEq for Ipv4 {
    fn eq(&self, other: &Ipv4) -> bool {
        self.addr == other.addr && self.mask == other.mask
    }
}

impl PartialOrd for Ipv4 {
    fn partial_cmp(&self, other: &Ipv4) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_display() {
        let ip = Ipv4::new("10.0.0.0/16").unwrap();
        assert_eq!(ip.to_string(), "10.0.0.0/16");
        assert_eq!(ip.mask, 16);
        assert!(Ipv4::new("10.0.0.0").is_err());
        assert!(Ipv4::new("10.0.0.0/33").is_err());
        assert!(Ipv4::new("999.0.0.0/16").is_err());
    }

    #[test]
    fn test_shift_octet2() {
        let ip = Ipv4::new("10.0.0.0/16").unwrap();
        assert_eq!(ip.shift_octet2(100), Ipv4::new("10.100.0.0/16").unwrap());
        // cap at 254
        let high = Ipv4::new("10.200.0.0/16").unwrap();
        assert_eq!(high.shift_octet2(100), Ipv4::new("10.254.0.0/16").unwrap());
    }

    #[test]
    fn test_shift_octet2_and_3() {
        let ip = Ipv4::new("10.1.2.0/24").unwrap();
        assert_eq!(
            ip.shift_octet2_and_3(100),
            Ipv4::new("10.101.102.0/24").unwrap()
        );
        let high = Ipv4::new("10.250.250.0/24").unwrap();
        assert_eq!(
            high.shift_octet2_and_3(100),
            Ipv4::new("10.254.254.0/24").unwrap()
        );
    }

    #[test]
    fn test_contains() {
        let vnet = Ipv4::new("10.0.0.0/16").unwrap();
        let subnet = Ipv4::new("10.0.1.0/24").unwrap();
        let outside = Ipv4::new("10.1.1.0/24").unwrap();
        assert!(vnet.contains(&subnet), "subnet should nest in vnet");
        assert!(!vnet.contains(&outside), "outside block must not nest");
        assert!(
            !subnet.contains(&vnet),
            "larger block cannot nest in smaller"
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let ip = Ipv4::new("10.0.0.32/27").unwrap();
        let json = serde_json::to_string(&ip).unwrap();
        assert_eq!(json, "\"10.0.0.32/27\"");
        let back: Ipv4 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ip);
    }

    #[test]
    fn test_ordering() {
        let ip1 = Ipv4::new("10.0.0.1/24").unwrap();
        let ip2 = Ipv4::new("10.0.0.2/24").unwrap();
        assert!(ip1 < ip2);
    }
}
