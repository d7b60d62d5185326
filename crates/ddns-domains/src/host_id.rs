//! IPv6 host IDs
//!
//! A host ID is the interface part of an IPv6 address. It is either an
//! explicit suffix (`::1`, parsed against a known prefix length) or a MAC
//! address expanded into a modified EUI-64 interface identifier.

use std::fmt;
use std::net::{IpAddr, Ipv6Addr};

use ipnet::Ipv6Net;
use serde::{Serialize, Serializer};

use crate::error::{HostIdError, MacParseError};

/// Largest prefix that still leaves room for an EUI-64 interface identifier
pub const EUI48_MAX_PREFIX_LEN: u8 = 64;

/// The host part of an IPv6 address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostId {
    /// Raw 128-bit suffix and the prefix length it was parsed against
    Ip6Suffix { bytes: [u8; 16], prefix_len: u8 },
    /// MAC (EUI-48) address
    Eui48([u8; 6]),
}

/// Bitmask keeping the low `8 - s` bits of a byte
fn low_bits(s: u8) -> u8 {
    0xff >> s
}

impl HostId {
    /// Parse a host ID for an IPv6 network of `prefix_len` bits
    ///
    /// Returns `Ok(None)` for an empty string.
    ///
    /// # Example
    ///
    /// ```
    /// use ddns_domains::HostId;
    ///
    /// let mac = HostId::parse("aa-bb-cc-dd-ee-ff", 64).unwrap();
    /// assert_eq!(mac, Some(HostId::Eui48([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff])));
    /// assert_eq!(HostId::parse("", 64).unwrap(), None);
    /// ```
    pub fn parse(s: &str, prefix_len: u8) -> Result<Option<Self>, HostIdError> {
        if s.is_empty() {
            return Ok(None);
        }

        match s.parse::<IpAddr>() {
            Ok(IpAddr::V4(ip)) => return Err(HostIdError::Ip4Address(ip)),
            Ok(IpAddr::V6(ip)) => {
                if prefix_len > 128 {
                    return Err(HostIdError::InvalidPrefixLength(prefix_len));
                }
                return Ok(Some(Self::Ip6Suffix {
                    bytes: ip.octets(),
                    prefix_len,
                }));
            }
            Err(ip_err) => {
                if let Some((addr, _zone)) = s.split_once('%') {
                    if addr.parse::<Ipv6Addr>().is_ok() {
                        return Err(HostIdError::HasIp6Zone);
                    }
                }

                match parse_eui48(s) {
                    Ok(_) if prefix_len > EUI48_MAX_PREFIX_LEN => {
                        Err(HostIdError::SubnetTooSmall(prefix_len))
                    }
                    Ok(mac) => Ok(Some(Self::Eui48(mac))),
                    Err(mac_err) => Err(HostIdError::NotHostId {
                        ip: ip_err,
                        mac: mac_err,
                    }),
                }
            }
        }
    }

    /// Clear the bits covered by the prefix
    ///
    /// A MAC-derived ID always occupies the low 64 bits and is returned as is.
    pub fn mask(&self) -> Self {
        match *self {
            Self::Ip6Suffix {
                mut bytes,
                prefix_len,
            } => {
                let full = usize::from(prefix_len / 8).min(bytes.len());
                bytes[..full].fill(0);
                if let Some(boundary) = bytes.get_mut(full) {
                    *boundary &= low_bits(prefix_len % 8);
                }
                Self::Ip6Suffix { bytes, prefix_len }
            }
            Self::Eui48(_) => *self,
        }
    }

    /// Combine with a network prefix into a full address
    ///
    /// Returns `None` when the prefix length does not fit this host ID.
    pub fn with_prefix(&self, prefix: &Ipv6Net) -> Option<Ipv6Addr> {
        let network = prefix.network().octets();
        match self.mask() {
            Self::Ip6Suffix {
                mut bytes,
                prefix_len,
            } => {
                if prefix.prefix_len() != prefix_len {
                    return None;
                }
                for (b, n) in bytes.iter_mut().zip(network) {
                    *b |= n;
                }
                Some(Ipv6Addr::from(bytes))
            }
            Self::Eui48(mac) => {
                if prefix.prefix_len() > EUI48_MAX_PREFIX_LEN {
                    return None;
                }
                let mut bytes = [0u8; 16];
                bytes[..8].copy_from_slice(&network[..8]);
                bytes[8..].copy_from_slice(&[
                    mac[0] ^ 0x02, // flip the universal/local bit
                    mac[1],
                    mac[2],
                    0xff,
                    0xfe,
                    mac[3],
                    mac[4],
                    mac[5],
                ]);
                Some(Ipv6Addr::from(bytes))
            }
        }
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip6Suffix { bytes, .. } => write!(f, "{}", Ipv6Addr::from(*bytes)),
            Self::Eui48(mac) => write!(
                f,
                "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
                mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
            ),
        }
    }
}

impl Serialize for HostId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse `aa:bb:cc:dd:ee:ff`, `aa-bb-cc-dd-ee-ff` or `aabb.ccdd.eeff`
fn parse_eui48(s: &str) -> Result<[u8; 6], MacParseError> {
    let mut mac = [0u8; 6];

    let hex_byte = |part: &str| -> Result<u8, MacParseError> {
        if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(MacParseError);
        }
        u8::from_str_radix(part, 16).map_err(|_| MacParseError)
    };

    if s.len() == 17 {
        let separator = if s.contains(':') { ':' } else { '-' };
        let mut count = 0;
        for (i, part) in s.split(separator).enumerate() {
            let slot = mac.get_mut(i).ok_or(MacParseError)?;
            *slot = hex_byte(part)?;
            count += 1;
        }
        if count != mac.len() {
            return Err(MacParseError);
        }
        return Ok(mac);
    }

    if s.len() == 14 {
        let mut count = 0;
        for (i, group) in s.split('.').enumerate() {
            if group.len() != 4 || !group.is_ascii() || i >= 3 {
                return Err(MacParseError);
            }
            mac[2 * i] = hex_byte(&group[..2])?;
            mac[2 * i + 1] = hex_byte(&group[2..])?;
            count += 1;
        }
        if count != 3 {
            return Err(MacParseError);
        }
        return Ok(mac);
    }

    Err(MacParseError)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffix(bytes: [u8; 16], prefix_len: u8) -> HostId {
        HostId::Ip6Suffix { bytes, prefix_len }
    }

    #[test]
    fn test_parse_eui48_forms() {
        let expected = [0x00, 0x00, 0x5e, 0x00, 0x53, 0x01];
        assert_eq!(parse_eui48("00:00:5e:00:53:01"), Ok(expected));
        assert_eq!(parse_eui48("00-00-5E-00-53-01"), Ok(expected));
        assert_eq!(parse_eui48("0000.5e00.5301"), Ok(expected));
        assert_eq!(parse_eui48("00:00:5e-00:53:01"), Err(MacParseError));
        assert_eq!(parse_eui48("+0:00:5e:00:53:01"), Err(MacParseError));
        assert_eq!(parse_eui48("00:00:5e:00:53"), Err(MacParseError));
        assert_eq!(parse_eui48("0000.5e00.53.1"), Err(MacParseError));
    }

    #[test]
    fn test_mask() {
        let all = suffix([0xff; 16], 40).mask();
        let mut expected = [0xff; 16];
        expected[..5].fill(0);
        assert_eq!(all, suffix(expected, 40));

        let mut expected = [0xff; 16];
        expected[..5].fill(0);
        expected[5] = 0x0f;
        assert_eq!(suffix([0xff; 16], 44).mask(), suffix(expected, 44));

        assert_eq!(suffix([0xff; 16], 128).mask(), suffix([0; 16], 128));
        assert_eq!(suffix([0xff; 16], 0).mask(), suffix([0xff; 16], 0));

        let mac = HostId::Eui48([1, 2, 3, 4, 5, 6]);
        assert_eq!(mac.mask(), mac);
    }

    #[test]
    fn test_display() {
        let id = suffix(
            [
                0x00, 0x00, 0x00, 0x00, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc,
                0xdd, 0xee, 0xff,
            ],
            64,
        );
        assert_eq!(id.to_string(), "::4455:6677:8899:aabb:ccdd:eeff");
        assert_eq!(
            HostId::Eui48([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]).to_string(),
            "aa:bb:cc:dd:ee:ff"
        );
    }
}
