use alloc::vec::Vec;
use core::fmt;
use core::net::IpAddr;
use core::str::FromStr;

use crate::parser::AddrParseError;
use crate::{Ipv4Address, Ipv6Address, SpecialRange};

/// The address family of a value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddrKind {
    Ipv4,
    Ipv6,
}

impl AddrKind {
    /// `"ipv4"` or `"ipv6"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            AddrKind::Ipv4 => "ipv4",
            AddrKind::Ipv6 => "ipv6",
        }
    }

    /// Width of an address of this family in bits.
    pub const fn bits(self) -> u8 {
        match self {
            AddrKind::Ipv4 => Ipv4Address::BITS,
            AddrKind::Ipv6 => Ipv6Address::BITS,
        }
    }
}

impl fmt::Display for AddrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An address value of either family.
///
/// # Examples
///
/// ```
/// use ipaddr_value::{AddrKind, IpAddress};
///
/// let addr: IpAddress = "::ffff:10.1.2.3".parse().unwrap();
/// assert_eq!(addr.kind(), AddrKind::Ipv6);
/// assert_eq!(addr.process().to_string(), "10.1.2.3");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IpAddress {
    V4(Ipv4Address),
    V6(Ipv6Address),
}

impl IpAddress {
    /// The family of this address.
    pub const fn kind(&self) -> AddrKind {
        match self {
            IpAddress::V4(_) => AddrKind::Ipv4,
            IpAddress::V6(_) => AddrKind::Ipv6,
        }
    }

    /// Returns `true` for an IPv4 value.
    pub const fn is_ipv4(&self) -> bool {
        matches!(self, IpAddress::V4(_))
    }

    /// Returns `true` for an IPv6 value.
    pub const fn is_ipv6(&self) -> bool {
        matches!(self, IpAddress::V6(_))
    }

    /// Returns `true` if `text` is a valid address of either family.
    pub fn is_valid(text: &str) -> bool {
        Ipv6Address::is_valid(text) || Ipv4Address::is_valid(text)
    }

    /// Parses text of either family. Text containing a `:` is parsed as
    /// IPv6, anything else as IPv4 in any of its accepted notations.
    ///
    /// # Errors
    /// Fails with the error of the family the text was parsed as.
    pub fn parse(text: &str) -> Result<IpAddress, AddrParseError> {
        if text.contains(':') {
            Ipv6Address::parse(text).map(IpAddress::V6)
        } else {
            Ipv4Address::parse(text).map(IpAddress::V4)
        }
    }

    /// Parses `address/prefix` of either family.
    ///
    /// # Errors
    /// Fails like [`Ipv4Address::parse_cidr`] or [`Ipv6Address::parse_cidr`].
    pub fn parse_cidr(text: &str) -> Result<(IpAddress, u8), AddrParseError> {
        if text.contains(':') {
            Ipv6Address::parse_cidr(text).map(|(addr, len)| (IpAddress::V6(addr), len))
        } else {
            Ipv4Address::parse_cidr(text).map(|(addr, len)| (IpAddress::V4(addr), len))
        }
    }

    /// Builds an address from 4 or 16 bytes.
    ///
    /// # Errors
    /// Fails for any other length.
    pub fn from_byte_array(bytes: &[u8]) -> Result<IpAddress, AddrParseError> {
        if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
            Ok(IpAddress::V4(Ipv4Address::from(octets)))
        } else if let Ok(bytes) = <[u8; 16]>::try_from(bytes) {
            Ok(IpAddress::V6(Ipv6Address::from(bytes)))
        } else {
            Err(AddrParseError::ByteLength { found: bytes.len() })
        }
    }

    /// Network-order bytes: 4 for IPv4, 16 for IPv6.
    pub fn to_byte_array(&self) -> Vec<u8> {
        match self {
            IpAddress::V4(addr) => addr.octets().to_vec(),
            IpAddress::V6(addr) => addr.to_byte_array().to_vec(),
        }
    }

    /// Unwraps an IPv4-mapped IPv6 address into IPv4. Other addresses are
    /// returned as they are.
    pub fn process(self) -> IpAddress {
        match self {
            IpAddress::V6(addr) => addr.to_ipv4().map_or(self, IpAddress::V4),
            IpAddress::V4(_) => self,
        }
    }

    /// Prefix match within one family. Addresses of different families never
    /// match.
    pub fn matches(&self, other: &IpAddress, prefix_len: u8) -> bool {
        match (self, other) {
            (IpAddress::V4(a), IpAddress::V4(b)) => a.matches(b, prefix_len),
            (IpAddress::V6(a), IpAddress::V6(b)) => a.matches(b, prefix_len),
            _ => false,
        }
    }

    /// [`IpAddress::matches`] against a pair from [`IpAddress::parse_cidr`].
    pub fn matches_cidr(&self, cidr: &(IpAddress, u8)) -> bool {
        self.matches(&cidr.0, cidr.1)
    }

    /// The special-purpose block this address falls in.
    pub fn range(&self) -> SpecialRange {
        match self {
            IpAddress::V4(addr) => addr.range(),
            IpAddress::V6(addr) => addr.range(),
        }
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpAddress::V4(addr) => fmt::Display::fmt(addr, f),
            IpAddress::V6(addr) => fmt::Display::fmt(addr, f),
        }
    }
}

impl FromStr for IpAddress {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IpAddress::parse(s)
    }
}

impl From<Ipv4Address> for IpAddress {
    fn from(addr: Ipv4Address) -> IpAddress {
        IpAddress::V4(addr)
    }
}

impl From<Ipv6Address> for IpAddress {
    fn from(addr: Ipv6Address) -> IpAddress {
        IpAddress::V6(addr)
    }
}

impl From<IpAddr> for IpAddress {
    fn from(addr: IpAddr) -> IpAddress {
        match addr {
            IpAddr::V4(addr) => IpAddress::V4(addr.into()),
            IpAddr::V6(addr) => IpAddress::V6(addr.into()),
        }
    }
}

impl From<IpAddress> for IpAddr {
    fn from(addr: IpAddress) -> IpAddr {
        match addr {
            IpAddress::V4(addr) => IpAddr::V4(addr.into()),
            IpAddress::V6(addr) => IpAddr::V6(addr.into()),
        }
    }
}
