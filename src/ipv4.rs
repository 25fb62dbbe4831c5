use core::fmt;
use core::net::Ipv4Addr;
use core::str::FromStr;

use crate::mask::{ipv4_mask_to_prefix, ipv4_prefix_bits, ipv4_prefix_to_mask};
use crate::parser::{self, AddrParseError, Ipv4Groups};
use crate::range::{self, SpecialRange};
use crate::{AddrKind, Ipv6Address};

/// An IPv4 address value.
///
/// Besides dotted-quad, parsing accepts the legacy notations `inet_aton`
/// does: octal (`0250`) and hex (`0xc0`) groups, and fewer than four groups
/// where the last one absorbs the remaining octets (`192.168.257`,
/// `3232235777`, `0xc0a80101`).
///
/// # Examples
///
/// ```
/// use ipaddr_value::{Ipv4Address, SpecialRange};
///
/// let addr = Ipv4Address::parse("0xc0a80101").unwrap();
/// assert_eq!(addr.octets(), [192, 168, 1, 1]);
/// assert_eq!(addr.to_string(), "192.168.1.1");
/// assert_eq!(addr.range(), SpecialRange::Private);
///
/// let cidr = Ipv4Address::parse_cidr("192.168.0.0/16").unwrap();
/// assert!(addr.matches_cidr(&cidr));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ipv4Address {
    octets: [u8; 4],
}

impl Ipv4Address {
    /// Width of the address in bits.
    pub const BITS: u8 = 32;

    /// Builds `a.b.c.d`.
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Ipv4Address {
        Ipv4Address {
            octets: [a, b, c, d],
        }
    }

    /// Builds an address from exactly four octet values.
    ///
    /// # Errors
    /// Fails if the slice does not hold four elements or an element does not
    /// fit in 8 bits.
    pub fn from_slice(octets: &[u32]) -> Result<Ipv4Address, AddrParseError> {
        let &[a, b, c, d] = octets else {
            return Err(AddrParseError::Length {
                kind: AddrKind::Ipv4,
                found: octets.len(),
            });
        };

        let mut out = [0u8; 4];
        for (octet, value) in out.iter_mut().zip([a, b, c, d]) {
            *octet = u8::try_from(value).map_err(|_| AddrParseError::OutOfRange {
                kind: AddrKind::Ipv4,
                value,
            })?;
        }
        Ok(Ipv4Address::from(out))
    }

    /// The four octets, most significant first.
    pub const fn octets(&self) -> [u8; 4] {
        self.octets
    }

    /// Always [`AddrKind::Ipv4`].
    pub const fn kind(&self) -> AddrKind {
        AddrKind::Ipv4
    }

    /// Lenient check that `text` has the shape of an IPv4 address in any of
    /// the accepted notations. Leading groups are not bounded to 255, so
    /// `1024.0.0.1` passes; use [`is_valid`](Self::is_valid) for that.
    pub fn is_ipv4(text: &str) -> bool {
        Ipv4Groups::split(text).is_some()
    }

    /// Returns `true` if `text` parses to an address.
    pub fn is_valid(text: &str) -> bool {
        parser::parse_ipv4(text).is_ok()
    }

    /// Returns `true` only for conventional dotted-quad: four decimal groups
    /// without leading zeros, each at most 255.
    pub fn is_valid_four_part_decimal(text: &str) -> bool {
        Ipv4Groups::split(text)
            .is_some_and(|groups| groups.is_four_part_decimal() && groups.collapse().is_ok())
    }

    /// Parses any accepted IPv4 notation.
    ///
    /// # Errors
    /// Fails on malformed numerals, more than four groups, or any octet
    /// (after collapsing) above 255.
    pub fn parse(text: &str) -> Result<Ipv4Address, AddrParseError> {
        parser::parse_ipv4(text).map(Ipv4Address::from)
    }

    /// Parses `address/prefix` with a prefix of at most 32.
    ///
    /// # Errors
    /// Fails when there is no single `/`, the prefix is not a plain decimal
    /// number up to 32, or the address part does not parse.
    pub fn parse_cidr(text: &str) -> Result<(Ipv4Address, u8), AddrParseError> {
        let (address, prefix_len) = parser::split_cidr(text, Self::BITS)?;
        Ok((Ipv4Address::parse(address)?, prefix_len))
    }

    /// Returns `true` if the top `prefix_len` bits of both addresses are
    /// equal. A prefix of 0 always matches; prefixes above 32 compare the
    /// whole address.
    pub fn matches(&self, other: &Ipv4Address, prefix_len: u8) -> bool {
        let mask = ipv4_prefix_bits(prefix_len);
        u32::from(*self) & mask == u32::from(*other) & mask
    }

    /// Same as [`matches`](Self::matches) with the output of
    /// [`parse_cidr`](Self::parse_cidr).
    pub fn matches_cidr(&self, cidr: &(Ipv4Address, u8)) -> bool {
        self.matches(&cidr.0, cidr.1)
    }

    /// The special-purpose block this address falls in, or
    /// [`SpecialRange::Unicast`].
    pub fn range(&self) -> SpecialRange {
        range::classify_ipv4(self)
    }

    /// Returns the `::ffff:a.b.c.d` form of this address.
    pub fn to_ipv4_mapped(&self) -> Ipv6Address {
        let [a, b, c, d] = self.octets;
        Ipv6Address::new(
            0,
            0,
            0,
            0,
            0,
            0xffff,
            u16::from_be_bytes([a, b]),
            u16::from_be_bytes([c, d]),
        )
    }

    /// Interprets this address as a subnet mask and returns its prefix
    /// length.
    ///
    /// # Errors
    /// Fails if the one bits are not contiguous from the top.
    pub fn prefix_length_from_subnet_mask(&self) -> Result<u8, AddrParseError> {
        ipv4_mask_to_prefix(*self)
    }

    /// The mask with the top `prefix_len` bits set, e.g. `255.255.240.0`
    /// for 20.
    ///
    /// # Errors
    /// Fails if `prefix_len` is above 32.
    pub fn subnet_mask_from_prefix_length(prefix_len: u8) -> Result<Ipv4Address, AddrParseError> {
        ipv4_prefix_to_mask(prefix_len)
    }

    /// The first address of the block `text` names, e.g. `10.0.0.0` for
    /// `10.1.2.3/8`.
    ///
    /// # Errors
    /// Fails like [`parse_cidr`](Self::parse_cidr).
    pub fn network_address_from_cidr(text: &str) -> Result<Ipv4Address, AddrParseError> {
        let (addr, prefix_len) = Ipv4Address::parse_cidr(text)?;
        Ok(Ipv4Address::from(u32::from(addr) & ipv4_prefix_bits(prefix_len)))
    }

    /// The last address of the block `text` names, e.g. `10.255.255.255`
    /// for `10.1.2.3/8`.
    ///
    /// # Errors
    /// Fails like [`parse_cidr`](Self::parse_cidr).
    pub fn broadcast_address_from_cidr(text: &str) -> Result<Ipv4Address, AddrParseError> {
        let (addr, prefix_len) = Ipv4Address::parse_cidr(text)?;
        Ok(Ipv4Address::from(u32::from(addr) | !ipv4_prefix_bits(prefix_len)))
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets;
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

impl FromStr for Ipv4Address {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4Address::parse(s)
    }
}

impl From<[u8; 4]> for Ipv4Address {
    fn from(octets: [u8; 4]) -> Ipv4Address {
        Ipv4Address { octets }
    }
}

impl From<u32> for Ipv4Address {
    fn from(bits: u32) -> Ipv4Address {
        Ipv4Address::from(bits.to_be_bytes())
    }
}

impl From<Ipv4Address> for u32 {
    fn from(addr: Ipv4Address) -> u32 {
        u32::from_be_bytes(addr.octets)
    }
}

impl From<Ipv4Addr> for Ipv4Address {
    fn from(addr: Ipv4Addr) -> Ipv4Address {
        Ipv4Address::from(addr.octets())
    }
}

impl From<Ipv4Address> for Ipv4Addr {
    fn from(addr: Ipv4Address) -> Ipv4Addr {
        Ipv4Addr::from(addr.octets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_from_slice() {
        assert_eq!(
            Ipv4Address::from_slice(&[192, 168, 1, 2]),
            Ok(Ipv4Address::new(192, 168, 1, 2))
        );
        assert_eq!(
            Ipv4Address::from_slice(&[300, 1, 2, 3]),
            Err(AddrParseError::OutOfRange {
                kind: AddrKind::Ipv4,
                value: 300
            })
        );
        assert_eq!(
            Ipv4Address::from_slice(&[8, 8, 8]),
            Err(AddrParseError::Length {
                kind: AddrKind::Ipv4,
                found: 3
            })
        );
    }

    #[test]
    fn test_display_and_kind() {
        let addr = Ipv4Address::new(192, 168, 1, 1);
        assert_eq!(addr.to_string(), "192.168.1.1");
        assert_eq!(addr.kind(), AddrKind::Ipv4);
        assert_eq!(Ipv4Address::new(42, 0, 0, 0).octets()[0], 42);
    }

    #[test]
    fn test_format_checks() {
        assert!(Ipv4Address::is_ipv4("192.168.007.0xa"));
        assert!(Ipv4Address::is_ipv4("1024.0.0.1"));
        assert!(!Ipv4Address::is_ipv4("8.0xa.wtf.6"));
        assert!(!Ipv4Address::is_ipv4(""));

        assert!(Ipv4Address::is_valid("192.168.007.0xa"));
        assert!(!Ipv4Address::is_valid("1024.0.0.1"));
        assert!(!Ipv4Address::is_valid("8.0xa.wtf.6"));

        assert!(Ipv4Address::is_valid_four_part_decimal("192.168.1.1"));
        assert!(!Ipv4Address::is_valid_four_part_decimal("0xc0.168.1.1"));
        assert!(!Ipv4Address::is_valid_four_part_decimal("256.168.1.1"));
    }

    #[test]
    fn test_matches() {
        let addr = Ipv4Address::new(10, 5, 0, 1);
        let parse = |s| Ipv4Address::parse(s).unwrap();

        assert!(addr.matches(&parse("0.0.0.0"), 0));
        assert!(!addr.matches(&parse("11.0.0.0"), 8));
        assert!(addr.matches(&parse("10.0.0.0"), 8));
        assert!(addr.matches(&parse("10.5.5.0"), 16));
        assert!(!addr.matches(&parse("10.4.5.0"), 16));
        assert!(addr.matches(&parse("10.4.5.0"), 15));
        assert!(!addr.matches(&parse("10.5.0.2"), 32));
        assert!(addr.matches(&addr, 32));
        assert!(!addr.matches(&parse("10.5.0.2"), 99));
    }

    #[test]
    fn test_cidr_addresses() {
        assert_eq!(
            Ipv4Address::network_address_from_cidr("192.168.1.134/26"),
            Ok(Ipv4Address::new(192, 168, 1, 128))
        );
        assert_eq!(
            Ipv4Address::broadcast_address_from_cidr("192.168.1.134/26"),
            Ok(Ipv4Address::new(192, 168, 1, 191))
        );
        assert_eq!(
            Ipv4Address::broadcast_address_from_cidr("172.0.0.1/0"),
            Ok(Ipv4Address::new(255, 255, 255, 255))
        );
        assert!(Ipv4Address::network_address_from_cidr("10.0.0.1").is_err());
    }

    #[test]
    fn test_subnet_masks() {
        assert_eq!(
            Ipv4Address::new(255, 255, 254, 0).prefix_length_from_subnet_mask(),
            Ok(23)
        );
        assert_eq!(
            Ipv4Address::new(255, 255, 255, 1).prefix_length_from_subnet_mask(),
            Err(AddrParseError::Mask)
        );
        assert_eq!(
            Ipv4Address::subnet_mask_from_prefix_length(26),
            Ok(Ipv4Address::new(255, 255, 255, 192))
        );
    }

    #[test]
    fn test_core_net_conversions() {
        let addr = Ipv4Address::new(127, 0, 0, 1);
        assert_eq!(Ipv4Addr::from(addr), Ipv4Addr::LOCALHOST);
        assert_eq!(Ipv4Address::from(Ipv4Addr::LOCALHOST), addr);
        assert_eq!(u32::from(addr), 0x7f00_0001);
        assert_eq!(addr.to_ipv4_mapped().to_string(), "::ffff:7f00:1");
    }
}
