use alloc::string::{String, ToString};
use core::fmt;
use core::net::Ipv6Addr;
use core::str::FromStr;

use crate::mask::{ipv6_mask_to_prefix, ipv6_prefix_bits, ipv6_prefix_to_mask};
use crate::parser::{self, AddrParseError, Ipv6Layout};
use crate::range::{self, SpecialRange};
use crate::{AddrKind, Ipv4Address};

/// An IPv6 address value made of eight 16-bit groups.
///
/// `Display` renders the canonical form, where the longest run of two or
/// more zero groups is compressed to `::`.
/// [`to_normalized_string`](Self::to_normalized_string) renders every group.
///
/// # Examples
///
/// ```
/// use ipaddr_value::Ipv6Address;
///
/// let addr = Ipv6Address::parse("2001:db8:F53A::1").unwrap();
/// assert_eq!(addr.parts(), [0x2001, 0xdb8, 0xf53a, 0, 0, 0, 0, 1]);
/// assert_eq!(addr.to_string(), "2001:db8:f53a::1");
/// assert_eq!(addr.to_normalized_string(), "2001:db8:f53a:0:0:0:0:1");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ipv6Address {
    parts: [u16; 8],
}

impl Ipv6Address {
    /// Width of the address in bits.
    pub const BITS: u8 = 128;

    /// Builds an address from its eight groups, most significant first.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        a: u16,
        b: u16,
        c: u16,
        d: u16,
        e: u16,
        f: u16,
        g: u16,
        h: u16,
    ) -> Ipv6Address {
        Ipv6Address {
            parts: [a, b, c, d, e, f, g, h],
        }
    }

    /// Builds an address from either eight 16-bit groups or sixteen bytes.
    /// Bytes are folded pairwise, big-endian, into groups.
    ///
    /// # Errors
    /// Fails on any other length, or if an element does not fit in its
    /// width (16 bits for groups, 8 bits for bytes).
    pub fn from_slice(elements: &[u32]) -> Result<Ipv6Address, AddrParseError> {
        let out_of_range = |value| AddrParseError::OutOfRange {
            kind: AddrKind::Ipv6,
            value,
        };

        let mut parts = [0u16; 8];
        match elements.len() {
            8 => {
                for (part, &value) in parts.iter_mut().zip(elements) {
                    *part = u16::try_from(value).map_err(|_| out_of_range(value))?;
                }
            }
            16 => {
                for (part, pair) in parts.iter_mut().zip(elements.chunks_exact(2)) {
                    let hi = u8::try_from(pair[0]).map_err(|_| out_of_range(pair[0]))?;
                    let lo = u8::try_from(pair[1]).map_err(|_| out_of_range(pair[1]))?;
                    *part = u16::from_be_bytes([hi, lo]);
                }
            }
            found => {
                return Err(AddrParseError::Length {
                    kind: AddrKind::Ipv6,
                    found,
                })
            }
        }
        Ok(Ipv6Address { parts })
    }

    /// The eight 16-bit groups, most significant first.
    pub const fn parts(&self) -> [u16; 8] {
        self.parts
    }

    /// Always [`AddrKind::Ipv6`].
    pub const fn kind(&self) -> AddrKind {
        AddrKind::Ipv6
    }

    /// Lenient check that `text` has the shape of an IPv6 address: hex
    /// groups, at most one `::` and an optional IPv4 tail. Group width and
    /// count are not checked, so `200001::1` passes; use
    /// [`is_valid`](Self::is_valid) for that.
    pub fn is_ipv6(text: &str) -> bool {
        Ipv6Layout::lex(text).is_ok()
    }

    /// Returns `true` if `text` parses to an address.
    pub fn is_valid(text: &str) -> bool {
        parser::parse_ipv6(text).is_ok()
    }

    /// Parses the colon-hex form, with an optional `::` and IPv4 tail.
    ///
    /// # Errors
    /// Fails on more than one `::`, malformed or over-wide groups, an
    /// invalid IPv4 tail, or a group count other than eight after `::` is
    /// expanded.
    pub fn parse(text: &str) -> Result<Ipv6Address, AddrParseError> {
        parser::parse_ipv6(text).map(Ipv6Address::from)
    }

    /// Parses `address/prefix` with a prefix of at most 128.
    ///
    /// # Errors
    /// Fails when there is no single `/`, the prefix is not a plain decimal
    /// number up to 128, or the address part does not parse.
    pub fn parse_cidr(text: &str) -> Result<(Ipv6Address, u8), AddrParseError> {
        let (address, prefix_len) = parser::split_cidr(text, Self::BITS)?;
        Ok((Ipv6Address::parse(address)?, prefix_len))
    }

    /// Returns `true` if the top `prefix_len` bits of both addresses are
    /// equal. A prefix of 0 always matches; prefixes above 128 compare the
    /// whole address.
    pub fn matches(&self, other: &Ipv6Address, prefix_len: u8) -> bool {
        let mask = ipv6_prefix_bits(prefix_len);
        u128::from(*self) & mask == u128::from(*other) & mask
    }

    /// Same as [`matches`](Self::matches) with the output of
    /// [`parse_cidr`](Self::parse_cidr).
    pub fn matches_cidr(&self, cidr: &(Ipv6Address, u8)) -> bool {
        self.matches(&cidr.0, cidr.1)
    }

    /// The special-purpose block this address falls in, or
    /// [`SpecialRange::Unicast`].
    pub fn range(&self) -> SpecialRange {
        range::classify_ipv6(self)
    }

    /// All eight groups in lowercase hex, without compression.
    pub fn to_normalized_string(&self) -> String {
        Normalized(&self.parts).to_string()
    }

    /// The sixteen network-order bytes.
    pub fn to_byte_array(&self) -> [u8; 16] {
        u128::from(*self).to_be_bytes()
    }

    /// Returns `true` for addresses in `::ffff:0:0/96`.
    pub fn is_ipv4_mapped(&self) -> bool {
        self.range() == SpecialRange::Ipv4Mapped
    }

    /// Extracts the IPv4 address from an IPv4-mapped address.
    ///
    /// # Errors
    /// Fails if the address is not IPv4-mapped.
    pub fn to_ipv4(&self) -> Result<Ipv4Address, AddrParseError> {
        if !self.is_ipv4_mapped() {
            return Err(AddrParseError::NotIpv4Mapped);
        }
        let [hi, lo] = [self.parts[6], self.parts[7]].map(u16::to_be_bytes);
        Ok(Ipv4Address::new(hi[0], hi[1], lo[0], lo[1]))
    }

    /// Interprets this address as a subnet mask and returns its prefix
    /// length, e.g. 64 for `ffff:ffff:ffff:ffff::`.
    ///
    /// # Errors
    /// Fails if the one bits are not contiguous from the top.
    pub fn prefix_length_from_subnet_mask(&self) -> Result<u8, AddrParseError> {
        ipv6_mask_to_prefix(*self)
    }

    /// The mask with the top `prefix_len` bits set.
    ///
    /// # Errors
    /// Fails if `prefix_len` is above 128.
    pub fn subnet_mask_from_prefix_length(prefix_len: u8) -> Result<Ipv6Address, AddrParseError> {
        ipv6_prefix_to_mask(prefix_len)
    }
}

/// Start and length of the longest run of at least two zero groups. Ties go
/// to the earliest run.
fn longest_zero_run(parts: &[u16; 8]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut start = 0;
    while start < parts.len() {
        if parts[start] != 0 {
            start += 1;
            continue;
        }
        let len = parts[start..].iter().take_while(|&&part| part == 0).count();
        if len >= 2 && best.map_or(true, |(_, best_len)| len > best_len) {
            best = Some((start, len));
        }
        start += len;
    }
    best
}

fn write_groups(f: &mut fmt::Formatter<'_>, groups: &[u16]) -> fmt::Result {
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            f.write_str(":")?;
        }
        write!(f, "{group:x}")?;
    }
    Ok(())
}

struct Normalized<'a>(&'a [u16; 8]);

impl fmt::Display for Normalized<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_groups(f, self.0)
    }
}

impl fmt::Display for Ipv6Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match longest_zero_run(&self.parts) {
            Some((start, len)) => {
                write_groups(f, &self.parts[..start])?;
                f.write_str("::")?;
                write_groups(f, &self.parts[start + len..])
            }
            None => write_groups(f, &self.parts),
        }
    }
}

impl FromStr for Ipv6Address {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv6Address::parse(s)
    }
}

impl From<[u16; 8]> for Ipv6Address {
    fn from(parts: [u16; 8]) -> Ipv6Address {
        Ipv6Address { parts }
    }
}

impl From<[u8; 16]> for Ipv6Address {
    fn from(bytes: [u8; 16]) -> Ipv6Address {
        Ipv6Address::from(u128::from_be_bytes(bytes))
    }
}

impl From<u128> for Ipv6Address {
    fn from(bits: u128) -> Ipv6Address {
        let mut parts = [0u16; 8];
        for (i, part) in parts.iter_mut().enumerate() {
            *part = (bits >> (112 - 16 * i)) as u16;
        }
        Ipv6Address { parts }
    }
}

impl From<Ipv6Address> for u128 {
    fn from(addr: Ipv6Address) -> u128 {
        addr.parts
            .iter()
            .fold(0, |bits, &part| (bits << 16) | u128::from(part))
    }
}

impl From<Ipv6Addr> for Ipv6Address {
    fn from(addr: Ipv6Addr) -> Ipv6Address {
        Ipv6Address::from(addr.segments())
    }
}

impl From<Ipv6Address> for Ipv6Addr {
    fn from(addr: Ipv6Address) -> Ipv6Addr {
        Ipv6Addr::from(addr.parts)
    }
}
