//! Text decoding shared by the IPv4 and IPv6 address types.
//!
//! IPv4 text is decoded group by group into raw numerals and then
//! "collapsed" into four octets, following the rules of the classic
//! `inet_aton`. IPv6 text is lexed into the groups on either side of an
//! optional `::` plus an optional embedded IPv4 tail, and only expanded to
//! eight groups when a strict result is asked for.

use crate::AddrKind;
use thiserror::Error;
use tracing::{debug, trace};

/// An error which can be returned when constructing or parsing an address
/// value.
///
/// This is the single error type of the crate. The variant names the reason
/// the input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AddrParseError {
    /// The text is not in any recognised notation for the address family.
    #[error("invalid {kind} address syntax")]
    Syntax { kind: AddrKind },

    /// Wrong number of octets, groups or bytes for the address family.
    #[error("wrong number of {kind} address elements: {found}")]
    Length { kind: AddrKind, found: usize },

    /// A numeral does not fit in the bits it has to supply.
    #[error("{kind} address element {value:#x} is out of range")]
    OutOfRange { kind: AddrKind, value: u32 },

    /// An IPv6 address with more than one `::`.
    #[error("IPv6 address contains more than one `::`")]
    DoubleCompression,

    /// Text that is not of the form `address/prefix`.
    #[error("malformed CIDR notation")]
    Cidr,

    /// A prefix length longer than the address family allows.
    #[error("prefix length {found} exceeds {max}")]
    PrefixLen { max: u8, found: u32 },

    /// A byte array that is neither 4 nor 16 bytes long.
    #[error("expected 4 or 16 address bytes, got {found}")]
    ByteLength { found: usize },

    /// A subnet mask whose one bits are not contiguous.
    #[error("invalid subnet mask")]
    Mask,

    /// An IPv6 address outside `::ffff:0:0/96`.
    #[error("IPv6 address is not IPv4-mapped")]
    NotIpv4Mapped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Radix {
    Decimal,
    Octal,
    Hex,
}

impl Radix {
    const fn base(self) -> u32 {
        match self {
            Radix::Decimal => 10,
            Radix::Octal => 8,
            Radix::Hex => 16,
        }
    }
}

/// Decodes one IPv4 group. `0x`/`0X` selects hex, a `0` followed by more
/// digits selects octal, anything else is decimal. Values wider than 32 bits
/// are rejected.
fn decode_numeral(group: &str) -> Option<(u32, Radix)> {
    let (radix, digits) = match group.as_bytes() {
        [b'0', b'x' | b'X', rest @ ..] => (Radix::Hex, rest),
        [b'0', rest @ ..] if !rest.is_empty() => (Radix::Octal, rest),
        bytes => (Radix::Decimal, bytes),
    };
    if digits.is_empty() {
        return None;
    }

    let base = radix.base();
    let mut value: u32 = 0;
    for &byte in digits {
        let digit = char::from(byte).to_digit(base)?;
        value = value.checked_mul(base)?.checked_add(digit)?;
    }
    Some((value, radix))
}

/// The 1 to 4 groups of an IPv4 string, decoded but not yet collapsed.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Ipv4Groups {
    values: [u32; 4],
    radixes: [Radix; 4],
    len: usize,
}

impl Ipv4Groups {
    /// Lenient split: every group must be a valid numeral and, with fewer
    /// than four groups, the last one must fit in the octets it absorbs.
    /// Leading groups are not bounded to 255 here.
    pub(crate) fn split(text: &str) -> Option<Self> {
        let mut groups = Ipv4Groups {
            values: [0; 4],
            radixes: [Radix::Decimal; 4],
            len: 0,
        };
        for group in text.split('.') {
            if groups.len == 4 {
                return None;
            }
            let (value, radix) = decode_numeral(group)?;
            groups.values[groups.len] = value;
            groups.radixes[groups.len] = radix;
            groups.len += 1;
        }

        let last = groups.values[groups.len - 1];
        if groups.len < 4 && u64::from(last) >> groups.tail_bits() != 0 {
            return None;
        }
        Some(groups)
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Bits the last group has to supply.
    fn tail_bits(&self) -> u32 {
        8 * (5 - self.len as u32)
    }

    /// Applies the collapsing rule: each leading group is one octet, the last
    /// group is split big-endian into the remaining octets.
    pub(crate) fn collapse(&self) -> Result<[u8; 4], AddrParseError> {
        let out_of_range = |value| AddrParseError::OutOfRange {
            kind: AddrKind::Ipv4,
            value,
        };

        let (&last, leading) = self.values[..self.len]
            .split_last()
            .ok_or(AddrParseError::Syntax {
                kind: AddrKind::Ipv4,
            })?;

        let mut octets = [0u8; 4];
        for (octet, &value) in octets.iter_mut().zip(leading) {
            *octet = u8::try_from(value).map_err(|_| out_of_range(value))?;
        }

        let absorbed = 4 - leading.len();
        let tail = last.to_be_bytes();
        if tail[..4 - absorbed].iter().any(|&byte| byte != 0) {
            return Err(out_of_range(last));
        }
        octets[leading.len()..].copy_from_slice(&tail[4 - absorbed..]);
        Ok(octets)
    }

    /// Exactly four plain decimal groups, i.e. conventional dotted-quad.
    pub(crate) fn is_four_part_decimal(&self) -> bool {
        self.len == 4 && self.radixes.iter().all(|&radix| radix == Radix::Decimal)
    }
}

pub(crate) fn parse_ipv4(text: &str) -> Result<[u8; 4], AddrParseError> {
    let Some(groups) = Ipv4Groups::split(text) else {
        trace!(input = text, "rejected IPv4 text");
        return Err(AddrParseError::Syntax {
            kind: AddrKind::Ipv4,
        });
    };
    let octets = groups.collapse()?;
    if !groups.is_four_part_decimal() {
        debug!(input = text, groups = groups.len(), "accepted legacy IPv4 notation");
    }
    Ok(octets)
}

/// An IPv4 tail inside IPv6 text: four groups of any radix, octets bounded.
fn parse_embedded_ipv4(text: &str) -> Result<[u8; 4], AddrParseError> {
    match Ipv4Groups::split(text) {
        Some(groups) if groups.len() == 4 => groups.collapse(),
        _ => Err(AddrParseError::Syntax {
            kind: AddrKind::Ipv4,
        }),
    }
}

/// Colon separated groups of one side of a `::`. An empty side has none.
fn hex_groups(side: &str) -> impl Iterator<Item = &str> {
    (!side.is_empty()).then(|| side.split(':')).into_iter().flatten()
}

fn decode_hex_group(group: &str) -> Result<u16, AddrParseError> {
    let syntax = AddrParseError::Syntax {
        kind: AddrKind::Ipv6,
    };
    if group.len() > 4 {
        // Wider than 32 bits there is no value worth reporting.
        return Err(u32::from_str_radix(group, 16).map_or(syntax, |value| {
            AddrParseError::OutOfRange {
                kind: AddrKind::Ipv6,
                value,
            }
        }));
    }
    u16::from_str_radix(group, 16).map_err(|_| syntax)
}

/// IPv6 text split around its optional `::` and optional IPv4 tail.
///
/// Lexing only checks the shape of the text: groups are non-empty runs of
/// hex digits of any width and their number is unbounded. [`expand`] does
/// the strict part.
///
/// [`expand`]: Ipv6Layout::expand
#[derive(Debug, Clone, Copy)]
pub(crate) struct Ipv6Layout<'a> {
    head: &'a str,
    tail: Option<&'a str>,
    ipv4: Option<[u8; 4]>,
}

impl<'a> Ipv6Layout<'a> {
    pub(crate) fn lex(text: &'a str) -> Result<Self, AddrParseError> {
        let syntax = AddrParseError::Syntax {
            kind: AddrKind::Ipv6,
        };

        if text.matches("::").count() > 1 {
            return Err(AddrParseError::DoubleCompression);
        }

        let last_colon = text.rfind(':').ok_or(syntax)?;
        let (hex, ipv4) = if text[last_colon + 1..].contains('.') {
            let ipv4 = parse_embedded_ipv4(&text[last_colon + 1..])?;
            // Keep a `::` that directly precedes the IPv4 tail.
            let hex = if text[..=last_colon].ends_with("::") {
                &text[..=last_colon]
            } else {
                &text[..last_colon]
            };
            (hex, Some(ipv4))
        } else {
            (text, None)
        };

        let (head, tail) = match hex.split_once("::") {
            Some((head, tail)) => (head, Some(tail)),
            None => (hex, None),
        };
        if tail.is_none() && head.is_empty() {
            return Err(syntax);
        }

        let well_formed = hex_groups(head)
            .chain(tail.into_iter().flat_map(hex_groups))
            .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_hexdigit()));
        if !well_formed {
            return Err(syntax);
        }

        Ok(Ipv6Layout { head, tail, ipv4 })
    }

    /// Expands `::` and checks that exactly eight 16-bit groups result.
    pub(crate) fn expand(&self) -> Result<[u16; 8], AddrParseError> {
        let tail = self.tail.unwrap_or("");
        let head_len = hex_groups(self.head).count();
        let tail_len = hex_groups(tail).count() + if self.ipv4.is_some() { 2 } else { 0 };
        let explicit = head_len + tail_len;

        // `::` may stand for no group at all, as in `1:2:3:4:5:6:7::8`.
        let fits = match self.tail {
            Some(_) => explicit <= 8,
            None => explicit == 8,
        };
        if !fits {
            return Err(AddrParseError::Length {
                kind: AddrKind::Ipv6,
                found: explicit,
            });
        }

        let mut parts = [0u16; 8];
        for (part, group) in parts.iter_mut().zip(hex_groups(self.head)) {
            *part = decode_hex_group(group)?;
        }
        for (part, group) in parts[8 - tail_len..].iter_mut().zip(hex_groups(tail)) {
            *part = decode_hex_group(group)?;
        }
        if let Some([a, b, c, d]) = self.ipv4 {
            parts[6] = u16::from_be_bytes([a, b]);
            parts[7] = u16::from_be_bytes([c, d]);
        }
        Ok(parts)
    }
}

pub(crate) fn parse_ipv6(text: &str) -> Result<[u16; 8], AddrParseError> {
    Ipv6Layout::lex(text)
        .and_then(|layout| layout.expand())
        .inspect_err(|err| trace!(input = text, %err, "rejected IPv6 text"))
}

/// Splits `address/prefix` and bounds the prefix by `max`. The prefix must be
/// plain decimal digits, so signs and whitespace are rejected; leading zeros
/// are fine.
pub(crate) fn split_cidr(text: &str, max: u8) -> Result<(&str, u8), AddrParseError> {
    let (address, prefix) = text.split_once('/').ok_or(AddrParseError::Cidr)?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        trace!(input = text, "rejected CIDR prefix");
        return Err(AddrParseError::Cidr);
    }

    let found: u32 = prefix.parse().map_err(|_| AddrParseError::Cidr)?;
    if found > u32::from(max) {
        return Err(AddrParseError::PrefixLen { max, found });
    }
    let prefix_len = u8::try_from(found).map_err(|_| AddrParseError::Cidr)?;
    Ok((address, prefix_len))
}
