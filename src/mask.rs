//! Subnet masks in address form and the prefix lengths they stand for.
//!
//! A subnet mask is valid only when its one bits form a single run from the
//! most significant bit: `255.255.240.0` is a /20, `255.0.255.0` is not a
//! mask at all.

use crate::{AddrParseError, IpAddress, Ipv4Address, Ipv6Address};

/// Prefix length of a subnet mask of either family.
///
/// # Errors
/// Returns [`AddrParseError::Mask`] when the one bits are not contiguous
/// from the top.
pub fn ip_mask_to_prefix(mask: IpAddress) -> Result<u8, AddrParseError> {
    match mask {
        IpAddress::V4(mask) => ipv4_mask_to_prefix(mask),
        IpAddress::V6(mask) => ipv6_mask_to_prefix(mask),
    }
}

/// Prefix length of an IPv4 subnet mask.
///
/// ```
/// use ipaddr_value::{ipv4_mask_to_prefix, AddrParseError, Ipv4Address};
///
/// assert_eq!(ipv4_mask_to_prefix(Ipv4Address::new(255, 255, 240, 0)), Ok(20));
/// assert_eq!(
///     ipv4_mask_to_prefix(Ipv4Address::new(255, 0, 255, 0)),
///     Err(AddrParseError::Mask)
/// );
/// ```
///
/// # Errors
/// Returns [`AddrParseError::Mask`] when the one bits are not contiguous
/// from the top.
pub fn ipv4_mask_to_prefix(mask: Ipv4Address) -> Result<u8, AddrParseError> {
    let bits = u32::from(mask);
    // At most 32, so the cast is lossless.
    let prefix_len = bits.leading_ones() as u8;
    if bits == ipv4_prefix_bits(prefix_len) {
        Ok(prefix_len)
    } else {
        Err(AddrParseError::Mask)
    }
}

/// Prefix length of an IPv6 subnet mask, e.g. 64 for
/// `ffff:ffff:ffff:ffff::`.
///
/// # Errors
/// Returns [`AddrParseError::Mask`] when the one bits are not contiguous
/// from the top.
pub fn ipv6_mask_to_prefix(mask: Ipv6Address) -> Result<u8, AddrParseError> {
    let bits = u128::from(mask);
    // At most 128, so the cast is lossless.
    let prefix_len = bits.leading_ones() as u8;
    if bits == ipv6_prefix_bits(prefix_len) {
        Ok(prefix_len)
    } else {
        Err(AddrParseError::Mask)
    }
}

/// The IPv4 subnet mask for a prefix length: `255.255.240.0` for 20.
///
/// ```
/// use ipaddr_value::ipv4_prefix_to_mask;
///
/// assert_eq!(ipv4_prefix_to_mask(20).unwrap().to_string(), "255.255.240.0");
/// assert!(ipv4_prefix_to_mask(33).is_err());
/// ```
///
/// # Errors
/// Returns [`AddrParseError::PrefixLen`] for a prefix above 32.
pub fn ipv4_prefix_to_mask(prefix_len: u8) -> Result<Ipv4Address, AddrParseError> {
    check_prefix_len(prefix_len, Ipv4Address::BITS)?;
    Ok(Ipv4Address::from(ipv4_prefix_bits(prefix_len)))
}

/// The IPv6 subnet mask for a prefix length: `ffff:ffff:ffff::` for 48.
///
/// # Errors
/// Returns [`AddrParseError::PrefixLen`] for a prefix above 128.
pub fn ipv6_prefix_to_mask(prefix_len: u8) -> Result<Ipv6Address, AddrParseError> {
    check_prefix_len(prefix_len, Ipv6Address::BITS)?;
    Ok(Ipv6Address::from(ipv6_prefix_bits(prefix_len)))
}

fn check_prefix_len(prefix_len: u8, max: u8) -> Result<(), AddrParseError> {
    if prefix_len > max {
        return Err(AddrParseError::PrefixLen {
            max,
            found: prefix_len.into(),
        });
    }
    Ok(())
}

/// Mask with the top `prefix_len` bits set, saturating at 32.
pub(crate) fn ipv4_prefix_bits(prefix_len: u8) -> u32 {
    let host_bits = u32::from(Ipv4Address::BITS.saturating_sub(prefix_len));
    u32::MAX.checked_shl(host_bits).unwrap_or(0)
}

/// Mask with the top `prefix_len` bits set, saturating at 128.
pub(crate) fn ipv6_prefix_bits(prefix_len: u8) -> u128 {
    let host_bits = u32::from(Ipv6Address::BITS.saturating_sub(prefix_len));
    u128::MAX.checked_shl(host_bits).unwrap_or(0)
}
