use core::fmt;

use crate::{Ipv4Address, Ipv6Address};

/// The special-purpose block an address falls in.
///
/// Addresses are classified against a fixed table per family, tested in
/// order; the first block that matches wins and anything unmatched is
/// [`SpecialRange::Unicast`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SpecialRange {
    Unspecified,
    Broadcast,
    Multicast,
    LinkLocal,
    Loopback,
    CarrierGradeNat,
    Private,
    UniqueLocal,
    Ipv4Mapped,
    Rfc6145,
    Rfc6052,
    SixToFour,
    Teredo,
    Reserved,
    Unicast,
}

impl SpecialRange {
    /// The conventional label of the block, e.g. `"carrierGradeNat"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            SpecialRange::Unspecified => "unspecified",
            SpecialRange::Broadcast => "broadcast",
            SpecialRange::Multicast => "multicast",
            SpecialRange::LinkLocal => "linkLocal",
            SpecialRange::Loopback => "loopback",
            SpecialRange::CarrierGradeNat => "carrierGradeNat",
            SpecialRange::Private => "private",
            SpecialRange::UniqueLocal => "uniqueLocal",
            SpecialRange::Ipv4Mapped => "ipv4Mapped",
            SpecialRange::Rfc6145 => "rfc6145",
            SpecialRange::Rfc6052 => "rfc6052",
            SpecialRange::SixToFour => "6to4",
            SpecialRange::Teredo => "teredo",
            SpecialRange::Reserved => "reserved",
            SpecialRange::Unicast => "unicast",
        }
    }
}

impl fmt::Display for SpecialRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Broadcast sits inside 240.0.0.0/4 and must be tested first.
const IPV4_RANGES: &[(Ipv4Address, u8, SpecialRange)] = &[
    (Ipv4Address::new(0, 0, 0, 0), 8, SpecialRange::Unspecified),
    (Ipv4Address::new(10, 0, 0, 0), 8, SpecialRange::Private),
    (Ipv4Address::new(172, 16, 0, 0), 12, SpecialRange::Private),
    (Ipv4Address::new(192, 168, 0, 0), 16, SpecialRange::Private),
    (Ipv4Address::new(100, 64, 0, 0), 10, SpecialRange::CarrierGradeNat),
    (Ipv4Address::new(127, 0, 0, 0), 8, SpecialRange::Loopback),
    (Ipv4Address::new(169, 254, 0, 0), 16, SpecialRange::LinkLocal),
    (Ipv4Address::new(224, 0, 0, 0), 4, SpecialRange::Multicast),
    (Ipv4Address::new(255, 255, 255, 255), 32, SpecialRange::Broadcast),
    (Ipv4Address::new(192, 0, 0, 0), 24, SpecialRange::Reserved),
    (Ipv4Address::new(192, 0, 2, 0), 24, SpecialRange::Reserved),
    (Ipv4Address::new(192, 88, 99, 0), 24, SpecialRange::Reserved),
    (Ipv4Address::new(198, 51, 100, 0), 24, SpecialRange::Reserved),
    (Ipv4Address::new(203, 0, 113, 0), 24, SpecialRange::Reserved),
    (Ipv4Address::new(240, 0, 0, 0), 4, SpecialRange::Reserved),
];

const IPV6_RANGES: &[(Ipv6Address, u8, SpecialRange)] = &[
    (Ipv6Address::new(0, 0, 0, 0, 0, 0, 0, 0), 128, SpecialRange::Unspecified),
    (Ipv6Address::new(0xfe80, 0, 0, 0, 0, 0, 0, 0), 10, SpecialRange::LinkLocal),
    (Ipv6Address::new(0xff00, 0, 0, 0, 0, 0, 0, 0), 8, SpecialRange::Multicast),
    (Ipv6Address::new(0, 0, 0, 0, 0, 0, 0, 1), 128, SpecialRange::Loopback),
    (Ipv6Address::new(0xfc00, 0, 0, 0, 0, 0, 0, 0), 7, SpecialRange::UniqueLocal),
    (Ipv6Address::new(0, 0, 0, 0, 0, 0xffff, 0, 0), 96, SpecialRange::Ipv4Mapped),
    (Ipv6Address::new(0, 0, 0, 0, 0xffff, 0, 0, 0), 96, SpecialRange::Rfc6145),
    (Ipv6Address::new(0x64, 0xff9b, 0, 0, 0, 0, 0, 0), 96, SpecialRange::Rfc6052),
    (Ipv6Address::new(0x2002, 0, 0, 0, 0, 0, 0, 0), 16, SpecialRange::SixToFour),
    (Ipv6Address::new(0x2001, 0, 0, 0, 0, 0, 0, 0), 32, SpecialRange::Teredo),
    (Ipv6Address::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0), 32, SpecialRange::Reserved),
];

pub(crate) fn classify_ipv4(addr: &Ipv4Address) -> SpecialRange {
    IPV4_RANGES
        .iter()
        .find(|(network, prefix_len, _)| addr.matches(network, *prefix_len))
        .map_or(SpecialRange::Unicast, |&(_, _, range)| range)
}

pub(crate) fn classify_ipv6(addr: &Ipv6Address) -> SpecialRange {
    IPV6_RANGES
        .iter()
        .find(|(network, prefix_len, _)| addr.matches(network, *prefix_len))
        .map_or(SpecialRange::Unicast, |&(_, _, range)| range)
}
