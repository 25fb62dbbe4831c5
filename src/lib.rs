#![no_std]

extern crate alloc;

pub use self::ipaddr::{AddrKind, IpAddress};
pub use self::ipv4::Ipv4Address;
pub use self::ipv6::Ipv6Address;
pub use self::mask::{
    ip_mask_to_prefix, ipv4_mask_to_prefix, ipv4_prefix_to_mask, ipv6_mask_to_prefix,
    ipv6_prefix_to_mask,
};
pub use self::parser::AddrParseError;
pub use self::range::SpecialRange;

mod ipaddr;
mod ipv4;
mod ipv6;
mod mask;
mod parser;
mod range;
