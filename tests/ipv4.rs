mod common;

use ipaddr_value::{AddrKind, AddrParseError, Ipv4Address, SpecialRange};

fn parse(text: &str) -> Ipv4Address {
    Ipv4Address::parse(text).unwrap()
}

#[test]
fn test_construct_and_render() {
    let addr = Ipv4Address::from_slice(&[192, 168, 1, 1]).unwrap();
    assert_eq!(addr.to_string(), "192.168.1.1");
    assert_eq!(addr.kind(), AddrKind::Ipv4);
    assert_eq!(addr.kind().as_str(), "ipv4");

    assert!(Ipv4Address::from_slice(&[300, 1, 2, 3]).is_err());
    assert!(Ipv4Address::from_slice(&[8, 8, 8]).is_err());
}

#[test]
fn test_parses_legacy_notations() {
    common::init_tracing();

    for text in [
        "192.168.1.1",
        "0xc0.168.1.1",
        "192.0250.1.1",
        "0xc0a80101",
        "030052000401",
        "3232235777",
        "192.168.257",
        "0300.0xa80101",
    ] {
        assert_eq!(parse(text).octets(), [192, 168, 1, 1], "{text}");
    }
}

#[test]
fn test_rejects_invalid_text() {
    common::init_tracing();

    assert_eq!(
        Ipv4Address::parse("10.0.0.wtf"),
        Err(AddrParseError::Syntax {
            kind: AddrKind::Ipv4
        })
    );
    assert!(Ipv4Address::parse("1024.0.0.1").is_err());
    assert!(Ipv4Address::parse("1.2.3.4.5").is_err());
    assert!(Ipv4Address::parse("4294967296").is_err());
    assert!(Ipv4Address::parse("1.2.3.").is_err());
    assert!(Ipv4Address::parse(" 1.2.3.4").is_err());
    assert!(Ipv4Address::parse("").is_err());
    assert!("09.1.1.1".parse::<Ipv4Address>().is_err());
}

#[test]
fn test_format_predicates() {
    assert!(Ipv4Address::is_ipv4("192.168.007.0xa"));
    assert!(Ipv4Address::is_ipv4("1024.0.0.1"));
    assert!(!Ipv4Address::is_ipv4("8.0xa.wtf.6"));

    assert!(Ipv4Address::is_valid("192.168.007.0xa"));
    assert!(!Ipv4Address::is_valid("1024.0.0.1"));
    assert!(!Ipv4Address::is_valid("8.0xa.wtf.6"));

    assert!(Ipv4Address::is_valid_four_part_decimal("192.168.1.1"));
    assert!(!Ipv4Address::is_valid_four_part_decimal("0xc0.168.1.1"));

    let absent: Option<&str> = None;
    assert!(!absent.is_some_and(Ipv4Address::is_valid));
}

#[test]
fn test_match_cidr() {
    let addr = Ipv4Address::new(10, 5, 0, 1);

    assert!(addr.matches(&parse("0.0.0.0"), 0));
    assert!(!addr.matches(&parse("11.0.0.0"), 8));
    assert!(addr.matches(&parse("10.0.0.0"), 8));
    assert!(addr.matches(&parse("10.0.0.1"), 8));
    assert!(addr.matches(&parse("10.0.0.10"), 8));
    assert!(addr.matches(&parse("10.5.5.0"), 16));
    assert!(!addr.matches(&parse("10.4.5.0"), 16));
    assert!(addr.matches(&parse("10.4.5.0"), 15));
    assert!(!addr.matches(&parse("10.5.0.2"), 32));
    assert!(addr.matches(&addr, 32));
}

#[test]
fn test_parse_cidr() {
    let addr = Ipv4Address::new(10, 5, 0, 1);
    let cidr = |text| Ipv4Address::parse_cidr(text).unwrap();

    assert!(addr.matches_cidr(&cidr("0.0.0.0/0")));
    assert!(!addr.matches_cidr(&cidr("11.0.0.0/8")));
    assert!(addr.matches_cidr(&cidr("10.0.0.0/8")));
    assert!(addr.matches_cidr(&cidr("10.0.0.1/8")));
    assert!(addr.matches_cidr(&cidr("10.0.0.10/8")));
    assert!(addr.matches_cidr(&cidr("10.5.5.0/16")));
    assert!(!addr.matches_cidr(&cidr("10.4.5.0/16")));
    assert!(addr.matches_cidr(&cidr("10.4.5.0/15")));
    assert!(!addr.matches_cidr(&cidr("10.5.0.2/32")));
    assert!(addr.matches_cidr(&cidr("10.5.0.1/32")));

    assert_eq!(
        Ipv4Address::parse_cidr("10.5.0.1"),
        Err(AddrParseError::Cidr)
    );
    assert_eq!(
        Ipv4Address::parse_cidr("0.0.0.0/-1"),
        Err(AddrParseError::Cidr)
    );
    assert_eq!(
        Ipv4Address::parse_cidr("0.0.0.0/33"),
        Err(AddrParseError::PrefixLen { max: 32, found: 33 })
    );
    assert!(Ipv4Address::parse_cidr("10.0.0.wtf/8").is_err());
}

#[test]
fn test_reserved_networks() {
    let cases = [
        ("0.0.0.0", "unspecified"),
        ("0.1.0.0", "unspecified"),
        ("10.1.0.1", "private"),
        ("100.64.0.0", "carrierGradeNat"),
        ("100.127.255.255", "carrierGradeNat"),
        ("192.168.2.1", "private"),
        ("224.100.0.1", "multicast"),
        ("169.254.15.0", "linkLocal"),
        ("127.1.1.1", "loopback"),
        ("255.255.255.255", "broadcast"),
        ("240.1.2.3", "reserved"),
        ("8.8.8.8", "unicast"),
    ];
    for (ip, label) in cases {
        assert_eq!(parse(ip).range().as_str(), label, "{ip}");
    }
    assert_eq!(parse("172.20.0.1").range(), SpecialRange::Private);
}

#[test]
fn test_mask_helpers() {
    assert_eq!(parse("255.255.255.0").prefix_length_from_subnet_mask(), Ok(24));
    assert_eq!(
        Ipv4Address::subnet_mask_from_prefix_length(8),
        Ok(parse("255.0.0.0"))
    );
    assert_eq!(
        Ipv4Address::network_address_from_cidr("10.20.30.40/12"),
        Ok(parse("10.16.0.0"))
    );
    assert_eq!(
        Ipv4Address::broadcast_address_from_cidr("10.20.30.40/12"),
        Ok(parse("10.31.255.255"))
    );
}
