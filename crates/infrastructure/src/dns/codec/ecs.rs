//! ECS Codec
//!
//! Reads and writes the parts of the EDNS0 OPT pseudo-record that the JSON
//! form exposes: the upper 8 bits of the 12-bit RCODE and the Client-Subnet
//! option (RFC 7871).

use dnsjson_domain::config::UNSPECIFIED_NETMASK;
use dnsjson_domain::TranscodeError;
use hickory_proto::op::Edns;
use hickory_proto::rr::rdata::opt::{ClientSubnet, EdnsCode, EdnsOption, OPT};
use hickory_proto::rr::{RData, Record};
use std::net::IpAddr;
use tracing::debug;

/// Floor for the advertised UDP payload size (RFC 6891 §6.2.5).
pub const MIN_UDP_PAYLOAD: u16 = 512;

pub const FAMILY_IPV4: u16 = 1;
pub const FAMILY_IPV6: u16 = 2;

const DEFAULT_IPV4_NETMASK: u8 = 24;
const DEFAULT_IPV6_NETMASK: u8 = 56;

/// What the JSON form keeps from an OPT record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptExtract {
    /// Bits 4..12 of the effective RCODE.
    pub rcode_high: u8,
    /// `<address>/<scope>` of the first Client-Subnet option.
    pub client_subnet: Option<String>,
}

impl OptExtract {
    /// Combine with the header RCODE, of which only the low 4 bits are used.
    pub fn status(&self, header_rcode: u16) -> u32 {
        u32::from(header_rcode & 0x000F) | (u32::from(self.rcode_high) << 4)
    }
}

pub fn extract_from_edns(edns: &Edns) -> OptExtract {
    extract_from_opt(edns.rcode_high(), edns.options())
}

/// Extract from an OPT record still sitting in a record section. The
/// extended RCODE lives in the high byte of the record's TTL field.
pub fn extract_from_record(record: &Record) -> Option<OptExtract> {
    match record.data() {
        RData::OPT(options) => Some(extract_from_opt((record.ttl() >> 24) as u8, options)),
        _ => None,
    }
}

pub fn extract_from_opt(rcode_high: u8, options: &OPT) -> OptExtract {
    let client_subnet = match options.get(EdnsCode::Subnet) {
        Some(EdnsOption::Subnet(subnet)) => Some(format_client_subnet(subnet)),
        _ => None,
    };

    OptExtract {
        rcode_high,
        client_subnet,
    }
}

pub fn format_client_subnet(subnet: &ClientSubnet) -> String {
    format!("{}/{}", normalize_addr(subnet.addr()), subnet.scope_prefix())
}

/// Parse `<address>/<scope>` into a Client-Subnet option.
///
/// `source_netmask` is the caller's requested source prefix; the
/// [`UNSPECIFIED_NETMASK`] sentinel selects /24 for IPv4 and /56 for IPv6.
/// Values wider than the address family are clamped.
pub fn parse_client_subnet(text: &str, source_netmask: u8) -> Result<ClientSubnet, TranscodeError> {
    let invalid = || TranscodeError::InvalidClientSubnet(text.to_string());

    let (addr, scope) = text.split_once('/').ok_or_else(invalid)?;
    let addr = normalize_addr(addr.trim().parse::<IpAddr>().map_err(|_| invalid())?);
    let scope: u8 = scope.trim().parse().map_err(|_| invalid())?;

    let (max_prefix, default_netmask) = match addr {
        IpAddr::V4(_) => (32, DEFAULT_IPV4_NETMASK),
        IpAddr::V6(_) => (128, DEFAULT_IPV6_NETMASK),
    };

    if scope > max_prefix {
        return Err(invalid());
    }

    let source_prefix = if source_netmask == UNSPECIFIED_NETMASK {
        default_netmask
    } else {
        source_netmask.min(max_prefix)
    };

    Ok(ClientSubnet::new(addr, source_prefix, scope))
}

/// Build the OPT record for a reply.
///
/// Always produced, even without a client subnet, because the extended RCODE
/// can only travel in an OPT record. DNSSEC OK is never set.
pub fn synthesize_opt(
    client_subnet: &str,
    udp_payload_size: u16,
    source_netmask: u8,
    rcode_high: u8,
) -> Result<Edns, TranscodeError> {
    let mut edns = Edns::new();
    edns.set_max_payload(udp_payload_size.max(MIN_UDP_PAYLOAD));
    edns.set_dnssec_ok(false);
    edns.set_rcode_high(rcode_high);

    if !client_subnet.is_empty() {
        let subnet = parse_client_subnet(client_subnet, source_netmask)?;
        debug!(
            family = family(&subnet.addr()),
            source_prefix = subnet.source_prefix(),
            scope_prefix = subnet.scope_prefix(),
            "Attaching EDNS client subnet"
        );
        edns.options_mut().insert(EdnsOption::Subnet(subnet));
    }

    Ok(edns)
}

/// RFC 7871 address family number.
pub fn family(addr: &IpAddr) -> u16 {
    match addr {
        IpAddr::V4(_) => FAMILY_IPV4,
        IpAddr::V6(_) => FAMILY_IPV6,
    }
}

fn normalize_addr(addr: IpAddr) -> IpAddr {
    match addr {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(addr),
        v4 => v4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn subnet(addr: &str, source: u8, scope: u8) -> ClientSubnet {
        ClientSubnet::new(addr.parse().unwrap(), source, scope)
    }

    #[test]
    fn test_status_combines_low_and_high_bits() {
        let extract = OptExtract {
            rcode_high: 1,
            client_subnet: None,
        };
        assert_eq!(extract.status(2), 18);
        assert_eq!(OptExtract::default().status(3), 3);
    }

    #[test]
    fn test_status_ignores_header_high_bits() {
        let extract = OptExtract {
            rcode_high: 1,
            client_subnet: None,
        };
        // A header code already carrying extended bits is not double counted.
        assert_eq!(extract.status(18), 18);
    }

    #[test]
    fn test_format_ipv4_subnet_uses_scope() {
        assert_eq!(
            format_client_subnet(&subnet("10.10.10.10", 24, 0)),
            "10.10.10.10/0"
        );
    }

    #[test]
    fn test_format_unspecified_ipv4() {
        assert_eq!(
            format_client_subnet(&subnet("0.0.0.0", 0, 0)),
            "0.0.0.0/0"
        );
    }

    #[test]
    fn test_format_normalizes_ipv4_mapped() {
        let mapped = ClientSubnet::new(
            IpAddr::V6(Ipv4Addr::new(198, 51, 100, 7).to_ipv6_mapped()),
            24,
            16,
        );
        assert_eq!(format_client_subnet(&mapped), "198.51.100.7/16");
    }

    #[test]
    fn test_parse_ipv4_default_netmask() {
        let parsed = parse_client_subnet("10.10.10.10/0", UNSPECIFIED_NETMASK).unwrap();
        assert_eq!(parsed.addr(), IpAddr::V4(Ipv4Addr::new(10, 10, 10, 10)));
        assert_eq!(parsed.source_prefix(), 24);
        assert_eq!(parsed.scope_prefix(), 0);
    }

    #[test]
    fn test_parse_ipv6_default_netmask() {
        let parsed = parse_client_subnet("2001:db8::1/48", UNSPECIFIED_NETMASK).unwrap();
        assert_eq!(parsed.addr(), "2001:db8::1".parse::<Ipv6Addr>().unwrap());
        assert_eq!(parsed.source_prefix(), 56);
        assert_eq!(parsed.scope_prefix(), 48);
        assert_eq!(family(&parsed.addr()), FAMILY_IPV6);
    }

    #[test]
    fn test_parse_mapped_address_becomes_ipv4() {
        let parsed = parse_client_subnet("::ffff:192.0.2.1/0", UNSPECIFIED_NETMASK).unwrap();
        assert_eq!(family(&parsed.addr()), FAMILY_IPV4);
        assert_eq!(parsed.source_prefix(), 24);
    }

    #[test]
    fn test_parse_explicit_netmask_is_clamped() {
        let parsed = parse_client_subnet("192.0.2.1/0", 64).unwrap();
        assert_eq!(parsed.source_prefix(), 32);

        let parsed = parse_client_subnet("192.0.2.1/0", 16).unwrap();
        assert_eq!(parsed.source_prefix(), 16);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for text in [
            "10.10.10.10",
            "not-an-ip/24",
            "10.10.10.10/abc",
            "10.10.10.10/255",
            "10.10.10.10/-1",
            "10.10.10.10/33",
            "2001:db8::/129",
            "/24",
        ] {
            let result = parse_client_subnet(text, UNSPECIFIED_NETMASK);
            assert!(
                matches!(result, Err(TranscodeError::InvalidClientSubnet(_))),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn test_synthesize_without_subnet() {
        let edns = synthesize_opt("", 4096, UNSPECIFIED_NETMASK, 0).unwrap();

        assert_eq!(edns.max_payload(), 4096);
        assert_eq!(edns.rcode_high(), 0);
        assert!(!edns.flags().dnssec_ok);
        assert!(edns.option(EdnsCode::Subnet).is_none());
    }

    #[test]
    fn test_synthesize_floors_payload_size() {
        let edns = synthesize_opt("", 100, UNSPECIFIED_NETMASK, 0).unwrap();
        assert_eq!(edns.max_payload(), MIN_UDP_PAYLOAD);
    }

    #[test]
    fn test_synthesize_with_subnet_and_extended_rcode() {
        let edns = synthesize_opt("10.10.10.10/0", 1232, UNSPECIFIED_NETMASK, 1).unwrap();

        assert_eq!(edns.rcode_high(), 1);
        match edns.option(EdnsCode::Subnet) {
            Some(EdnsOption::Subnet(subnet)) => {
                assert_eq!(subnet.addr(), IpAddr::V4(Ipv4Addr::new(10, 10, 10, 10)));
                assert_eq!(subnet.source_prefix(), 24);
                assert_eq!(subnet.scope_prefix(), 0);
            }
            other => panic!("expected client subnet option, got {:?}", other),
        }
    }

    #[test]
    fn test_synthesize_rejects_bad_subnet() {
        let result = synthesize_opt("10.10.10.10", 4096, UNSPECIFIED_NETMASK, 0);
        assert!(matches!(result, Err(TranscodeError::InvalidClientSubnet(_))));
    }

    #[test]
    fn test_extract_round_trips_synthesized_opt() {
        let edns = synthesize_opt("10.10.10.10/0", 4096, 24, 3).unwrap();
        let extract = extract_from_edns(&edns);

        assert_eq!(extract.rcode_high, 3);
        assert_eq!(extract.client_subnet.as_deref(), Some("10.10.10.10/0"));
    }

    #[test]
    fn test_extract_without_subnet() {
        let mut edns = Edns::new();
        edns.set_rcode_high(0);
        assert_eq!(extract_from_edns(&edns), OptExtract::default());
    }
}
