//! Field registry: the catalog of known fields and per-field value handling.
//!
//! The codec only consults the [`FieldRegistry`] trait; [`StandardRegistry`]
//! implements it over a static descriptor table.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::field::{
    oxm_header, oxm_type, FieldDescriptor, FieldId, FieldKind, OXM_CLASS_NXM_0, OXM_CLASS_NXM_1,
    OXM_CLASS_OPENFLOW_BASIC,
};

/// Lookup and value handling for the field catalog.
pub trait FieldRegistry {
    /// Resolve a field from the OXM header of a wire record. The length code
    /// and mask bit are not part of the match; callers check them against the
    /// resolved descriptor.
    fn by_wire_header(&self, header: u32) -> Option<&'static FieldDescriptor>;

    /// Resolve a field from its display name.
    fn by_name(&self, name: &str) -> Option<&'static FieldDescriptor>;

    /// Whether `value` is a legal value for `field`. The buffer length must
    /// equal the field's byte width.
    fn is_value_valid(&self, field: &FieldDescriptor, value: &[u8]) -> bool;

    /// Parse the text form of a value into wire bytes. Errors carry a
    /// human-readable message.
    fn parse_value(&self, field: &FieldDescriptor, text: &str) -> Result<Vec<u8>, String>;

    /// Format wire bytes as the field's text form.
    fn format_value(&self, field: &FieldDescriptor, value: &[u8]) -> String;
}

macro_rules! field {
    ($id:ident, $name:literal, $bits:expr, $bytes:expr, $writable:expr, $header:expr, $kind:ident) => {
        FieldDescriptor {
            id: FieldId::$id,
            name: $name,
            n_bits: $bits,
            n_bytes: $bytes,
            writable: $writable,
            wire_header: $header,
            kind: FieldKind::$kind,
        }
    };
}

const OFB: u16 = OXM_CLASS_OPENFLOW_BASIC;
const NXM0: u16 = OXM_CLASS_NXM_0;
const NXM1: u16 = OXM_CLASS_NXM_1;

static FIELDS: &[FieldDescriptor] = &[
    field!(InPort, "in_port", 32, 4, true, oxm_header(OFB, 0, 4), UInt),
    field!(Metadata, "metadata", 64, 8, true, oxm_header(OFB, 2, 8), UInt),
    field!(EthDst, "dl_dst", 48, 6, true, oxm_header(OFB, 3, 6), Mac),
    field!(EthSrc, "dl_src", 48, 6, true, oxm_header(OFB, 4, 6), Mac),
    field!(EthType, "dl_type", 16, 2, true, oxm_header(OFB, 5, 2), UInt),
    field!(VlanVid, "dl_vlan", 12, 2, true, oxm_header(OFB, 6, 2), UInt),
    field!(VlanPcp, "dl_vlan_pcp", 3, 1, true, oxm_header(OFB, 7, 1), UInt),
    field!(VlanTci, "vlan_tci", 16, 2, true, oxm_header(NXM0, 4, 2), UInt),
    field!(VlanTpid, "vlan_tpid", 16, 2, true, 0, UInt),
    field!(VlanQinqVid, "vlan_qinq_vid", 12, 2, true, 0, UInt),
    field!(VlanQinqPcp, "vlan_qinq_pcp", 3, 1, true, 0, UInt),
    field!(IpDscp, "nw_dscp", 6, 1, true, oxm_header(OFB, 8, 1), UInt),
    field!(IpEcn, "nw_ecn", 2, 1, true, oxm_header(OFB, 9, 1), UInt),
    field!(IpProto, "nw_proto", 8, 1, true, oxm_header(OFB, 10, 1), UInt),
    field!(IpTtl, "nw_ttl", 8, 1, true, oxm_header(NXM1, 29, 1), UInt),
    field!(IpFrag, "nw_frag", 2, 1, false, 0, UInt),
    field!(Ipv4Src, "nw_src", 32, 4, true, oxm_header(OFB, 11, 4), Ipv4),
    field!(Ipv4Dst, "nw_dst", 32, 4, true, oxm_header(OFB, 12, 4), Ipv4),
    field!(TcpSrc, "tcp_src", 16, 2, true, oxm_header(OFB, 13, 2), UInt),
    field!(TcpDst, "tcp_dst", 16, 2, true, oxm_header(OFB, 14, 2), UInt),
    field!(UdpSrc, "udp_src", 16, 2, true, oxm_header(OFB, 15, 2), UInt),
    field!(UdpDst, "udp_dst", 16, 2, true, oxm_header(OFB, 16, 2), UInt),
    field!(SctpSrc, "sctp_src", 16, 2, true, oxm_header(OFB, 17, 2), UInt),
    field!(SctpDst, "sctp_dst", 16, 2, true, oxm_header(OFB, 18, 2), UInt),
    field!(Icmpv4Type, "icmp_type", 8, 1, true, oxm_header(OFB, 19, 1), UInt),
    field!(Icmpv4Code, "icmp_code", 8, 1, true, oxm_header(OFB, 20, 1), UInt),
    field!(ArpOp, "arp_op", 16, 2, true, oxm_header(OFB, 21, 2), UInt),
    field!(ArpSpa, "arp_spa", 32, 4, true, oxm_header(OFB, 22, 4), Ipv4),
    field!(ArpTpa, "arp_tpa", 32, 4, true, oxm_header(OFB, 23, 4), Ipv4),
    field!(ArpSha, "arp_sha", 48, 6, true, oxm_header(OFB, 24, 6), Mac),
    field!(ArpTha, "arp_tha", 48, 6, true, oxm_header(OFB, 25, 6), Mac),
    field!(Ipv6Src, "ipv6_src", 128, 16, true, oxm_header(OFB, 26, 16), Ipv6),
    field!(Ipv6Dst, "ipv6_dst", 128, 16, true, oxm_header(OFB, 27, 16), Ipv6),
    field!(Ipv6Label, "ipv6_label", 20, 4, true, oxm_header(OFB, 28, 4), UInt),
    field!(Icmpv6Type, "icmpv6_type", 8, 1, true, oxm_header(OFB, 29, 1), UInt),
    field!(Icmpv6Code, "icmpv6_code", 8, 1, true, oxm_header(OFB, 30, 1), UInt),
    field!(NdTarget, "nd_target", 128, 16, true, oxm_header(OFB, 31, 16), Ipv6),
    field!(NdSll, "nd_sll", 48, 6, true, oxm_header(OFB, 32, 6), Mac),
    field!(NdTll, "nd_tll", 48, 6, true, oxm_header(OFB, 33, 6), Mac),
    field!(MplsLabel, "mpls_label", 20, 4, true, oxm_header(OFB, 34, 4), UInt),
    field!(MplsTc, "mpls_tc", 3, 1, true, oxm_header(OFB, 35, 1), UInt),
    field!(TunId, "tun_id", 64, 8, true, oxm_header(NXM1, 16, 8), UInt),
    field!(Reg0, "reg0", 32, 4, true, oxm_header(NXM1, 0, 4), UInt),
    field!(Reg1, "reg1", 32, 4, true, oxm_header(NXM1, 1, 4), UInt),
    field!(Reg2, "reg2", 32, 4, true, oxm_header(NXM1, 2, 4), UInt),
    field!(Reg3, "reg3", 32, 4, true, oxm_header(NXM1, 3, 4), UInt),
];

/// The built-in field catalog.
pub struct StandardRegistry;

impl FieldRegistry for StandardRegistry {
    fn by_wire_header(&self, header: u32) -> Option<&'static FieldDescriptor> {
        FIELDS
            .iter()
            .find(|f| f.wire_header != 0 && oxm_type(f.wire_header) == oxm_type(header))
    }

    fn by_name(&self, name: &str) -> Option<&'static FieldDescriptor> {
        FIELDS.iter().find(|f| f.name == name)
    }

    fn is_value_valid(&self, field: &FieldDescriptor, value: &[u8]) -> bool {
        if value.len() != field.n_bytes {
            return false;
        }
        match field.id {
            FieldId::VlanVid | FieldId::VlanQinqVid => be_uint(value) <= 0xfff,
            FieldId::VlanPcp | FieldId::VlanQinqPcp | FieldId::MplsTc => value[0] <= 7,
            FieldId::IpDscp => value[0] <= 0x3f,
            FieldId::IpEcn => value[0] <= 3,
            FieldId::IpFrag => value[0] <= 3,
            FieldId::Ipv6Label | FieldId::MplsLabel => be_uint(value) < 1 << 20,
            _ => true,
        }
    }

    fn parse_value(&self, field: &FieldDescriptor, text: &str) -> Result<Vec<u8>, String> {
        match field.kind {
            FieldKind::Mac => parse_mac(text),
            FieldKind::Ipv4 => text
                .trim()
                .parse::<Ipv4Addr>()
                .map(|a| a.octets().to_vec())
                .map_err(|_| format!("invalid IPv4 address `{}`", text)),
            FieldKind::Ipv6 => text
                .trim()
                .parse::<Ipv6Addr>()
                .map(|a| a.octets().to_vec())
                .map_err(|_| format!("invalid IPv6 address `{}`", text)),
            FieldKind::UInt => {
                let v = parse_uint(text)?;
                if field.n_bytes < 8 && v >> (field.n_bytes * 8) != 0 {
                    return Err(format!(
                        "{} does not fit in {} byte(s) of field {}",
                        v, field.n_bytes, field.name
                    ));
                }
                Ok(be_bytes(v, field.n_bytes))
            }
        }
    }

    fn format_value(&self, field: &FieldDescriptor, value: &[u8]) -> String {
        if value.len() != field.n_bytes {
            return hex_string(value);
        }
        match field.kind {
            FieldKind::Mac => value
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<_>>()
                .join(":"),
            FieldKind::Ipv4 => match <[u8; 4]>::try_from(value) {
                Ok(octets) => Ipv4Addr::from(octets).to_string(),
                Err(_) => hex_string(value),
            },
            FieldKind::Ipv6 => match <[u8; 16]>::try_from(value) {
                Ok(octets) => Ipv6Addr::from(octets).to_string(),
                Err(_) => hex_string(value),
            },
            FieldKind::UInt => {
                let v = be_uint(value);
                // Ethernet types read naturally in hex (0x0800, 0x86dd).
                if field.id == FieldId::EthType {
                    format!("{:#06x}", v)
                } else {
                    format!("{}", v)
                }
            }
        }
    }
}

fn be_uint(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0, |acc, b| acc << 8 | u64::from(*b))
}

fn be_bytes(v: u64, n: usize) -> Vec<u8> {
    (0..n).rev().map(|i| (v >> (8 * i)) as u8).collect()
}

fn parse_uint(text: &str) -> Result<u64, String> {
    let t = text.trim();
    let parsed = match t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => t.parse::<u64>(),
    };
    parsed.map_err(|_| format!("`{}` is not a valid unsigned integer", text))
}

fn parse_mac(text: &str) -> Result<Vec<u8>, String> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() != 6 {
        return Err(format!("invalid Ethernet address `{}`", text));
    }
    parts
        .iter()
        .map(|p| {
            u8::from_str_radix(p, 16).map_err(|_| format!("invalid Ethernet address `{}`", text))
        })
        .collect()
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name_and_header_agree() {
        let r = StandardRegistry;
        for f in FIELDS {
            assert_eq!(r.by_name(f.name).map(|d| d.id), Some(f.id), "{}", f.name);
            if f.wire_header != 0 {
                assert_eq!(
                    r.by_wire_header(f.wire_header).map(|d| d.id),
                    Some(f.id),
                    "{}",
                    f.name
                );
            }
        }
    }

    #[test]
    fn wire_headers_carry_byte_width() {
        for f in FIELDS {
            if f.wire_header != 0 {
                assert_eq!((f.wire_header & 0xff) as usize, f.n_bytes, "{}", f.name);
            }
        }
    }

    #[test]
    fn wire_headers_are_distinct() {
        for (i, a) in FIELDS.iter().enumerate() {
            for b in &FIELDS[i + 1..] {
                if a.wire_header != 0 && b.wire_header != 0 {
                    assert_ne!(
                        oxm_type(a.wire_header),
                        oxm_type(b.wire_header),
                        "{} vs {}",
                        a.name,
                        b.name
                    );
                }
            }
        }
    }

    #[test]
    fn parse_and_format_uint() {
        let r = StandardRegistry;
        let dl_type = r.by_name("dl_type").expect("dl_type");
        let v = r.parse_value(dl_type, "0x0800").expect("parse");
        assert_eq!(v, vec![0x08, 0x00]);
        assert_eq!(r.format_value(dl_type, &v), "0x0800");

        let tcp_src = r.by_name("tcp_src").expect("tcp_src");
        assert_eq!(r.parse_value(tcp_src, "443").expect("parse"), vec![1, 187]);
        assert!(r.parse_value(tcp_src, "70000").is_err());
        assert!(r.parse_value(tcp_src, "http").is_err());
    }

    #[test]
    fn parse_and_format_addresses() {
        let r = StandardRegistry;
        let nw_src = r.by_name("nw_src").expect("nw_src");
        let v = r.parse_value(nw_src, "10.0.0.1").expect("parse");
        assert_eq!(v, vec![10, 0, 0, 1]);
        assert_eq!(r.format_value(nw_src, &v), "10.0.0.1");

        let dl_src = r.by_name("dl_src").expect("dl_src");
        let v = r.parse_value(dl_src, "AA:bb:CC:dd:EE:01").expect("parse");
        assert_eq!(r.format_value(dl_src, &v), "aa:bb:cc:dd:ee:01");

        let ipv6_src = r.by_name("ipv6_src").expect("ipv6_src");
        let v = r
            .parse_value(ipv6_src, "2001:0db8:0000:0000:0000:0000:0000:0001")
            .expect("parse");
        assert_eq!(r.format_value(ipv6_src, &v), "2001:db8::1");
    }

    #[test]
    fn value_validity_ranges() {
        let r = StandardRegistry;
        let cases: &[(&str, u64, bool)] = &[
            ("dl_vlan", 0xfff, true),
            ("dl_vlan", 0x1000, false),
            ("dl_vlan_pcp", 7, true),
            ("dl_vlan_pcp", 8, false),
            ("nw_dscp", 0x3f, true),
            ("nw_dscp", 0x40, false),
            ("nw_ecn", 3, true),
            ("nw_ecn", 4, false),
            ("mpls_label", (1 << 20) - 1, true),
            ("mpls_label", 1 << 20, false),
            ("ipv6_label", (1 << 20) - 1, true),
            ("ipv6_label", 1 << 20, false),
            ("mpls_tc", 7, true),
            ("mpls_tc", 8, false),
        ];
        for (name, v, valid) in cases {
            let f = r.by_name(name).expect(name);
            let bytes = be_bytes(*v, f.n_bytes);
            assert_eq!(r.is_value_valid(f, &bytes), *valid, "{} = {}", name, v);
        }
    }
}
