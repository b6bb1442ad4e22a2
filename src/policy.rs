//! Allow-list policy for set-field targets.
//!
//! A field can be generically writable and still not be a legal set-field
//! target: the policy is a closed compile-time set, not derived from the
//! catalog's writability flag.

use crate::field::{FieldDescriptor, FieldId};

const fn bit(id: FieldId) -> u64 {
    1 << id as u64
}

/// Fields `set_field` may target. Tunnel id, input port, metadata, the
/// register fields, VLAN TCI/TPID, QinQ vid/pcp, IP TTL/fragmentation and
/// the SCTP ports are deliberately absent.
const SET_FIELD_TARGETS: u64 = bit(FieldId::EthSrc)
    | bit(FieldId::EthDst)
    | bit(FieldId::EthType)
    | bit(FieldId::VlanVid)
    | bit(FieldId::VlanPcp)
    | bit(FieldId::IpDscp)
    | bit(FieldId::IpEcn)
    | bit(FieldId::IpProto)
    | bit(FieldId::Ipv4Src)
    | bit(FieldId::Ipv4Dst)
    | bit(FieldId::TcpSrc)
    | bit(FieldId::TcpDst)
    | bit(FieldId::UdpSrc)
    | bit(FieldId::UdpDst)
    | bit(FieldId::Icmpv4Type)
    | bit(FieldId::Icmpv4Code)
    | bit(FieldId::ArpOp)
    | bit(FieldId::ArpSpa)
    | bit(FieldId::ArpTpa)
    | bit(FieldId::ArpSha)
    | bit(FieldId::ArpTha)
    | bit(FieldId::Ipv6Src)
    | bit(FieldId::Ipv6Dst)
    | bit(FieldId::Ipv6Label)
    | bit(FieldId::Icmpv6Type)
    | bit(FieldId::Icmpv6Code)
    | bit(FieldId::NdTarget)
    | bit(FieldId::NdSll)
    | bit(FieldId::NdTll)
    | bit(FieldId::MplsLabel)
    | bit(FieldId::MplsTc);

/// Whether `field` may be the target of a set-field action.
pub fn is_set_field_target(field: &FieldDescriptor) -> bool {
    field.writable && field.wire_header != 0 && SET_FIELD_TARGETS & bit(field.id) != 0
}
