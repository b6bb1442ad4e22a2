//! Wire codec for the set-field action record.
//!
//! Layout, all integers network byte order:
//! `[type: u16][total length: u16][OXM header: u32][value][zero padding]`,
//! with the total length rounded up to the next multiple of 8.

use byteorder::{BigEndian, ByteOrder};

use crate::action::{SetFieldAction, SetFieldError};
use crate::field::{oxm_has_mask, oxm_payload_len};
use crate::registry::FieldRegistry;

/// OpenFlow 1.2 `OFPAT_SET_FIELD` action type.
pub const SET_FIELD_ACTION_TYPE: u16 = 25;

/// Bytes before the value: action type, total length, OXM header.
pub const SET_FIELD_HEADER_LEN: usize = 8;

fn round_up8(n: usize) -> usize {
    (n + 7) & !7
}

impl SetFieldAction {
    /// Decodes one self-contained wire record.
    ///
    /// Checks run in a fixed order and the first failure wins: action type,
    /// declared length against the rounding rule, zero padding, mask bit,
    /// catalog lookup, declared value length against the catalog width, and
    /// finally the semantic checks of [`SetFieldAction::check`].
    pub fn from_wire<R: FieldRegistry>(
        record: &[u8],
        registry: &R,
    ) -> Result<Self, SetFieldError> {
        if record.len() < SET_FIELD_HEADER_LEN {
            return Err(SetFieldError::BadLength {
                len: record.len(),
                expected: SET_FIELD_HEADER_LEN,
            });
        }
        let action_type = BigEndian::read_u16(&record[0..2]);
        if action_type != SET_FIELD_ACTION_TYPE {
            return Err(SetFieldError::BadActionType(action_type));
        }
        let declared_len = BigEndian::read_u16(&record[2..4]) as usize;
        let header = BigEndian::read_u32(&record[4..8]);
        let payload_len = oxm_payload_len(header);

        // The record is zero-padded out to a 64-bit boundary.
        let expected = round_up8(SET_FIELD_HEADER_LEN + payload_len);
        if declared_len != expected {
            return Err(SetFieldError::BadLength {
                len: declared_len,
                expected,
            });
        }
        if record.len() != declared_len {
            return Err(SetFieldError::BadLength {
                len: record.len(),
                expected: declared_len,
            });
        }
        for i in SET_FIELD_HEADER_LEN + payload_len..declared_len {
            if record[i] != 0 {
                return Err(SetFieldError::BadPadding(i));
            }
        }
        if oxm_has_mask(header) {
            return Err(SetFieldError::MaskedFieldNotSupported(header));
        }
        let field = registry
            .by_wire_header(header)
            .filter(|f| f.wire_header != 0)
            .ok_or(SetFieldError::UnknownField(header))?;
        if payload_len != field.n_bytes {
            return Err(SetFieldError::BadLength {
                len: payload_len,
                expected: field.n_bytes,
            });
        }
        let value = record[SET_FIELD_HEADER_LEN..SET_FIELD_HEADER_LEN + field.n_bytes].to_vec();
        let action = SetFieldAction::new(field, value)?;
        action.check(registry)?;
        Ok(action)
    }

    /// Appends the wire encoding of a validated action to `out`.
    ///
    /// Pure projection: the action is assumed to have passed
    /// [`SetFieldAction::check`], so there is no error path.
    pub fn write_wire(&self, out: &mut Vec<u8>) {
        let unpadded = SET_FIELD_HEADER_LEN + self.target().n_bytes;
        let total = round_up8(unpadded);
        let mut head = [0u8; SET_FIELD_HEADER_LEN];
        BigEndian::write_u16(&mut head[0..2], SET_FIELD_ACTION_TYPE);
        BigEndian::write_u16(&mut head[2..4], total as u16);
        BigEndian::write_u32(&mut head[4..8], self.target().wire_header);
        out.extend_from_slice(&head);
        out.extend_from_slice(self.value());
        out.resize(out.len() + (total - unpadded), 0);
    }

    /// Encodes into a fresh buffer; see [`SetFieldAction::write_wire`].
    pub fn to_wire(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(round_up8(SET_FIELD_HEADER_LEN + self.target().n_bytes));
        self.write_wire(&mut out);
        out
    }
}
