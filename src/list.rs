//! Decoding and encoding of concatenated action records.
//!
//! A record that decodes but fails validation is reported and walked past
//! using its declared length, so one bad action does not hide the rest of
//! the list. Input that cannot be walked at all (truncated record, length
//! not a multiple of 8) fails the whole list.

use byteorder::{BigEndian, ByteOrder};

use crate::action::{SetFieldAction, SetFieldError};
use crate::registry::FieldRegistry;
use crate::wire::SET_FIELD_HEADER_LEN;

/// Result of decoding an action list: decoded actions plus the records that
/// were rejected, with their byte ranges and reasons.
#[derive(Debug)]
pub struct ActionListDecode {
    pub actions: Vec<SetFieldAction>,
    pub rejected: Vec<RejectedRecord>,
}

#[derive(Debug)]
pub struct RejectedRecord {
    pub byte_range: (usize, usize),
    pub reason: SetFieldError,
}

/// Decode a buffer of back-to-back action records.
pub fn decode_action_list<R: FieldRegistry>(
    bytes: &[u8],
    registry: &R,
) -> Result<ActionListDecode, SetFieldError> {
    let mut actions = Vec::new();
    let mut rejected = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() {
        if bytes.len() - offset < SET_FIELD_HEADER_LEN {
            return Err(SetFieldError::BadLength {
                len: bytes.len() - offset,
                expected: SET_FIELD_HEADER_LEN,
            });
        }
        let declared = BigEndian::read_u16(&bytes[offset + 2..offset + 4]) as usize;
        if declared < SET_FIELD_HEADER_LEN || declared % 8 != 0 {
            return Err(SetFieldError::BadLength {
                len: declared,
                expected: SET_FIELD_HEADER_LEN,
            });
        }
        if offset + declared > bytes.len() {
            return Err(SetFieldError::BadLength {
                len: declared,
                expected: bytes.len() - offset,
            });
        }
        let record = &bytes[offset..offset + declared];
        match SetFieldAction::from_wire(record, registry) {
            Ok(action) => actions.push(action),
            Err(reason) => rejected.push(RejectedRecord {
                byte_range: (offset, offset + declared),
                reason,
            }),
        }
        offset += declared;
    }
    Ok(ActionListDecode { actions, rejected })
}

/// Concatenate the wire encodings of `actions`.
pub fn encode_action_list(actions: &[SetFieldAction]) -> Vec<u8> {
    let mut out = Vec::new();
    for action in actions {
        action.write_wire(&mut out);
    }
    out
}
