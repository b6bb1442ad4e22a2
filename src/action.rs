//! The in-memory set-field action and its validity checks.

use crate::field::FieldDescriptor;
use crate::policy::is_set_field_target;
use crate::registry::FieldRegistry;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetFieldError {
    #[error("field {0} cannot be a set-field target")]
    DisallowedField(&'static str),
    #[error("value is not valid for field {0}")]
    InvalidValue(&'static str),
    #[error("bad value syntax: {0}")]
    InvalidValueSyntax(String),
    #[error("bad set-field length {len}, expected {expected}")]
    BadLength { len: usize, expected: usize },
    #[error("nonzero set-field padding at byte {0}")]
    BadPadding(usize),
    #[error("masked set-field is not supported (header {0:#010x})")]
    MaskedFieldNotSupported(u32),
    #[error("no field known for wire header {0:#010x}")]
    UnknownField(u32),
    #[error("unknown field name `{0}`")]
    UnknownFieldName(String),
    #[error("not a set-field action (type {0})")]
    BadActionType(u16),
    #[error("{0}")]
    Syntax(String),
}

/// One set-field instruction: overwrite `target` with `value`.
///
/// The write always covers the target's full natural width, so the bit
/// offset (0) and bit count (the target's width) are derived from the
/// descriptor rather than stored.
#[derive(Debug, Clone)]
pub struct SetFieldAction {
    target: &'static FieldDescriptor,
    value: Vec<u8>,
}

impl PartialEq for SetFieldAction {
    fn eq(&self, other: &Self) -> bool {
        self.target.id == other.target.id && self.value == other.value
    }
}

impl Eq for SetFieldAction {}

impl SetFieldAction {
    /// Builds an action from a catalog field and a raw value. The value must
    /// be exactly the field's byte width.
    pub fn new(target: &'static FieldDescriptor, value: Vec<u8>) -> Result<Self, SetFieldError> {
        if value.len() != target.n_bytes {
            return Err(SetFieldError::BadLength {
                len: value.len(),
                expected: target.n_bytes,
            });
        }
        Ok(SetFieldAction { target, value })
    }

    pub fn target(&self) -> &'static FieldDescriptor {
        self.target
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Bit offset of the write within the target field; always 0.
    pub fn bit_offset(&self) -> u16 {
        0
    }

    /// Number of bits written; always the target's full width.
    pub fn n_bits(&self) -> u16 {
        self.target.n_bits
    }

    /// Validates the action: the target must be on the allow-list and the
    /// value legal for the field.
    ///
    /// TODO: prerequisite checks (e.g. an MPLS set needs a preceding MPLS
    /// push) require visibility into the surrounding action list.
    pub fn check<R: FieldRegistry>(&self, registry: &R) -> Result<(), SetFieldError> {
        if !is_set_field_target(self.target) {
            return Err(SetFieldError::DisallowedField(self.target.name));
        }
        if !registry.is_value_valid(self.target, &self.value) {
            return Err(SetFieldError::InvalidValue(self.target.name));
        }
        Ok(())
    }
}
