//! # setfield — OpenFlow set-field action codec and validator
//!
//! Bridges three representations of the `set_field` instruction (overwrite a
//! named packet/flow field with a caller-supplied value):
//!
//! - **Wire**: the OpenFlow 1.2 `OFPAT_SET_FIELD` record (self-describing,
//!   zero-padded to a 64-bit boundary, integers in network byte order).
//! - **In-memory**: [`SetFieldAction`], a catalog field reference plus an
//!   owned value buffer at the field's full natural width.
//! - **Text**: `set_field:<value>-><field-name>` for configuration and
//!   debugging.
//!
//! Only a fixed allow-list of fields may be targeted, independent of whether
//! the field catalog marks a field writable; see [`policy`]. Decode and
//! parse run the validator before an action is returned; encode and format
//! are pure projections of an already-validated action.
//!
//! ## Example
//!
//! ```
//! use setfield::{SetFieldAction, StandardRegistry};
//!
//! let registry = StandardRegistry;
//! let action = SetFieldAction::from_text("10.0.0.1->nw_src", &registry).expect("parse");
//! let wire = action.to_wire();
//! let back = SetFieldAction::from_wire(&wire, &registry).expect("decode");
//! assert_eq!(action, back);
//! assert_eq!(back.to_text(&registry), "set_field:10.0.0.1->nw_src");
//! ```

pub mod action;
pub mod field;
pub mod list;
pub mod policy;
pub mod registry;
pub mod text;
pub mod wire;

pub use action::{SetFieldAction, SetFieldError};
pub use field::{FieldDescriptor, FieldId, FieldKind};
pub use list::{decode_action_list, encode_action_list, ActionListDecode, RejectedRecord};
pub use policy::is_set_field_target;
pub use registry::{FieldRegistry, StandardRegistry};
pub use wire::{SET_FIELD_ACTION_TYPE, SET_FIELD_HEADER_LEN};
