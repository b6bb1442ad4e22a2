//! Text form of the action: `<value>-><field-name>`.
//!
//! This is the configuration/debugging surface; parse failures are returned
//! to the caller as typed errors, never by terminating the process.

use crate::action::{SetFieldAction, SetFieldError};
use crate::policy::is_set_field_target;
use crate::registry::FieldRegistry;

const DELIMITER: &str = "->";

impl SetFieldAction {
    /// Parses `<value>-><field-name>` (without the `set_field:` prefix).
    ///
    /// The allow-list is checked before the value is parsed, mirroring the
    /// gate order of the wire decoder.
    pub fn from_text<R: FieldRegistry>(text: &str, registry: &R) -> Result<Self, SetFieldError> {
        let delim = text
            .find(DELIMITER)
            .ok_or_else(|| SetFieldError::Syntax(format!("{}: missing `->`", text)))?;
        let value_text = &text[..delim];
        let field_name = &text[delim + DELIMITER.len()..];
        if field_name.is_empty() {
            return Err(SetFieldError::Syntax(format!(
                "{}: missing field name following `->`",
                text
            )));
        }
        let field = registry
            .by_name(field_name)
            .ok_or_else(|| SetFieldError::UnknownFieldName(field_name.to_string()))?;
        if !is_set_field_target(field) {
            return Err(SetFieldError::DisallowedField(field.name));
        }
        let value = registry
            .parse_value(field, value_text)
            .map_err(SetFieldError::InvalidValueSyntax)?;
        if !registry.is_value_valid(field, &value) {
            return Err(SetFieldError::InvalidValue(field.name));
        }
        SetFieldAction::new(field, value)
    }

    /// Formats a validated action, `set_field:` prefix included.
    pub fn to_text<R: FieldRegistry>(&self, registry: &R) -> String {
        format!(
            "set_field:{}->{}",
            registry.format_value(self.target(), self.value()),
            self.target().name
        )
    }
}
