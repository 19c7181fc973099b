//! Field metadata as a plain dispatch table
//!
//! Replaces the host framework's conditional field-visibility rules: each
//! operation maps to the exact field set the builder reads, and the
//! dispatcher rejects items missing a required field before building.

use crate::error::{Error, Result};
use crate::params::Params;
use crate::resource::Operation;

/// A single field an operation reads
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Field name in the bag
    pub name: &'static str,
    /// Whether the field must be present
    pub required: bool,
}

const fn req(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        required: true,
    }
}

const fn opt(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        required: false,
    }
}

/// Fields read by `operation`
///
/// Conditionally-required pairs (`cta_url`/`cta_phone`, `media_url`/
/// `media_id`) are listed as optional here; the builder branch that reads
/// them enforces the one that applies.
#[must_use]
pub fn fields(operation: Operation) -> &'static [FieldSpec] {
    match operation {
        Operation::SendText => const { &[req("to"), req("message"), opt("preview_url")] },
        Operation::SendLocation => const {
            &[
                req("to"),
                req("latitude"),
                req("longitude"),
                opt("location_name"),
                opt("address"),
            ]
        },
        Operation::SendContact => const {
            &[
                req("to"),
                req("contact_first_name"),
                opt("contact_last_name"),
                req("contact_phone"),
                opt("contact_email"),
                opt("contact_org"),
            ]
        },
        Operation::React => const { &[req("to"), req("message_id"), req("emoji")] },
        Operation::SendButtons => const {
            &[
                req("to"),
                req("body_text"),
                opt("header_text"),
                opt("footer_text"),
                req("buttons"),
            ]
        },
        Operation::SendList => const {
            &[
                req("to"),
                req("body_text"),
                opt("header_text"),
                opt("footer_text"),
                req("button_text"),
                req("sections"),
            ]
        },
        Operation::SendCta => const {
            &[
                req("to"),
                req("body_text"),
                opt("cta_type"),
                req("cta_button_text"),
                opt("cta_url"),
                opt("cta_phone"),
            ]
        },
        Operation::RequestLocation => const { &[req("to"), req("body_text")] },
        Operation::SendTemplate => const {
            &[
                req("to"),
                req("template_name"),
                opt("language_code"),
                opt("template_variables"),
            ]
        },
        Operation::ListTemplates => const { &[] },
        Operation::GetTemplate | Operation::DeleteTemplate => const { &[req("template_name")] },
        Operation::SendImage | Operation::SendVideo => const {
            &[
                req("to"),
                opt("media_source"),
                opt("media_url"),
                opt("media_id"),
                opt("caption"),
            ]
        },
        Operation::SendDocument => const {
            &[
                req("to"),
                opt("media_source"),
                opt("media_url"),
                opt("media_id"),
                opt("caption"),
                opt("filename"),
            ]
        },
        Operation::SendAudio | Operation::SendSticker => const {
            &[
                req("to"),
                opt("media_source"),
                opt("media_url"),
                opt("media_id"),
            ]
        },
        Operation::SendProduct => const {
            &[
                req("to"),
                req("catalog_id"),
                req("product_retailer_id"),
                opt("body_text"),
            ]
        },
        Operation::SendProductList => const {
            &[
                req("to"),
                req("catalog_id"),
                req("body_text"),
                opt("header_text"),
                opt("product_sections"),
            ]
        },
        Operation::GetCatalog => const { &[] },
    }
}

/// Reject items missing a field the operation requires
pub fn check_required(operation: Operation, params: &Params) -> Result<()> {
    for field in fields(operation) {
        if field.required && !params.contains(field.name) {
            return Err(Error::Validation(format!(
                "missing required field `{}`",
                field.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_text_fields() {
        let specs = fields(Operation::SendText);
        assert!(specs.iter().any(|f| f.name == "to" && f.required));
        assert!(specs.iter().any(|f| f.name == "message" && f.required));
        assert!(specs.iter().any(|f| f.name == "preview_url" && !f.required));
    }

    #[test]
    fn test_management_operations_take_no_recipient() {
        assert!(fields(Operation::ListTemplates).is_empty());
        assert!(fields(Operation::GetCatalog).is_empty());
        assert!(!fields(Operation::GetTemplate)
            .iter()
            .any(|f| f.name == "to"));
    }

    #[test]
    fn test_check_required_flags_missing_field() {
        let params = Params::new().with("to", "56912345678");
        let err = check_required(Operation::SendText, &params).unwrap_err();
        assert!(err.to_string().contains("`message`"));
    }

    #[test]
    fn test_check_required_accepts_complete_bag() {
        let params = Params::new()
            .with("to", "56912345678")
            .with("message", "hola");
        assert!(check_required(Operation::SendText, &params).is_ok());
    }
}
