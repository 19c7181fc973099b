//! Resource and operation model

use crate::error::{Error, Result};

/// Top-level category of WhatsApp message/action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Plain messages: text, location, contact cards, reactions
    Message,
    /// Interactive messages: buttons, lists, CTA, location requests
    Interactive,
    /// Pre-approved message templates
    Template,
    /// Media messages: image, video, document, audio, sticker
    Media,
    /// Catalog and product messages
    Catalog,
}

impl Resource {
    /// Host-facing resource name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Interactive => "interactive",
            Self::Template => "template",
            Self::Media => "media",
            Self::Catalog => "catalog",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single resource-scoped operation
///
/// One variant per resource/operation pair, so every dispatch site is an
/// exhaustive match and adding an operation is a compiler-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// message: send a text message
    SendText,
    /// message: send a location
    SendLocation,
    /// message: send a contact card
    SendContact,
    /// message: react to a message with an emoji
    React,
    /// interactive: send quick-reply buttons
    SendButtons,
    /// interactive: send a sectioned list
    SendList,
    /// interactive: send a call-to-action button
    SendCta,
    /// interactive: request the user's location
    RequestLocation,
    /// template: send an approved template
    SendTemplate,
    /// template: list all message templates
    ListTemplates,
    /// template: fetch a template by name
    GetTemplate,
    /// template: delete a template by name
    DeleteTemplate,
    /// media: send an image
    SendImage,
    /// media: send a video
    SendVideo,
    /// media: send a document
    SendDocument,
    /// media: send an audio file
    SendAudio,
    /// media: send a sticker
    SendSticker,
    /// catalog: send a single product
    SendProduct,
    /// catalog: send a multi-product list
    SendProductList,
    /// catalog: fetch catalog information
    GetCatalog,
}

impl Operation {
    /// Resolve an operation from the host-supplied resource/operation pair
    pub fn parse(resource: &str, operation: &str) -> Result<Self> {
        let parsed = match (resource, operation) {
            ("message", "sendText") => Self::SendText,
            ("message", "sendLocation") => Self::SendLocation,
            ("message", "sendContact") => Self::SendContact,
            ("message", "react") => Self::React,
            ("interactive", "sendButtons") => Self::SendButtons,
            ("interactive", "sendList") => Self::SendList,
            ("interactive", "sendCta") => Self::SendCta,
            ("interactive", "requestLocation") => Self::RequestLocation,
            ("template", "sendTemplate") => Self::SendTemplate,
            ("template", "listTemplates") => Self::ListTemplates,
            ("template", "getTemplate") => Self::GetTemplate,
            ("template", "deleteTemplate") => Self::DeleteTemplate,
            ("media", "sendImage") => Self::SendImage,
            ("media", "sendVideo") => Self::SendVideo,
            ("media", "sendDocument") => Self::SendDocument,
            ("media", "sendAudio") => Self::SendAudio,
            ("media", "sendSticker") => Self::SendSticker,
            ("catalog", "sendProduct") => Self::SendProduct,
            ("catalog", "sendProductList") => Self::SendProductList,
            ("catalog", "getCatalog") => Self::GetCatalog,
            _ => {
                return Err(Error::Validation(format!(
                    "unknown operation `{operation}` for resource `{resource}`"
                )))
            }
        };
        Ok(parsed)
    }

    /// Resource this operation belongs to
    #[must_use]
    pub fn resource(&self) -> Resource {
        match self {
            Self::SendText | Self::SendLocation | Self::SendContact | Self::React => {
                Resource::Message
            }
            Self::SendButtons | Self::SendList | Self::SendCta | Self::RequestLocation => {
                Resource::Interactive
            }
            Self::SendTemplate | Self::ListTemplates | Self::GetTemplate | Self::DeleteTemplate => {
                Resource::Template
            }
            Self::SendImage
            | Self::SendVideo
            | Self::SendDocument
            | Self::SendAudio
            | Self::SendSticker => Resource::Media,
            Self::SendProduct | Self::SendProductList | Self::GetCatalog => Resource::Catalog,
        }
    }

    /// Whether this operation sends a message to a recipient
    ///
    /// Recipient-targeting operations POST to the phone-number `/messages`
    /// endpoint and seed `messaging_product`/`recipient_type`/`to`; the
    /// management operations hit business-account-scoped paths instead.
    #[must_use]
    pub fn targets_recipient(&self) -> bool {
        !matches!(
            self,
            Self::ListTemplates | Self::GetTemplate | Self::DeleteTemplate | Self::GetCatalog
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_pairs() {
        assert_eq!(
            Operation::parse("message", "sendText").unwrap(),
            Operation::SendText
        );
        assert_eq!(
            Operation::parse("interactive", "sendButtons").unwrap(),
            Operation::SendButtons
        );
        assert_eq!(
            Operation::parse("catalog", "getCatalog").unwrap(),
            Operation::GetCatalog
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(Operation::parse("message", "sendButtons").is_err());
        assert!(Operation::parse("sms", "sendText").is_err());
        assert!(Operation::parse("media", "sendGif").is_err());
    }

    #[test]
    fn test_resource_of_operation() {
        assert_eq!(Operation::SendSticker.resource(), Resource::Media);
        assert_eq!(Operation::DeleteTemplate.resource(), Resource::Template);
        assert_eq!(Operation::SendProductList.resource(), Resource::Catalog);
    }

    #[test]
    fn test_targets_recipient() {
        assert!(Operation::SendText.targets_recipient());
        assert!(Operation::SendProduct.targets_recipient());
        assert!(!Operation::ListTemplates.targets_recipient());
        assert!(!Operation::GetTemplate.targets_recipient());
        assert!(!Operation::DeleteTemplate.targets_recipient());
        assert!(!Operation::GetCatalog.targets_recipient());
    }
}
