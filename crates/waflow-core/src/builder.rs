//! Payload builder: (operation, fields, credentials) -> request spec
//!
//! Pure request shaping for the WhatsApp Business Cloud API. Validates
//! structural constraints (button/section cardinality), applies the
//! character truncation the API enforces, and composes optional
//! sub-objects. Never touches the network.

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::params::Params;
use crate::request::{HttpMethod, RequestSpec};
use crate::resource::Operation;
use crate::types::{Button, ListSection, ProductSection, TemplateComponent, TemplateVariable};

use serde_json::{json, Map, Value};

/// Character limits the Cloud API enforces; overlong values are truncated
/// rather than rejected.
const BUTTON_TITLE_LIMIT: usize = 20;
const LIST_BUTTON_LIMIT: usize = 20;
const SECTION_TITLE_LIMIT: usize = 24;
const ROW_TITLE_LIMIT: usize = 24;
const ROW_DESCRIPTION_LIMIT: usize = 72;
const HEADER_TEXT_LIMIT: usize = 60;
const FOOTER_TEXT_LIMIT: usize = 60;

/// Cardinality limits the Cloud API rejects outright.
const MAX_BUTTONS: usize = 3;
const MAX_SECTIONS: usize = 10;

/// Build the outbound request for one input item
///
/// Send operations POST a shaped JSON body to the phone-number `/messages`
/// endpoint; the template/catalog management operations resolve to
/// business-account-scoped GET/DELETE requests with no body.
///
/// # Errors
/// [`Error::Validation`] on missing required fields or cardinality
/// violations, [`Error::Credentials`] when a management operation runs
/// without a business account ID.
pub fn build(
    operation: Operation,
    params: &Params,
    credentials: &Credentials,
) -> Result<RequestSpec> {
    let spec = match operation {
        Operation::SendText => post_messages(credentials, text_payload(params)?),
        Operation::SendLocation => post_messages(credentials, location_payload(params)?),
        Operation::SendContact => post_messages(credentials, contact_payload(params)?),
        Operation::React => post_messages(credentials, reaction_payload(params)?),
        Operation::SendButtons => post_messages(credentials, buttons_payload(params)?),
        Operation::SendList => post_messages(credentials, list_payload(params)?),
        Operation::SendCta => post_messages(credentials, cta_payload(params)?),
        Operation::RequestLocation => {
            post_messages(credentials, location_request_payload(params)?)
        }
        Operation::SendTemplate => post_messages(credentials, template_payload(params)?),
        Operation::SendImage => post_messages(credentials, media_payload(params, "image")?),
        Operation::SendVideo => post_messages(credentials, media_payload(params, "video")?),
        Operation::SendDocument => post_messages(credentials, media_payload(params, "document")?),
        Operation::SendAudio => post_messages(credentials, media_payload(params, "audio")?),
        Operation::SendSticker => post_messages(credentials, media_payload(params, "sticker")?),
        Operation::SendProduct => post_messages(credentials, product_payload(params)?),
        Operation::SendProductList => {
            post_messages(credentials, product_list_payload(params)?)
        }
        Operation::ListTemplates => RequestSpec {
            method: HttpMethod::Get,
            url: credentials.message_templates_url(None)?,
            body: None,
        },
        Operation::GetTemplate => {
            let name = params.string("template_name")?;
            RequestSpec {
                method: HttpMethod::Get,
                url: credentials.message_templates_url(Some(&name))?,
                body: None,
            }
        }
        Operation::DeleteTemplate => {
            let name = params.string("template_name")?;
            RequestSpec {
                method: HttpMethod::Delete,
                url: credentials.message_templates_url(Some(&name))?,
                body: None,
            }
        }
        Operation::GetCatalog => RequestSpec {
            method: HttpMethod::Get,
            url: credentials.product_catalogs_url()?,
            body: None,
        },
    };
    Ok(spec)
}

/// Truncate to at most `limit` characters, preserving the prefix
fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Seed every recipient-targeting body with the messaging envelope
fn recipient_base(params: &Params) -> Result<Map<String, Value>> {
    let mut body = Map::new();
    body.insert("messaging_product".to_string(), json!("whatsapp"));
    body.insert("recipient_type".to_string(), json!("individual"));
    body.insert("to".to_string(), json!(params.string("to")?));
    Ok(body)
}

fn post_messages(credentials: &Credentials, body: Map<String, Value>) -> RequestSpec {
    RequestSpec {
        method: HttpMethod::Post,
        url: credentials.messages_url(),
        body: Some(Value::Object(body)),
    }
}

fn text_payload(params: &Params) -> Result<Map<String, Value>> {
    let mut body = recipient_base(params)?;
    body.insert("type".to_string(), json!("text"));
    body.insert(
        "text".to_string(),
        json!({
            "preview_url": params.bool_or("preview_url", false),
            "body": params.string("message")?,
        }),
    );
    Ok(body)
}

fn location_payload(params: &Params) -> Result<Map<String, Value>> {
    let mut body = recipient_base(params)?;
    body.insert("type".to_string(), json!("location"));
    // coordinates pass through unmodified; the API validates ranges itself
    body.insert(
        "location".to_string(),
        json!({
            "latitude": params.number("latitude")?,
            "longitude": params.number("longitude")?,
            "name": params.string_or("location_name", ""),
            "address": params.string_or("address", ""),
        }),
    );
    Ok(body)
}

fn contact_payload(params: &Params) -> Result<Map<String, Value>> {
    let mut body = recipient_base(params)?;
    let first_name = params.string("contact_first_name")?;
    let last_name = params.string_or("contact_last_name", "");
    let phone = params.string("contact_phone")?;
    let email = params.string_or("contact_email", "");
    let org = params.string_or("contact_org", "");

    let formatted_name = if last_name.is_empty() {
        first_name.clone()
    } else {
        format!("{first_name} {last_name}")
    };

    let mut name = Map::new();
    name.insert("formatted_name".to_string(), json!(formatted_name));
    name.insert("first_name".to_string(), json!(first_name));
    if !last_name.is_empty() {
        name.insert("last_name".to_string(), json!(last_name));
    }

    // optional sub-objects are omitted entirely, never sent as null
    let mut contact = Map::new();
    contact.insert("name".to_string(), Value::Object(name));
    contact.insert(
        "phones".to_string(),
        json!([{ "phone": phone, "type": "CELL" }]),
    );
    if !email.is_empty() {
        contact.insert(
            "emails".to_string(),
            json!([{ "email": email, "type": "WORK" }]),
        );
    }
    if !org.is_empty() {
        contact.insert("org".to_string(), json!({ "company": org }));
    }

    body.insert("type".to_string(), json!("contacts"));
    body.insert("contacts".to_string(), json!([contact]));
    Ok(body)
}

fn reaction_payload(params: &Params) -> Result<Map<String, Value>> {
    let mut body = recipient_base(params)?;
    body.insert("type".to_string(), json!("reaction"));
    // an empty emoji removes a previous reaction
    body.insert(
        "reaction".to_string(),
        json!({
            "message_id": params.string("message_id")?,
            "emoji": params.string("emoji")?,
        }),
    );
    Ok(body)
}

fn buttons_payload(params: &Params) -> Result<Map<String, Value>> {
    let mut body = recipient_base(params)?;
    let buttons: Vec<Button> = params.list("buttons")?;

    if buttons.is_empty() {
        return Err(Error::Validation(
            "at least one button is required".to_string(),
        ));
    }
    if buttons.len() > MAX_BUTTONS {
        return Err(Error::Validation(
            "maximum 3 buttons allowed per message".to_string(),
        ));
    }

    let rendered: Vec<Value> = buttons
        .iter()
        .map(|button| {
            json!({
                "type": "reply",
                "reply": {
                    "id": button.id,
                    "title": truncate(&button.title, BUTTON_TITLE_LIMIT),
                },
            })
        })
        .collect();

    let mut interactive = Map::new();
    interactive.insert("type".to_string(), json!("button"));
    interactive.insert(
        "body".to_string(),
        json!({ "text": params.string("body_text")? }),
    );
    interactive.insert("action".to_string(), json!({ "buttons": rendered }));
    attach_header_footer(params, &mut interactive);

    body.insert("type".to_string(), json!("interactive"));
    body.insert("interactive".to_string(), Value::Object(interactive));
    Ok(body)
}

fn list_payload(params: &Params) -> Result<Map<String, Value>> {
    let mut body = recipient_base(params)?;
    let sections: Vec<ListSection> = params.list("sections")?;

    if sections.is_empty() {
        return Err(Error::Validation(
            "at least one section is required".to_string(),
        ));
    }
    if sections.len() > MAX_SECTIONS {
        return Err(Error::Validation(
            "maximum 10 sections allowed".to_string(),
        ));
    }

    // The API also caps total rows across all sections at 10; that overflow
    // is left for the API to reject.
    let rendered: Vec<Value> = sections
        .iter()
        .map(|section| {
            json!({
                "title": truncate(&section.title, SECTION_TITLE_LIMIT),
                "rows": section
                    .items
                    .iter()
                    .map(|item| {
                        json!({
                            "id": item.id,
                            "title": truncate(&item.title, ROW_TITLE_LIMIT),
                            "description": truncate(&item.description, ROW_DESCRIPTION_LIMIT),
                        })
                    })
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    let mut interactive = Map::new();
    interactive.insert("type".to_string(), json!("list"));
    interactive.insert(
        "body".to_string(),
        json!({ "text": params.string("body_text")? }),
    );
    interactive.insert(
        "action".to_string(),
        json!({
            "button": truncate(&params.string("button_text")?, LIST_BUTTON_LIMIT),
            "sections": rendered,
        }),
    );
    attach_header_footer(params, &mut interactive);

    body.insert("type".to_string(), json!("interactive"));
    body.insert("interactive".to_string(), Value::Object(interactive));
    Ok(body)
}

fn cta_payload(params: &Params) -> Result<Map<String, Value>> {
    let mut body = recipient_base(params)?;
    let cta_type = params.string_or("cta_type", "url");
    let display_text = params.string("cta_button_text")?;
    let body_text = params.string("body_text")?;

    let interactive = match cta_type.as_str() {
        "url" => json!({
            "type": "cta_url",
            "body": { "text": body_text },
            "action": {
                "name": "cta_url",
                "parameters": {
                    "display_text": display_text,
                    "url": params.string("cta_url")?,
                },
            },
        }),
        "phone" => json!({
            "type": "cta_call",
            "body": { "text": body_text },
            "action": {
                "name": "cta_call",
                "parameters": {
                    "display_text": display_text,
                    "phone_number": params.string("cta_phone")?,
                },
            },
        }),
        other => {
            return Err(Error::Validation(format!("unknown CTA type `{other}`")));
        }
    };

    body.insert("type".to_string(), json!("interactive"));
    body.insert("interactive".to_string(), interactive);
    Ok(body)
}

fn location_request_payload(params: &Params) -> Result<Map<String, Value>> {
    let mut body = recipient_base(params)?;
    body.insert("type".to_string(), json!("interactive"));
    body.insert(
        "interactive".to_string(),
        json!({
            "type": "location_request_message",
            "body": { "text": params.string("body_text")? },
            "action": { "name": "send_location" },
        }),
    );
    Ok(body)
}

fn template_payload(params: &Params) -> Result<Map<String, Value>> {
    let mut body = recipient_base(params)?;
    let variables: Vec<TemplateVariable> = params.list("template_variables")?;

    let mut template = Map::new();
    template.insert("name".to_string(), json!(params.string("template_name")?));
    template.insert(
        "language".to_string(),
        json!({ "code": params.string_or("language_code", "es") }),
    );

    // Body parameters are collected before header parameters, and `button`
    // variables are not materialized. Deployed templates depend on this
    // exact component order.
    let mut components = Vec::new();
    for wanted in [TemplateComponent::Body, TemplateComponent::Header] {
        let parameters: Vec<Value> = variables
            .iter()
            .filter(|variable| variable.component == wanted)
            .map(|variable| json!({ "type": "text", "text": variable.value }))
            .collect();
        if !parameters.is_empty() {
            components.push(json!({ "type": wanted.as_str(), "parameters": parameters }));
        }
    }
    if !components.is_empty() {
        template.insert("components".to_string(), json!(components));
    }

    body.insert("type".to_string(), json!("template"));
    body.insert("template".to_string(), Value::Object(template));
    Ok(body)
}

fn media_payload(params: &Params, kind: &'static str) -> Result<Map<String, Value>> {
    let mut body = recipient_base(params)?;
    let source = params.string_or("media_source", "url");

    let mut media = Map::new();
    match source.as_str() {
        "url" => {
            media.insert("link".to_string(), json!(params.string("media_url")?));
        }
        "id" => {
            media.insert("id".to_string(), json!(params.string("media_id")?));
        }
        other => {
            return Err(Error::Validation(format!(
                "unknown media source `{other}`"
            )));
        }
    }

    let caption = params.string_or("caption", "");
    if !caption.is_empty() && matches!(kind, "image" | "video" | "document") {
        media.insert("caption".to_string(), json!(caption));
    }
    if kind == "document" {
        let filename = params.string_or("filename", "");
        if !filename.is_empty() {
            media.insert("filename".to_string(), json!(filename));
        }
    }

    body.insert("type".to_string(), json!(kind));
    body.insert(kind.to_string(), Value::Object(media));
    Ok(body)
}

fn product_payload(params: &Params) -> Result<Map<String, Value>> {
    let mut body = recipient_base(params)?;
    let text = params.string_or("body_text", "");

    body.insert("type".to_string(), json!("interactive"));
    body.insert(
        "interactive".to_string(),
        json!({
            "type": "product",
            // the API rejects an empty body text; a single space passes
            "body": { "text": if text.is_empty() { " ".to_string() } else { text } },
            "action": {
                "catalog_id": params.string("catalog_id")?,
                "product_retailer_id": params.string("product_retailer_id")?,
            },
        }),
    );
    Ok(body)
}

fn product_list_payload(params: &Params) -> Result<Map<String, Value>> {
    let mut body = recipient_base(params)?;
    let sections: Vec<ProductSection> = params.list("product_sections")?;

    let rendered: Vec<Value> = sections
        .iter()
        .map(|section| {
            json!({
                "title": section.title,
                "product_items": section
                    .product_ids
                    .split(',')
                    .map(|id| json!({ "product_retailer_id": id.trim() }))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    let header = params.string_or("header_text", "");
    body.insert("type".to_string(), json!("interactive"));
    body.insert(
        "interactive".to_string(),
        json!({
            "type": "product_list",
            "header": {
                "type": "text",
                "text": if header.is_empty() { "Products".to_string() } else { header },
            },
            "body": { "text": params.string("body_text")? },
            "action": {
                "catalog_id": params.string("catalog_id")?,
                "sections": rendered,
            },
        }),
    );
    Ok(body)
}

fn attach_header_footer(params: &Params, interactive: &mut Map<String, Value>) {
    let header = params.string_or("header_text", "");
    if !header.is_empty() {
        interactive.insert(
            "header".to_string(),
            json!({ "type": "text", "text": truncate(&header, HEADER_TEXT_LIMIT) }),
        );
    }
    let footer = params.string_or("footer_text", "");
    if !footer.is_empty() {
        interactive.insert(
            "footer".to_string(),
            json!({ "text": truncate(&footer, FOOTER_TEXT_LIMIT) }),
        );
    }
}
