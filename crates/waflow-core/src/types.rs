//! Collection types decoded from the field bag

use serde::Deserialize;

/// Quick-reply button of a `sendButtons` message
#[derive(Debug, Clone, Deserialize)]
pub struct Button {
    /// Unique identifier (max 256 characters)
    pub id: String,
    /// Button label, truncated to 20 characters on the wire
    pub title: String,
}

/// Section of a `sendList` message
#[derive(Debug, Clone, Deserialize)]
pub struct ListSection {
    /// Section header, truncated to 24 characters on the wire
    #[serde(default)]
    pub title: String,
    /// Rows of this section
    #[serde(default)]
    pub items: Vec<ListItem>,
}

/// Row of a list section
#[derive(Debug, Clone, Deserialize)]
pub struct ListItem {
    /// Unique row identifier (max 200 characters)
    pub id: String,
    /// Row title, truncated to 24 characters on the wire
    pub title: String,
    /// Row description, truncated to 72 characters on the wire
    #[serde(default)]
    pub description: String,
}

/// Template component a variable belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateComponent {
    /// Header parameters
    Header,
    /// Body parameters
    Body,
    /// Button parameters
    Button,
}

impl TemplateComponent {
    /// Wire name of the component
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Body => "body",
            Self::Button => "button",
        }
    }
}

/// Template variable, grouped into components by order of appearance
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateVariable {
    /// Component the variable belongs to
    pub component: TemplateComponent,
    /// Substituted text value
    pub value: String,
}

/// Product section of a `sendProductList` message
#[derive(Debug, Clone, Deserialize)]
pub struct ProductSection {
    /// Section title
    #[serde(default)]
    pub title: String,
    /// Comma-separated product retailer IDs
    #[serde(default)]
    pub product_ids: String,
}
