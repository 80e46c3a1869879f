//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Price in currency units, two decimal places
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Stored upload filename (not a path), null when no image was attached
    #[serde(default)]
    pub image: Option<String>,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Filled in by the upload handler, never read from the request body
    #[serde(skip_deserializing)]
    pub image: Option<String>,
}

/// Update menu item payload
///
/// Serializes only the provided fields so it can be merged onto the
/// stored document. `image` is only set when a new file was uploaded,
/// which keeps the existing filename otherwise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl MenuItemUpdate {
    /// True when the request carries nothing to change
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.image.is_none()
    }
}
