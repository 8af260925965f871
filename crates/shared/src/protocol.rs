use serde::{Deserialize, Serialize};

use crate::domain::{Category, ItemId};

// extended fields default to empty so basic API responses decode too
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ItemPayload {
    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            is_available: self.is_available,
            category: self.category,
            stock_count: self.stock_count,
            tags: self.tags.unwrap_or_default(),
            image_url: self.image_url,
            rating: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_items: u64,
    pub available_items: u64,
    pub total_value: f64,
    pub average_price: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootMessage {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

// bare array or {"categories": [...]}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryList {
    Bare(Vec<String>),
    Wrapped { categories: Vec<String> },
}

impl CategoryList {
    pub fn into_labels(self) -> Vec<String> {
        match self {
            CategoryList::Bare(labels) | CategoryList::Wrapped { categories: labels } => labels,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery<'a> {
    pub q: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn basic_item_decodes_without_extended_fields() {
        let item: Item = serde_json::from_value(json!({
            "id": 1,
            "name": "Widget",
            "description": null,
            "price": 9.99,
            "is_available": true
        }))
        .expect("item");
        assert_eq!(item.id, ItemId(1));
        assert_eq!(item.price, 9.99);
        assert!(item.tags.is_empty());
        assert_eq!(item.category, None);
        assert_eq!(item.rating, None);
    }

    #[test]
    fn basic_payload_serializes_only_basic_fields() {
        let payload = ItemPayload {
            name: "Widget".into(),
            description: None,
            price: 9.99,
            is_available: true,
            category: None,
            stock_count: None,
            tags: None,
            image_url: None,
        };
        assert_eq!(
            serde_json::to_value(&payload).expect("payload"),
            json!({
                "name": "Widget",
                "description": null,
                "price": 9.99,
                "is_available": true
            })
        );
    }

    #[test]
    fn extended_payload_keeps_empty_tag_list() {
        let payload = ItemPayload {
            name: "Lamp".into(),
            description: Some("desk lamp".into()),
            price: 20.0,
            is_available: false,
            category: Some(Category::new("home")),
            stock_count: Some(0),
            tags: Some(Vec::new()),
            image_url: None,
        };
        let value = serde_json::to_value(&payload).expect("payload");
        assert_eq!(value["category"], json!("home"));
        assert_eq!(value["stock_count"], json!(0));
        assert_eq!(value["tags"], json!([]));
    }

    #[test]
    fn category_list_accepts_both_shapes() {
        let bare: CategoryList = serde_json::from_value(json!(["books", "toys"])).expect("bare");
        let wrapped: CategoryList =
            serde_json::from_value(json!({"categories": ["books", "toys"]})).expect("wrapped");
        assert_eq!(bare.into_labels(), wrapped.into_labels());
    }
}
