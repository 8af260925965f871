use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ItemId);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

pub const DEFAULT_CATEGORY: &str = "other";

// The label set belongs to the server (`GET /categories`); any string decodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub String);

impl Category {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORY)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        if label.is_empty() {
            return Err(UnknownVariant {
                kind: "category",
                value: s.to_string(),
            });
        }
        Ok(Self::new(label))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Id,
    Name,
    Price,
    Rating,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::Rating => "rating",
        }
    }
}

impl FromStr for SortField {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "price" => Ok(SortField::Price),
            "rating" => Ok(SortField::Rating),
            _ => Err(UnknownVariant {
                kind: "sort field",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(UnknownVariant {
                kind: "sort order",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

impl ListQuery {
    pub fn is_unfiltered(&self) -> bool {
        self.category.is_none() && self.sort_by.is_none() && self.order.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_accepts_any_server_label() {
        assert_eq!(" beauty ".parse::<Category>(), Ok(Category::new("beauty")));
        assert!("  ".parse::<Category>().is_err());
        let decoded: Category = serde_json::from_str("\"garden\"").expect("label");
        assert_eq!(decoded.as_str(), "garden");
        assert_eq!(Category::default().as_str(), DEFAULT_CATEGORY);
    }

    #[test]
    fn list_query_omits_unset_fields() {
        let query = ListQuery {
            category: Some(Category::new("home")),
            sort_by: None,
            order: Some(SortOrder::Desc),
        };
        let value = serde_json::to_value(&query).expect("serialize");
        assert_eq!(value, serde_json::json!({"category": "home", "order": "desc"}));
        assert!(ListQuery::default().is_unfiltered());
    }

    #[test]
    fn item_id_is_transparent_on_the_wire() {
        let id: ItemId = serde_json::from_str("42").expect("id");
        assert_eq!(id, ItemId(42));
        assert_eq!(id.to_string(), "42");
    }
}
