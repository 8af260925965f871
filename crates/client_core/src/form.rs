//! Editable item form and its coercion into a request payload.

use shared::{
    domain::Category,
    protocol::{Item, ItemPayload},
};

use crate::{
    config::ApiVariant,
    error::{ClientError, ClientResult},
    tags::{join_tags, split_tags},
};

/// Item fields as the user typed them. Numbers stay strings until submit.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub is_available: bool,
    pub category: Category,
    pub stock_count: String,
    pub tags: String,
    pub image_url: String,
}

impl Default for ItemForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: "0".to_string(),
            is_available: true,
            category: Category::default(),
            stock_count: "0".to_string(),
            tags: String::new(),
            image_url: String::new(),
        }
    }
}

impl ItemForm {
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            price: item.price.to_string(),
            is_available: item.is_available,
            category: item.category.clone().unwrap_or_default(),
            stock_count: item.stock_count.unwrap_or_default().to_string(),
            tags: join_tags(&item.tags),
            image_url: item.image_url.clone().unwrap_or_default(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Name and description go out exactly as typed; only the numeric fields
    /// are coerced. Extended fields are sent for the extended variant only.
    pub fn to_payload(&self, variant: ApiVariant) -> ClientResult<ItemPayload> {
        if self.name.trim().is_empty() {
            return Err(ClientError::validation("name is required"));
        }
        if self.price.trim().is_empty() {
            return Err(ClientError::validation("price is required"));
        }
        let price = parse_leading_float(&self.price)
            .ok_or_else(|| ClientError::validation("price must be a number"))?;

        let mut payload = ItemPayload {
            name: self.name.clone(),
            description: Some(self.description.clone()),
            price,
            is_available: self.is_available,
            category: None,
            stock_count: None,
            tags: None,
            image_url: None,
        };

        if variant.is_extended() {
            payload.category = Some(self.category.clone());
            payload.stock_count = Some(parse_stock_count(&self.stock_count)?);
            payload.tags = Some(split_tags(&self.tags));
            payload.image_url = non_blank(&self.image_url);
        }

        Ok(payload)
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_stock_count(raw: &str) -> ClientResult<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let digits_end = trimmed
        .char_indices()
        .find(|(idx, c)| !(c.is_ascii_digit() || (*idx == 0 && (*c == '+' || *c == '-'))))
        .map_or(trimmed.len(), |(idx, _)| idx);
    trimmed[..digits_end]
        .parse::<i64>()
        .ok()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| ClientError::validation("stock count must be a non-negative whole number"))
}

/// Longest numeric prefix, so `"9.99 USD"` reads as 9.99.
pub fn parse_leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
