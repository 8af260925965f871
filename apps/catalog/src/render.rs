//! Plain-text rendering of the catalog state.

use std::fmt::Write as _;

use client_core::{ActionStatus, CatalogState, Notification, NotificationKind};
use shared::protocol::{Item, Statistics};

pub fn item_card(item: &Item) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID: {}", item.id);
    let _ = writeln!(out, "  name:        {}", item.name);
    let _ = writeln!(
        out,
        "  description: {}",
        item.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("none")
    );
    let _ = writeln!(out, "  price:       {}", item.price);
    let _ = writeln!(
        out,
        "  available:   {}",
        if item.is_available { "yes" } else { "no" }
    );
    if let Some(category) = &item.category {
        let _ = writeln!(out, "  category:    {category}");
    }
    if let Some(stock) = item.stock_count {
        let _ = writeln!(out, "  stock:       {stock}");
    }
    if !item.tags.is_empty() {
        let _ = writeln!(out, "  tags:        {}", item.tags.join(", "));
    }
    if let Some(url) = item.image_url.as_deref() {
        let _ = writeln!(out, "  image:       {url}");
    }
    if let Some(rating) = item.rating {
        let _ = writeln!(out, "  rating:      {rating:.1}");
    }
    out
}

pub fn item_list(state: &CatalogState) -> String {
    if state.items.is_empty() && state.status.items == ActionStatus::Idle {
        return "No items.\n".to_string();
    }
    state
        .items
        .iter()
        .map(item_card)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `None` for idle actions so quiet commands print nothing extra.
pub fn status_line(label: &str, status: &ActionStatus) -> Option<String> {
    match status {
        ActionStatus::Idle => None,
        ActionStatus::Loading(m) => Some(format!("{label}: {m}")),
        ActionStatus::Success(m) => Some(format!("{label}: {m}")),
        ActionStatus::Error(m) => Some(format!("{label}: error: {m}")),
    }
}

pub fn statistics_panel(statistics: Option<&Statistics>) -> String {
    let Some(stats) = statistics else {
        return "Statistics unavailable.\n".to_string();
    };
    format!(
        "total items:     {}\navailable items: {}\ntotal value:     {:.2}\naverage price:   {:.2}\n",
        stats.total_items, stats.available_items, stats.total_value, stats.average_price
    )
}

pub fn category_list(categories: &[String]) -> String {
    if categories.is_empty() {
        return "No categories.\n".to_string();
    }
    categories.iter().map(|c| format!("- {c}\n")).collect()
}

pub fn notification(notification: &Notification) -> String {
    match notification.kind {
        NotificationKind::Success => format!("[ok] {}", notification.message),
        NotificationKind::Error => format!("[error] {}", notification.message),
    }
}

pub fn server_status(state: &CatalogState) -> String {
    format!(
        "root message: {}\nhealth:       {}\n",
        state.server_message, state.health_status
    )
}
