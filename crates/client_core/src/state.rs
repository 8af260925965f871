use std::time::Duration;

use shared::{
    domain::{ItemId, ListQuery},
    protocol::{Item, Statistics},
};

use crate::{
    form::ItemForm,
    status::{NotificationSlot, StatusBoard},
};

/// Local mirror of the catalog. The list is only replaced wholesale by a refetch.
#[derive(Debug, Clone)]
pub struct CatalogState {
    pub server_message: String,
    pub health_status: String,
    pub items: Vec<Item>,
    pub query: ListQuery,
    pub search_term: String,
    pub selected: Option<Item>,
    pub editing: Option<ItemId>,
    pub create_form: ItemForm,
    pub edit_form: ItemForm,
    pub statistics: Option<Statistics>,
    pub categories: Vec<String>,
    pub loading: bool,
    pub status: StatusBoard,
    pub notification: NotificationSlot,
}

impl CatalogState {
    pub fn new(notification_ttl: Duration) -> Self {
        Self {
            server_message: String::new(),
            health_status: String::new(),
            items: Vec::new(),
            query: ListQuery::default(),
            search_term: String::new(),
            selected: None,
            editing: None,
            create_form: ItemForm::default(),
            edit_form: ItemForm::default(),
            statistics: None,
            categories: Vec::new(),
            loading: false,
            status: StatusBoard::default(),
            notification: NotificationSlot::new(notification_ttl),
        }
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.item(id).is_some()
    }

    pub fn item_ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }
}
