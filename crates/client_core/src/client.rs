use std::time::Duration;

use shared::{
    domain::{ItemId, ListQuery},
    protocol::{Item, Statistics},
};
use tracing::{info, warn};

use crate::{
    api::CatalogApi,
    config::ApiVariant,
    error::{ClientError, ClientResult},
    form::ItemForm,
    state::CatalogState,
    status::{ActionStatus, NotificationKind},
};

const MISSING_ID: &str = "Enter an item ID.";
const INVALID_ID: &str = "Item ID must be a positive integer.";

/// Asked before an irreversible call is issued.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

/// Failures never leave a handler: they become the action's status text and
/// a `warn!` line. Successful mutations refetch instead of patching in place.
pub struct CatalogClient<A: CatalogApi> {
    api: A,
    variant: ApiVariant,
    pub state: CatalogState,
}

impl<A: CatalogApi> CatalogClient<A> {
    pub fn new(api: A, variant: ApiVariant, notification_ttl: Duration) -> Self {
        Self {
            api,
            variant,
            state: CatalogState::new(notification_ttl),
        }
    }

    pub fn variant(&self) -> ApiVariant {
        self.variant
    }

    pub async fn check_server_status(&mut self) {
        let outcome = async {
            let root = self.api.root().await?;
            let health = self.api.health().await?;
            Ok::<_, ClientError>((root, health))
        }
        .await;

        match outcome {
            Ok((root, health)) => {
                self.state.server_message = root.message;
                self.state.health_status = format!("{} - {}", health.status, health.message);
            }
            Err(err) => {
                warn!("server status check failed: {err}");
                self.state.server_message = err.status_text("server status check failed");
                self.state.health_status = "error".to_string();
            }
        }
    }

    pub async fn initial_load(&mut self) {
        self.state.loading = true;
        self.state.status.items = ActionStatus::loading("Loading items...");

        let api = &self.api;
        let query = self.state.query.clone();
        let extended = self.variant.is_extended();
        let (items, statistics, categories) = futures::join!(
            api.list_items(&query),
            async move {
                if extended {
                    Some(api.statistics().await)
                } else {
                    None
                }
            },
            async move {
                if extended {
                    Some(api.categories().await)
                } else {
                    None
                }
            }
        );

        self.apply_items(items, "failed to fetch items");
        if let Some(statistics) = statistics {
            self.apply_statistics(statistics);
        }
        if let Some(categories) = categories {
            self.apply_categories(categories);
        }
        self.state.loading = false;
    }

    pub async fn load_items(&mut self) {
        self.state.status.items = ActionStatus::loading("Loading items...");
        let items = self.api.list_items(&self.state.query).await;
        self.apply_items(items, "failed to fetch items");
    }

    pub async fn apply_query(&mut self, query: ListQuery) {
        self.state.query = query;
        self.load_items().await;
    }

    /// Searches name, description and tags. A blank term lists instead.
    pub async fn search(&mut self, term: &str) {
        let term = term.trim();
        self.state.search_term = term.to_string();
        if term.is_empty() {
            self.state.status.search = ActionStatus::Idle;
            self.load_items().await;
            return;
        }

        self.state.status.search = ActionStatus::loading("Searching...");
        match self.api.search_items(term).await {
            Ok(items) => {
                self.state.status.search =
                    ActionStatus::success(format!("{} result(s) for '{term}'", items.len()));
                self.state.items = items;
            }
            Err(err) => {
                warn!(term, "search failed: {err}");
                self.state.status.search = ActionStatus::error(err.status_text("search failed"));
            }
        }
    }

    pub async fn get_item(&mut self, id: Option<ItemId>) -> Option<Item> {
        self.state.selected = None;
        self.state.status.lookup = ActionStatus::loading("Looking up...");
        let id = match require_id(id) {
            Ok(id) => id,
            Err(message) => {
                self.state.status.lookup = ActionStatus::error(message);
                return None;
            }
        };

        match self.api.get_item(id).await {
            Ok(item) => {
                self.state.status.lookup = ActionStatus::Idle;
                self.state.selected = Some(item.clone());
                Some(item)
            }
            Err(err) => {
                warn!(%id, "item lookup failed: {err}");
                self.state.status.lookup = ActionStatus::error(err.status_text("item not found"));
                None
            }
        }
    }

    pub async fn create_item(&mut self) -> Option<Item> {
        self.state.status.create = ActionStatus::loading("Creating...");
        let result = match self.state.create_form.to_payload(self.variant) {
            Ok(payload) => self.api.create_item(&payload).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(created) => {
                info!(id = %created.id, name = %created.name, "item created");
                let message = format!("Item created: ID {}, name: {}", created.id, created.name);
                self.state.status.create = ActionStatus::success(message.clone());
                self.state
                    .notification
                    .post(NotificationKind::Success, message);
                self.state.create_form.reset();
                self.invalidate().await;
                Some(created)
            }
            Err(err) => {
                warn!("create item failed: {err}");
                self.fail_mutation(Mutation::Create, &err);
                None
            }
        }
    }

    pub async fn begin_edit(&mut self, id: Option<ItemId>) -> bool {
        let id = match require_id(id) {
            Ok(id) => id,
            Err(message) => {
                self.state.status.update = ActionStatus::error(message);
                return false;
            }
        };

        match self.api.get_item(id).await {
            Ok(item) => {
                self.state.edit_form = ItemForm::from_item(&item);
                self.state.editing = Some(item.id);
                self.state.status.update = ActionStatus::Idle;
                true
            }
            Err(err) => {
                warn!(%id, "loading item for edit failed: {err}");
                self.state.status.update = ActionStatus::error(err.status_text("item not found"));
                false
            }
        }
    }

    pub async fn update_item(&mut self) -> Option<Item> {
        self.state.status.update = ActionStatus::loading("Updating...");
        let id = match require_id(self.state.editing) {
            Ok(id) => id,
            Err(message) => {
                self.state.status.update = ActionStatus::error(message);
                return None;
            }
        };

        let result = match self.state.edit_form.to_payload(self.variant) {
            Ok(payload) => self.api.update_item(id, &payload).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(updated) => {
                info!(id = %updated.id, "item updated");
                let message = format!(
                    "Item updated: ID {}, new name: {}",
                    updated.id, updated.name
                );
                self.state.status.update = ActionStatus::success(message.clone());
                self.state
                    .notification
                    .post(NotificationKind::Success, message);
                self.state.edit_form.reset();
                self.state.editing = None;
                self.invalidate().await;
                Some(updated)
            }
            Err(err) => {
                warn!(%id, "update item failed: {err}");
                self.fail_mutation(Mutation::Update, &err);
                None
            }
        }
    }

    /// Declining clears the status and sends nothing.
    pub async fn delete_item(&mut self, id: Option<ItemId>, confirm: &dyn Confirm) -> bool {
        let id = match require_id(id) {
            Ok(id) => id,
            Err(message) => {
                self.state.status.delete = ActionStatus::error(message);
                return false;
            }
        };

        if !confirm.confirm(&format!("Really delete item ID {id}?")) {
            self.state.status.delete = ActionStatus::Idle;
            return false;
        }

        self.state.status.delete = ActionStatus::loading("Deleting...");
        match self.api.delete_item(id).await {
            Ok(confirmation) => {
                info!(%id, "item deleted");
                self.state.status.delete = ActionStatus::success(confirmation.message.clone());
                self.state
                    .notification
                    .post(NotificationKind::Success, confirmation.message);
                if self.state.selected.as_ref().is_some_and(|item| item.id == id) {
                    self.state.selected = None;
                }
                if self.state.editing == Some(id) {
                    self.state.editing = None;
                    self.state.edit_form.reset();
                }
                self.invalidate().await;
                true
            }
            Err(err) => {
                warn!(%id, "delete item failed: {err}");
                self.fail_mutation(Mutation::Delete, &err);
                false
            }
        }
    }

    /// Failures keep the previous panel contents.
    pub async fn refresh_statistics(&mut self) {
        let statistics = self.api.statistics().await;
        self.apply_statistics(statistics);
    }

    pub async fn refresh_categories(&mut self) {
        let categories = self.api.categories().await;
        self.apply_categories(categories);
    }

    pub async fn invalidate(&mut self) {
        if self.variant.is_extended() {
            self.initial_load().await;
        } else {
            self.load_items().await;
        }
    }

    fn apply_items(&mut self, items: ClientResult<Vec<Item>>, fallback: &str) {
        match items {
            Ok(items) => {
                self.state.items = items;
                self.state.status.items = ActionStatus::Idle;
            }
            Err(err) => {
                warn!("fetching items failed: {err}");
                self.state.status.items = ActionStatus::error(err.status_text(fallback));
            }
        }
    }

    fn apply_statistics(&mut self, statistics: ClientResult<Statistics>) {
        match statistics {
            Ok(statistics) => self.state.statistics = Some(statistics),
            Err(err) => warn!("fetching statistics failed: {err}"),
        }
    }

    fn apply_categories(&mut self, categories: ClientResult<Vec<String>>) {
        match categories {
            Ok(categories) => self.state.categories = categories,
            Err(err) => warn!("fetching categories failed: {err}"),
        }
    }

    fn fail_mutation(&mut self, mutation: Mutation, err: &ClientError) {
        let message = err.status_text(mutation.fallback());
        self.state
            .notification
            .post(NotificationKind::Error, message.clone());
        let status = ActionStatus::error(message);
        match mutation {
            Mutation::Create => self.state.status.create = status,
            Mutation::Update => self.state.status.update = status,
            Mutation::Delete => self.state.status.delete = status,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    fn fallback(self) -> &'static str {
        match self {
            Mutation::Create => "failed to create item",
            Mutation::Update => "failed to update item",
            Mutation::Delete => "failed to delete item",
        }
    }
}

fn require_id(id: Option<ItemId>) -> Result<ItemId, &'static str> {
    match id {
        None => Err(MISSING_ID),
        Some(id) if id.0 <= 0 => Err(INVALID_ID),
        Some(id) => Ok(id),
    }
}
