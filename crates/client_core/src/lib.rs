pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod state;
pub mod status;
pub mod tags;

pub use api::{CatalogApi, HttpCatalogApi};
pub use client::{AlwaysConfirm, CatalogClient, Confirm, NeverConfirm};
pub use config::{load_settings, ApiVariant, Settings};
pub use error::{ClientError, ClientResult};
pub use form::ItemForm;
pub use state::CatalogState;
pub use status::{ActionStatus, Notification, NotificationKind, StatusBoard};

/// Builds an HTTP-backed client from resolved settings.
pub fn connect(settings: &Settings) -> ClientResult<CatalogClient<HttpCatalogApi>> {
    let base_url = settings.resolved_base_url();
    let api = HttpCatalogApi::new(base_url.as_deref(), settings.request_timeout())?;
    Ok(CatalogClient::new(
        api,
        settings.variant,
        settings.notification_ttl(),
    ))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
