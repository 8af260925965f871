use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use client_core::{
    config::DEFAULT_SETTINGS_FILE, load_settings, ActionStatus, AlwaysConfirm, ApiVariant,
    CatalogApi, CatalogClient, Confirm, ItemForm, Settings,
};
use shared::domain::{Category, ItemId, ListQuery, SortField, SortOrder};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(name = "catalog", about = "Browse and edit a remote product catalog")]
struct Cli {
    /// Base URL of the catalog API.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// `basic` for plain items, `extended` for the full catalog.
    #[arg(long, global = true)]
    variant: Option<ApiVariant>,
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,
    /// Print fetched data as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Query the root and health endpoints.
    Status,
    /// Load items, statistics and categories together.
    Load,
    List {
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        sort_by: Option<SortField>,
        #[arg(long)]
        order: Option<SortOrder>,
    },
    Search {
        #[arg(default_value = "")]
        query: String,
    },
    Get {
        id: i64,
    },
    Create(ItemFields),
    /// Fetch an item, apply the given fields and submit the full record.
    Update {
        id: i64,
        #[command(flatten)]
        fields: ItemFields,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    Stats,
    Categories,
}

#[derive(Args, Debug, Default)]
struct ItemFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    available: Option<bool>,
    #[arg(long)]
    category: Option<Category>,
    #[arg(long)]
    stock: Option<String>,
    /// Comma-separated tags.
    #[arg(long)]
    tags: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
}

impl ItemFields {
    fn apply(self, form: &mut ItemForm) {
        if let Some(v) = self.name {
            form.name = v;
        }
        if let Some(v) = self.description {
            form.description = v;
        }
        if let Some(v) = self.price {
            form.price = v;
        }
        if let Some(v) = self.available {
            form.is_available = v;
        }
        if let Some(v) = self.category {
            form.category = v;
        }
        if let Some(v) = self.stock {
            form.stock_count = v;
        }
        if let Some(v) = self.tags {
            form.tags = v;
        }
        if let Some(v) = self.image_url {
            form.image_url = v;
        }
    }
}

struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

fn resolve_settings(cli: &Cli) -> Settings {
    let mut settings = load_settings(&cli.settings);
    if let Some(url) = &cli.api_url {
        settings.api_base_url = Some(url.clone());
    }
    if let Some(variant) = cli.variant {
        settings.variant = variant;
    }
    settings
}

fn print_status(label: &str, status: &ActionStatus) {
    if let Some(line) = render::status_line(label, status) {
        println!("{line}");
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run<A: CatalogApi>(client: &mut CatalogClient<A>, command: Command, json: bool) -> Result<()> {
    match command {
        Command::Status => {
            client.check_server_status().await;
            print!("{}", render::server_status(&client.state));
        }
        Command::Load => {
            client.check_server_status().await;
            client.initial_load().await;
            print!("{}", render::server_status(&client.state));
            print_status("items", &client.state.status.items);
            println!("{}", render::item_list(&client.state));
            if client.variant().is_extended() {
                print!(
                    "{}",
                    render::statistics_panel(client.state.statistics.as_ref())
                );
                print!("{}", render::category_list(&client.state.categories));
            }
        }
        Command::List {
            category,
            sort_by,
            order,
        } => {
            client
                .apply_query(ListQuery {
                    category,
                    sort_by,
                    order,
                })
                .await;
            print_status("items", &client.state.status.items);
            if json {
                print_json(&client.state.items)?;
            } else {
                print!("{}", render::item_list(&client.state));
            }
        }
        Command::Search { query } => {
            client.search(&query).await;
            print_status("search", &client.state.status.search);
            print_status("items", &client.state.status.items);
            if json {
                print_json(&client.state.items)?;
            } else {
                print!("{}", render::item_list(&client.state));
            }
        }
        Command::Get { id } => {
            client.get_item(Some(ItemId(id))).await;
            print_status("lookup", &client.state.status.lookup);
            if let Some(item) = &client.state.selected {
                if json {
                    print_json(item)?;
                } else {
                    print!("{}", render::item_card(item));
                }
            }
        }
        Command::Create(fields) => {
            fields.apply(&mut client.state.create_form);
            client.create_item().await;
            print_status("create", &client.state.status.create);
        }
        Command::Update { id, fields } => {
            if client.begin_edit(Some(ItemId(id))).await {
                fields.apply(&mut client.state.edit_form);
                client.update_item().await;
            }
            print_status("update", &client.state.status.update);
        }
        Command::Delete { id, yes } => {
            let confirm: &dyn Confirm = if yes { &AlwaysConfirm } else { &StdinConfirm };
            client.delete_item(Some(ItemId(id)), confirm).await;
            print_status("delete", &client.state.status.delete);
        }
        Command::Stats => {
            client.refresh_statistics().await;
            if json {
                print_json(&client.state.statistics)?;
            } else {
                print!(
                    "{}",
                    render::statistics_panel(client.state.statistics.as_ref())
                );
            }
        }
        Command::Categories => {
            client.refresh_categories().await;
            if json {
                print_json(&client.state.categories)?;
            } else {
                print!("{}", render::category_list(&client.state.categories));
            }
        }
    }

    if let Some(notification) = client.state.notification.current() {
        eprintln!("{}", render::notification(notification));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = resolve_settings(&cli);
    tracing::debug!(?settings, "resolved settings");
    let mut client = client_core::connect(&settings)?;
    run(&mut client, cli.command, cli.json).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_fields_override_only_given_values() {
        let mut form = ItemForm {
            name: "Lamp".into(),
            tags: "light, office".into(),
            ..ItemForm::default()
        };
        ItemFields {
            price: Some("12.5".into()),
            available: Some(false),
            ..ItemFields::default()
        }
        .apply(&mut form);
        assert_eq!(form.name, "Lamp");
        assert_eq!(form.tags, "light, office");
        assert_eq!(form.price, "12.5");
        assert!(!form.is_available);
    }

    #[test]
    fn cli_parses_list_filters() {
        let cli = Cli::parse_from([
            "catalog",
            "--variant",
            "extended",
            "list",
            "--category",
            "books",
            "--sort-by",
            "price",
            "--order",
            "desc",
        ]);
        assert_eq!(cli.variant, Some(ApiVariant::Extended));
        match cli.command {
            Command::List {
                category,
                sort_by,
                order,
            } => {
                assert_eq!(category, Some(Category::new("books")));
                assert_eq!(sort_by, Some(SortField::Price));
                assert_eq!(order, Some(SortOrder::Desc));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn create_takes_availability_as_a_value() {
        let cli = Cli::parse_from([
            "catalog", "create", "--name", "Kite", "--price", "15", "--available", "false",
        ]);
        let Command::Create(fields) = cli.command else {
            panic!("expected create");
        };
        let mut form = ItemForm::default();
        fields.apply(&mut form);
        assert!(!form.is_available);
        assert_eq!(form.name, "Kite");
    }

    #[test]
    fn cli_flag_overrides_configured_url() {
        let cli = Cli::parse_from([
            "catalog",
            "--api-url",
            "http://127.0.0.1:9999",
            "--settings",
            "/nonexistent/catalog.toml",
            "stats",
        ]);
        let settings = resolve_settings(&cli);
        assert_eq!(
            settings.api_base_url.as_deref(),
            Some("http://127.0.0.1:9999")
        );
    }
}
