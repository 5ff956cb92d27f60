//! Command-line front end for the inventory backend.
//!
//! Every command starts a session first (probe, then initial load) and stops
//! with the session error if the backend cannot be reached.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};

use stockroom_client::gateway::DEFAULT_LOG_LIMIT;
use stockroom_client::{ClientConfig, ConfigError, ConnectionState, HttpGateway, SyncController};
use stockroom_core::ProductId;
use stockroom_inventory::HistoryEntry;
use stockroom_products::{NewProduct, Product, ProductFilter, ProductPatch, Unit};

/// Manage the product inventory from the terminal
#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Base URL of the REST API (defaults to $STOCKROOM_API_URL, then
    /// http://localhost:5000/api)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List products, optionally filtered by name and category
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Ask the backend for products whose name matches
    Search { name: String },
    /// Show a single product
    Show { id: ProductId },
    /// Create a product
    Add(AddArgs),
    /// Change some fields of a product
    Update(UpdateArgs),
    /// Delete a product
    Delete { id: ProductId },
    /// Stock change timeline of a product
    History { id: ProductId },
    /// Recent stock changes across all products
    Log {
        #[arg(long, default_value_t = DEFAULT_LOG_LIMIT)]
        limit: u32,
    },
    /// Upload a CSV file of products
    Import { file: PathBuf },
    /// Download all products as CSV
    Export {
        #[arg(long, default_value = "products.csv")]
        out: PathBuf,
    },
    /// Inventory summary reported by the backend
    Stats,
}

#[derive(Args, Debug)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value_t = Unit::default().to_string())]
    unit: String,
    #[arg(long)]
    category: String,
    #[arg(long)]
    brand: String,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    stock: i64,
    #[arg(long)]
    image: Option<String>,
}

#[derive(Args, Debug)]
struct UpdateArgs {
    id: ProductId,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    unit: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    brand: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    stock: Option<i64>,
    /// New image URL; an empty value clears it
    #[arg(long)]
    image: Option<String>,
}

impl UpdateArgs {
    fn patch(&self) -> ProductPatch {
        ProductPatch {
            name: self.name.clone(),
            unit: self.unit.clone(),
            category: self.category.clone(),
            brand: self.brand.clone(),
            stock: self.stock,
            image: self
                .image
                .as_ref()
                .map(|url| Some(url.trim().to_string()).filter(|url| !url.is_empty())),
            status: None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init_pretty();

    let cli = Cli::parse();

    let config = client_config(cli.api_url.as_deref())?;

    tracing::info!(api_url = config.base_url(), "starting stockroom");

    let gateway = HttpGateway::new(&config).context("failed to build HTTP client")?;
    let controller = SyncController::new(gateway);

    if controller.start().await != ConnectionState::Connected {
        let session = controller.session();
        bail!(
            "{}",
            session
                .error()
                .unwrap_or("backend connection test did not complete")
        );
    }

    run(&controller, cli.command).await
}

/// `--api-url` wins over the environment. The request timeout stays fixed.
fn client_config(api_url: Option<&str>) -> Result<ClientConfig, ConfigError> {
    match api_url.map(str::trim) {
        Some(url) if !url.is_empty() => ClientConfig::new(url),
        _ => ClientConfig::from_env(),
    }
}

async fn run(controller: &SyncController<HttpGateway>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::List { category, name } => {
            ensure_loaded(controller)?;
            let mut filter = ProductFilter::new(name.unwrap_or_default());
            if let Some(category) = category {
                filter = filter.in_category(category);
            }
            print_products(&controller.view(&filter));
        }
        Command::Search { name } => {
            controller.search(&name).await;
            ensure_loaded(controller)?;
            print_products(&controller.products());
        }
        Command::Show { id } => {
            let product = controller.product(id).await.into_result().map_err(anyhow::Error::msg)?;
            print_product(&product);
        }
        Command::Add(args) => {
            // Known units are sent in their canonical spelling; others pass through.
            let unit = Unit::parse(&args.unit).map_or(args.unit, |unit| unit.to_string());
            let data = NewProduct {
                name: args.name,
                unit,
                category: args.category,
                brand: args.brand,
                stock: args.stock,
                image: args.image,
            }
            .prepared()?;
            let created = controller.create(&data).await.into_result().map_err(anyhow::Error::msg)?;
            println!("Created product {}", created.id);
            print_product(&created);
        }
        Command::Update(args) => {
            let patch = args.patch();
            if patch.is_empty() {
                bail!("nothing to update; pass at least one field");
            }
            patch.validate()?;
            controller
                .update(args.id, &patch)
                .await
                .into_result()
                .map_err(anyhow::Error::msg)?;
            match controller.store().get(args.id) {
                Some(product) => print_product(&product),
                None => println!("Updated product {}", args.id),
            }
        }
        Command::Delete { id } => {
            controller.delete(id).await.into_result().map_err(anyhow::Error::msg)?;
            println!("Deleted product {id}");
        }
        Command::History { id } => {
            let entries = controller.history(id).await.into_result().map_err(anyhow::Error::msg)?;
            if entries.is_empty() {
                println!("No history available for this product");
            }
            print_history(&entries);
        }
        Command::Log { limit } => {
            let entries = controller
                .inventory_log(limit)
                .await
                .into_result()
                .map_err(anyhow::Error::msg)?;
            print_history(&entries);
        }
        Command::Import { file } => {
            let csv = std::fs::read(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "products.csv".to_string());
            let summary = controller
                .import_csv(&file_name, csv)
                .await
                .into_result()
                .map_err(anyhow::Error::msg)?;
            println!("Import completed! {summary}");
        }
        Command::Export { out } => {
            let csv = controller.export_csv().await.into_result().map_err(anyhow::Error::msg)?;
            std::fs::write(&out, &csv)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Exported {} bytes to {}", csv.len(), out.display());
        }
        Command::Stats => {
            let stats = controller.stats().await.into_result().map_err(anyhow::Error::msg)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}

fn ensure_loaded(controller: &SyncController<HttpGateway>) -> anyhow::Result<()> {
    match controller.session().fetch_error() {
        Some(message) => bail!("{message}"),
        None => Ok(()),
    }
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products found");
        return;
    }
    println!(
        "{:>6}  {:<28} {:<8} {:<16} {:<16} {:>7}  {}",
        "ID", "NAME", "UNIT", "CATEGORY", "BRAND", "STOCK", "STATUS"
    );
    for p in products {
        println!(
            "{:>6}  {:<28} {:<8} {:<16} {:<16} {:>7}  {}",
            p.id, p.name, p.unit, p.category, p.brand, p.stock, p.status
        );
    }
}

fn print_product(p: &Product) {
    println!("id:       {}", p.id);
    println!("name:     {}", p.name);
    println!("unit:     {}", p.unit);
    println!("category: {}", p.category);
    println!("brand:    {}", p.brand);
    println!("stock:    {}", p.stock);
    println!("status:   {}", p.status);
    if let Some(image) = &p.image {
        println!("image:    {image}");
    }
}

fn print_history(entries: &[HistoryEntry]) {
    for entry in entries {
        let by = if entry.changed_by.is_empty() {
            String::new()
        } else {
            format!(" by {}", entry.changed_by)
        };
        println!(
            "{} {}  {}{}  ({})",
            entry.change_type.symbol(),
            entry.change_type.as_str(),
            entry.description,
            by,
            entry.formatted_timestamp
        );
    }
}
