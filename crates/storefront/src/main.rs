//! Storefront CLI.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! storefront products --category cat-books
//!
//! # Fill the cart and place an order
//! storefront cart add p-1 --qty 2
//! storefront checkout
//!
//! # Admin
//! storefront product set-stock p-8 12
//! ```
//!
//! State lives under `SHOP_DATA_DIR` (or `--data-dir`), one JSON document per key.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use common::{CategoryId, Money, ProductId, UuidGenerator};
use domain::{DomainError, NewCategory, NewProduct, Order, Product, ProductUpdate};
use storage::{FileStore, Storage};
use storefront::{AppError, Config, Session};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about = "Storefront catalog, cart and orders")]
struct Cli {
    /// Directory holding the persisted state (overrides `SHOP_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List categories
    Categories,
    /// List products, optionally for one category
    Products {
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List featured products
    Featured,
    /// Inspect or edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the current cart
    Checkout,
    /// List the most recent orders
    Orders {
        /// Number of orders to show; 0 shows all
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show one order
    Order { id: String },
    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Delete all stored state and start again from the seed catalog
    Reset,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and total
    Show,
    /// Add units of a product
    Add {
        product_id: String,
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Remove units of a product
    Remove {
        product_id: String,
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Delete a whole line
    Delete { product_id: String },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum CategoryAction {
    /// Create a category with a generated id
    Create {
        name: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Rename a category
    Rename { id: String, name: String },
    /// Delete an unused category
    Delete { id: String },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Create a product with a generated id
    Create {
        #[arg(short, long)]
        name: String,
        /// Unit price in major units, e.g. `29.90`
        #[arg(short, long, value_parser = parse_money)]
        price: Money,
        #[arg(short, long, default_value_t = 0)]
        stock: u32,
        #[arg(short, long)]
        category: String,
        #[arg(long)]
        featured: bool,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        short_description: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update selected fields of a product
    Update {
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long, value_parser = parse_money)]
        price: Option<Money>,
        #[arg(short, long)]
        stock: Option<u32>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        featured: Option<bool>,
    },
    /// Delete a product
    Delete { id: String },
    /// Overwrite the stock level of a product
    SetStock { id: String, stock: u32 },
}

fn parse_money(raw: &str) -> Result<Money, String> {
    let amount: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    Money::from_major(amount).ok_or_else(|| format!("`{raw}` is not a finite amount"))
}

fn main() -> ExitCode {
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn report(err: &AppError) {
    tracing::error!(kind = ?err.kind(), "Command failed: {err}");
    if let AppError::Domain(DomainError::Order(order_err)) = err {
        for shortfall in order_err.shortfalls() {
            eprintln!(
                "  {}: requested {}, available {}",
                shortfall.product_id, shortfall.requested, shortfall.available
            );
        }
    }
}

fn run(cli: Cli, mut config: Config) -> storefront::Result<()> {
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let store = FileStore::open(config.data_dir.clone())?;
    let storage = Storage::with_prefix(store, config.storage_prefix.as_str());
    let mut session = Session::load(storage, UuidGenerator::new())?;

    match cli.command {
        Commands::Categories => {
            for c in session.catalog().get_categories() {
                println!("{:<14} {}", c.id, c.name);
            }
        }
        Commands::Products { category } => {
            let category = category.map(CategoryId::new);
            print_products(&session.catalog().get_products(category.as_ref()));
        }
        Commands::Featured => print_products(&session.catalog().get_featured_products()),
        Commands::Cart { action } => {
            match action {
                CartAction::Show => {}
                CartAction::Add { product_id, qty } => {
                    session.add_to_cart(&ProductId::new(product_id), qty)?;
                }
                CartAction::Remove { product_id, qty } => {
                    session.remove_from_cart(&ProductId::new(product_id), qty)?;
                }
                CartAction::Delete { product_id } => {
                    session.delete_cart_line(&ProductId::new(product_id))?;
                }
                CartAction::Clear => session.clear_cart()?,
            }
            print_cart(&session);
        }
        Commands::Checkout => {
            let order = session.checkout()?;
            println!("Order {} placed", order.id());
            print_order(&order);
        }
        Commands::Orders { limit } => {
            let limit = limit.unwrap_or(config.order_limit);
            let orders = session.orders().get_last_orders(Some(limit));
            if orders.is_empty() {
                println!("No orders yet");
            }
            for order in &orders {
                println!(
                    "{}  {}  {} item(s)  {}",
                    order.created_at().format("%Y-%m-%d %H:%M"),
                    order.id(),
                    order.total_quantity(),
                    order.total()
                );
            }
        }
        Commands::Order { id } => match session.orders().get_order_by_id(&id.into()) {
            Some(order) => print_order(order),
            None => println!("Order not found"),
        },
        Commands::Category { action } => match action {
            CategoryAction::Create {
                name,
                color,
                icon,
                image_url,
            } => {
                let mut input = NewCategory::new("", name);
                input.color = color;
                input.icon = icon;
                input.image_url = image_url;
                let category = session.create_category(input)?;
                println!("Created category {}", category.id);
            }
            CategoryAction::Rename { id, name } => {
                let category = session.rename_category(&CategoryId::new(id), &name)?;
                println!("Renamed {} to {}", category.id, category.name);
            }
            CategoryAction::Delete { id } => {
                session.delete_category(&CategoryId::new(id))?;
                println!("Deleted");
            }
        },
        Commands::Product { action } => match action {
            ProductAction::Create {
                name,
                price,
                stock,
                category,
                featured,
                image_url,
                short_description,
                description,
            } => {
                let mut input = NewProduct::new("", name, price, stock, category);
                input.is_featured = featured;
                input.image_url = image_url;
                input.short_description = short_description;
                input.description = description;
                let product = session.create_product(input)?;
                println!("Created product {}", product.id);
            }
            ProductAction::Update {
                id,
                name,
                price,
                stock,
                category,
                featured,
            } => {
                let update = ProductUpdate {
                    name,
                    price,
                    stock,
                    category_id: category.map(CategoryId::new),
                    is_featured: featured,
                    ..ProductUpdate::new(id)
                };
                let product = session.update_product(update)?;
                print_products(std::slice::from_ref(&product));
            }
            ProductAction::Delete { id } => {
                session.delete_product(&ProductId::new(id))?;
                println!("Deleted");
            }
            ProductAction::SetStock { id, stock } => {
                let product = session.set_stock(&ProductId::new(id), stock)?;
                println!("{} stock is now {}", product.id, product.stock);
            }
        },
        Commands::Reset => {
            session.reset()?;
            println!("Storefront reset");
        }
    }
    Ok(())
}

fn amount(total: Option<Money>) -> String {
    total.map_or_else(|| "overflow".to_string(), |m| m.to_string())
}

fn print_products(products: &[Product]) {
    for p in products {
        let availability = if p.stock == 0 {
            "unavailable".to_string()
        } else {
            format!("{} in stock", p.stock)
        };
        let star = if p.is_featured { "*" } else { " " };
        println!(
            "{star} {:<8} {:<24} {:>8}  {:<12} {}",
            p.id, p.name, p.price, p.category_id, availability
        );
    }
}

fn print_cart<S: storage::KeyValueStore>(session: &Session<S>) {
    let cart = session.cart();
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }
    for item in cart.items() {
        let name = session
            .catalog()
            .get_product_by_id(&item.product_id)
            .map_or("(removed)", |p| p.name.as_str());
        println!(
            "{:<8} {:<24} {:>3} x {:>8} = {:>8}",
            item.product_id,
            name,
            item.quantity,
            item.unit_price,
            amount(item.line_total())
        );
    }
    println!("{} item(s), total {}", cart.total_items(), amount(cart.total()));
}

fn print_order(order: &Order) {
    for line in order.lines() {
        println!(
            "{:<24} {:>3} x {:>8} = {:>8}",
            line.product_name,
            line.quantity,
            line.unit_price,
            amount(line.line_total())
        );
    }
    println!("Total {}", order.total());
}
