//! Command-line interface definitions.
//!
//! Defines the CLI structure for the storefront client using `clap`:
//! account commands, catalog browsing and administration, the local cart,
//! checkout, order and payment lookups, and configuration management.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use super::paths;
use crate::domain::cart::EntryId;
use crate::domain::id::{OrderId, PaymentId, ProductId, UserId};
use crate::domain::order::OrderStatus;
use crate::domain::session::Role;

/// Storefront client: browse the catalog, fill a cart, place orders
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (missing file means defaults)
    #[arg(long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the storefront CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account and log in
    Register(RegisterArgs),

    /// Log in and cache the session
    Login(LoginArgs),

    /// Forget the cached session
    Logout,

    /// Show the logged-in user
    Whoami(WhoamiArgs),

    /// Browse and manage products
    #[command(subcommand)]
    Products(ProductsCommand),

    /// Manage the local cart
    #[command(subcommand)]
    Cart(CartCommand),

    /// Place an order for the cart
    Checkout(CheckoutArgs),

    /// View and update orders
    #[command(subcommand)]
    Orders(OrdersCommand),

    /// Manage user accounts (admin)
    #[command(subcommand)]
    Users(UsersCommand),

    /// Create and look up payments
    #[command(subcommand)]
    Payments(PaymentsCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Display name
    #[arg(long)]
    pub name: String,
    /// Login email
    #[arg(long)]
    pub email: String,
    /// Password (prompted for when omitted)
    #[arg(long)]
    pub password: Option<String>,
    /// Account role
    #[arg(long, default_value = "user")]
    pub role: Role,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Login email
    #[arg(long)]
    pub email: String,
    /// Password (prompted for when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Ask the backend instead of reading the cached identity
    #[arg(long)]
    pub refresh: bool,
}

/// Subcommands for `storefront products`.
#[derive(Subcommand, Debug)]
pub enum ProductsCommand {
    /// List products, optionally filtered
    List(ProductFilterArgs),
    /// Create a product (seller or admin)
    Create(ProductFields),
    /// Replace a product's details (seller or admin)
    Update {
        /// Product to update
        id: ProductId,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product (seller or admin)
    Delete {
        /// Product to delete
        id: ProductId,
    },
}

#[derive(Args, Debug, Default)]
pub struct ProductFilterArgs {
    /// Only products in this category
    #[arg(long)]
    pub category: Option<String>,
    /// Lowest price to include
    #[arg(long)]
    pub min_price: Option<Decimal>,
    /// Highest price to include
    #[arg(long)]
    pub max_price: Option<Decimal>,
}

#[derive(Args, Debug)]
pub struct ProductFields {
    /// Product name
    #[arg(long)]
    pub name: String,
    /// Unit price
    #[arg(long)]
    pub price: Decimal,
    /// Category
    #[arg(long)]
    pub category: Option<String>,
    /// Description
    #[arg(long)]
    pub description: Option<String>,
}

/// Subcommands for `storefront cart`.
#[derive(Subcommand, Debug)]
pub enum CartCommand {
    /// Add one unit of a product
    Add {
        /// Product to add
        product_id: ProductId,
    },
    /// Set an entry's quantity; zero or less removes it
    Set {
        /// Entry id as shown by `cart show`
        entry_id: EntryId,
        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove an entry
    Remove {
        /// Entry id as shown by `cart show`
        entry_id: EntryId,
    },
    /// Show the cart priced against the current catalog
    Show,
    /// Empty the cart (also recovers from a corrupt stored cart)
    Clear,
}

#[derive(Args, Debug)]
pub struct CheckoutArgs {
    /// Pay for the order right away with this method (e.g. "card")
    #[arg(long = "pay", value_name = "METHOD")]
    pub payment_method: Option<String>,
}

/// Subcommands for `storefront orders`.
#[derive(Subcommand, Debug)]
pub enum OrdersCommand {
    /// Your orders
    Mine,
    /// Every order (admin)
    All,
    /// One order with its items
    Show {
        id: OrderId,
    },
    /// Change an order's status (admin)
    Status {
        id: OrderId,
        /// created, in_progress, ready, delivered or cancelled
        status: OrderStatus,
    },
}

/// Subcommands for `storefront users`.
#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List accounts
    List,
    /// Change an account's role
    Role {
        id: UserId,
        /// user, admin or seller
        role: Role,
    },
}

/// Subcommands for `storefront payments`.
#[derive(Subcommand, Debug)]
pub enum PaymentsCommand {
    /// Pay for an order
    Create {
        /// Order to pay for
        #[arg(long = "order")]
        order_id: OrderId,
        /// Amount to pay
        #[arg(long)]
        amount: Decimal,
        /// Payment method (e.g. "card")
        #[arg(long)]
        method: String,
    },
    /// Look up a payment
    Show {
        id: PaymentId,
    },
}

/// Subcommands for `storefront config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a documented configuration file to the --config path
    Init {
        /// Overwrite the file if it already exists
        #[arg(long)]
        force: bool,
    },
    /// Display the effective configuration with defaults applied
    Show,
}
