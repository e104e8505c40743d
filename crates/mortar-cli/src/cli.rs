use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use mortar_core::models::{PaymentKind, Shift, StaffRole};

#[derive(Parser)]
#[command(name = "mortar")]
#[command(about = "Run the pharmacy from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to the local offline database
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// CLI profile name for remote configuration
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// Work offline: queue writes locally for a later `mortar sync`
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register and manage medicine shortages
    Shortage {
        #[command(subcommand)]
        command: ShortageCommands,
    },
    /// Log shift revenues
    Revenue {
        #[command(subcommand)]
        command: RevenueCommands,
    },
    /// Track company payments and expenses
    Payment {
        #[command(subcommand)]
        command: PaymentCommands,
    },
    /// Build purchase orders from supplier quotes
    Order {
        #[command(subcommand)]
        command: OrderCommands,
    },
    /// Post and read staff bulletins
    Bulletin {
        #[command(subcommand)]
        command: BulletinCommands,
    },
    /// Replay queued offline changes against the remote store
    Sync,
    /// Show connectivity, queue, and mirror status
    Status,
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ShortageCommands {
    /// Register a shortage
    #[command(alias = "new")]
    Add {
        /// Medicine name
        name: String,
        /// Dose strength, e.g. "500 mg"
        #[arg(long)]
        strength: Option<String>,
        /// Dosage form, e.g. tablet, syrup
        #[arg(long)]
        form: Option<String>,
        /// Packs needed
        #[arg(short, long, default_value = "1")]
        quantity: u32,
        /// Shortage blocks dispensing
        #[arg(long)]
        urgent: bool,
        /// Free-form note
        #[arg(long)]
        note: Option<String>,
    },
    /// List current shortages (confirmed and pending)
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update a shortage entry
    Update {
        /// Shortage entry ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        strength: Option<String>,
        #[arg(long)]
        form: Option<String>,
        #[arg(short, long)]
        quantity: Option<u32>,
        #[arg(long)]
        urgent: Option<bool>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Remove a shortage entry (restocked)
    Resolve {
        /// Shortage entry ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum RevenueCommands {
    /// Log a shift revenue entry
    #[command(alias = "new")]
    Add {
        /// Business date (YYYY-MM-DD, default today)
        #[arg(long, value_name = "DATE")]
        date: Option<String>,
        /// Which shift
        #[arg(long, value_enum)]
        shift: ShiftArg,
        /// Cash takings in minor units
        #[arg(long, default_value = "0")]
        cash: i64,
        /// Card takings in minor units
        #[arg(long, default_value = "0")]
        card: i64,
        /// Banking-service transactions total in minor units
        #[arg(long, default_value = "0")]
        banking: i64,
        /// Free-form note
        #[arg(long)]
        note: Option<String>,
    },
    /// List revenue entries (confirmed and pending)
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum PaymentCommands {
    /// Record a payment or expense
    #[command(alias = "new")]
    Add {
        /// Supplier or payee
        counterparty: String,
        /// Amount in minor units
        amount: i64,
        /// Payment vs expense
        #[arg(long, value_enum, default_value_t = PaymentKindArg::Payment)]
        kind: PaymentKindArg,
        /// Due date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        due: Option<String>,
        /// Free-form note
        #[arg(long)]
        note: Option<String>,
    },
    /// List payments and expenses
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a payment settled
    Settle {
        /// Payment ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum OrderCommands {
    /// Build a draft order from supplier quote lines
    Build {
        /// Supplier name
        supplier: String,
        /// Quote line as NAME:QTY:UNIT_PRICE (repeatable)
        #[arg(long = "line", value_name = "NAME:QTY:UNIT_PRICE", required = true)]
        lines: Vec<String>,
    },
    /// List purchase orders
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Send a draft order to the supplier
    Submit {
        /// Order ID
        id: String,
    },
    /// Mark an order received
    Receive {
        /// Order ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum BulletinCommands {
    /// Post a bulletin
    Post {
        /// Headline
        title: String,
        /// Message body
        body: String,
        /// Addressed role
        #[arg(long, value_enum, default_value_t = StaffRoleArg::All)]
        audience: StaffRoleArg,
    },
    /// Read bulletins addressed to a role
    Inbox {
        /// Reader role
        #[arg(long, value_enum, default_value_t = StaffRoleArg::All)]
        role: StaffRoleArg,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Remote API base URL
        #[arg(long, value_name = "URL")]
        remote_url: Option<String>,
        /// API key sent as a bearer token
        #[arg(long, value_name = "KEY")]
        api_key: Option<String>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ShiftArg {
    Morning,
    Evening,
    Night,
}

impl From<ShiftArg> for Shift {
    fn from(value: ShiftArg) -> Self {
        match value {
            ShiftArg::Morning => Self::Morning,
            ShiftArg::Evening => Self::Evening,
            ShiftArg::Night => Self::Night,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PaymentKindArg {
    Payment,
    Expense,
}

impl From<PaymentKindArg> for PaymentKind {
    fn from(value: PaymentKindArg) -> Self {
        match value {
            PaymentKindArg::Payment => Self::Payment,
            PaymentKindArg::Expense => Self::Expense,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum StaffRoleArg {
    All,
    Pharmacist,
    Cashier,
    Manager,
}

impl From<StaffRoleArg> for StaffRole {
    fn from(value: StaffRoleArg) -> Self {
        match value {
            StaffRoleArg::All => Self::All,
            StaffRoleArg::Pharmacist => Self::Pharmacist,
            StaffRoleArg::Cashier => Self::Cashier,
            StaffRoleArg::Manager => Self::Manager,
        }
    }
}
