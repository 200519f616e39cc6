use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "domgr")]
#[command(about = "Check, search and purchase domains through the GoDaddy API", long_about = None)]
pub struct Cli {
  /// Verbose logging (debug level)
  #[arg(short, long, global = true)]
  pub verbose: bool,

  #[command(subcommand)]
  pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
  /// Check domain availability
  Check {
    /// Domain name (e.g., example.com)
    domain: String,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,
  },

  /// Search purchasable domains by keyword
  Search {
    /// Keyword to base suggestions on
    keyword: String,

    /// TLDs to include (comma-separated, e.g., com,net,org)
    #[arg(short, long)]
    tlds: Option<String>,

    /// Maximum number of suggestions
    #[arg(short, long, default_value = "20")]
    limit: u32,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,
  },

  /// Show registrar details for a domain in your account
  Info {
    /// Domain name (e.g., example.com)
    domain: String,
  },

  /// Check the status of a domain order
  Order {
    /// Order ID from a previous purchase
    order_id: String,
  },

  /// Purchase a domain (interactive)
  Purchase {
    /// Domain to purchase; prompted for when omitted
    domain: Option<String>,
  },
}
