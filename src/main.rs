use clap::Parser;

use domgr::cli::{Cli, Commands};
use domgr::config::Config;
use domgr::flow::{Flow, FlowOutcome};
use domgr::registrar::{GoDaddyClient, PurchaseOutcome};
use domgr::ui::payment;
use domgr::ui::prompt::TermPrompt;
use domgr::{cli_commands, logger, shell};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  let cli = Cli::parse();
  logger::init(cli.verbose);

  let config = Config::load().unwrap_or_default();

  let Some(command) = cli.command else {
    return shell::run(&config).await;
  };

  let (api_key, api_secret) = config.credentials()?;
  let client = GoDaddyClient::new(&api_key, &api_secret, &config.api_url());

  match command {
    Commands::Check { domain, json } => cli_commands::run_check(&client, &domain, json).await,
    Commands::Search { keyword, tlds, limit, json } => {
      cli_commands::run_search(&client, &keyword, tlds.as_deref(), limit, json).await
    }
    Commands::Info { domain } => cli_commands::run_info(&client, &domain).await,
    Commands::Order { order_id } => cli_commands::run_order(&client, &order_id).await,
    Commands::Purchase { domain } => run_purchase(&client, domain).await,
  }
}

/// The purchase subcommand reuses the interactive flow; a failed
/// purchase exits non-zero so scripts can tell.
async fn run_purchase(client: &GoDaddyClient, domain: Option<String>) -> anyhow::Result<()> {
  let renderer = payment::default_renderer();
  let mut prompt = TermPrompt;
  let mut flow = Flow::new(client, &mut prompt, renderer.as_ref());

  match flow.purchase(domain).await {
    FlowOutcome::Completed(PurchaseOutcome::Failure { .. }) => std::process::exit(1),
    _ => Ok(()),
  }
}
