use anyhow::Result;
use crossterm::style::Stylize;

use crate::config::Config;
use crate::flow::Flow;
use crate::registrar::GoDaddyClient;
use crate::ui;
use crate::ui::payment;
use crate::ui::prompt::{Prompt, TermPrompt};

/// Run the interactive menu loop until the user exits.
pub async fn run(config: &Config) -> Result<()> {
  let (api_key, api_secret) = config.credentials()?;
  let client = GoDaddyClient::new(&api_key, &api_secret, &config.api_url());
  let renderer = payment::default_renderer();
  let mut prompt = TermPrompt;

  ui::print_header();
  println!("{}", "Welcome to the GoDaddy Domain Manager!".green());
  println!("This tool will help you check domain availability and purchase domains.");

  loop {
    println!();
    println!("{}", "MAIN MENU".cyan());
    println!("1. Check domain availability");
    println!("2. Search for domains");
    println!("3. Purchase a domain");
    println!("4. Check order status");
    println!("5. Exit");

    let Some(choice) = prompt.line(&format!("{}", "Enter your choice (1-5): ".yellow())) else {
      break;
    };

    let mut flow = Flow::new(&client, &mut prompt, renderer.as_ref());
    match choice.parse::<u8>() {
      Ok(1) => {
        flow.check_domain().await;
      }
      Ok(2) => {
        flow.search().await;
      }
      Ok(3) => {
        flow.purchase(None).await;
      }
      Ok(4) => flow.order_status().await,
      Ok(5) => {
        println!("{}", "Thank you for using GoDaddy Domain Manager!".yellow());
        break;
      }
      _ => println!("{}", "Invalid choice. Please enter a number between 1 and 5.".red()),
    }
  }

  Ok(())
}
