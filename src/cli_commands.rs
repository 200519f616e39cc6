use anyhow::Result;

use crate::registrar::GoDaddyClient;
use crate::ui::format_price;
use crate::validate;

/// One-shot availability check.
pub async fn run_check(client: &GoDaddyClient, domain: &str, json: bool) -> Result<()> {
  if !validate::domain_name(domain) {
    anyhow::bail!("invalid domain name: {}", domain);
  }
  let availability = client.check_availability(domain).await?;

  if json {
    println!("{}", serde_json::to_string_pretty(&availability)?);
  } else {
    let status = if availability.available {
      format!("\x1b[32m✓ Available\x1b[0m  {} per year", format_price(availability.price))
    } else {
      "\x1b[31m✗ Taken\x1b[0m".to_string()
    };
    println!("  {:<25} {}", domain, status);
    if !availability.definitive {
      println!("  (not definitive; confirm before purchase)");
    }
  }
  Ok(())
}

/// One-shot keyword search.
pub async fn run_search(
  client: &GoDaddyClient,
  keyword: &str,
  tlds: Option<&str>,
  limit: u32,
  json: bool,
) -> Result<()> {
  let tlds: Option<Vec<String>> = tlds.map(|list| {
    list
      .split(',')
      .map(|tld| tld.trim().trim_start_matches('.').to_string())
      .filter(|tld| !tld.is_empty())
      .collect()
  });
  let results = client.suggest(keyword, tlds.as_deref(), limit).await?;

  if json {
    println!("{}", serde_json::to_string_pretty(&results)?);
  } else if results.is_empty() {
    println!("No domains found for keyword '{}'.", keyword);
  } else {
    println!("Found {} domains related to '{}':\n", results.len(), keyword);
    for suggestion in &results {
      println!("  {:<30} {}", suggestion.domain, format_price(suggestion.price));
    }
  }
  Ok(())
}

/// One-shot domain details lookup; prints the registrar JSON untouched.
pub async fn run_info(client: &GoDaddyClient, domain: &str) -> Result<()> {
  let details = client.get_details(domain).await?;
  println!("{}", serde_json::to_string_pretty(&details)?);
  Ok(())
}

/// One-shot order status lookup; prints the registrar JSON untouched.
pub async fn run_order(client: &GoDaddyClient, order_id: &str) -> Result<()> {
  let status = client.order_status(order_id).await?;
  println!("{}", serde_json::to_string_pretty(&status)?);
  Ok(())
}
