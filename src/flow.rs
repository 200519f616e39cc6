use crossterm::style::Stylize;
use serde_json::Value;

use crate::registrar::{ContactInfo, Contacts, GoDaddyClient, PurchaseOptions, PurchaseOutcome};
use crate::ui::payment::PaymentRenderer;
use crate::ui::prompt::Prompt;
use crate::ui::{self, format_price};
use crate::validate;

/// Menu choice 1-5 maps to these registration periods, in years.
const PERIOD_YEARS: [u32; 5] = [1, 2, 3, 5, 10];

/// How many alternatives to offer when a domain is taken.
const SUGGESTION_LIMIT: usize = 5;

/// How many results to request and show in the keyword search.
const SEARCH_LIMIT: u32 = 20;
const SEARCH_DISPLAY: usize = 10;

/// Result of one interactive flow invocation.
#[derive(Debug)]
pub enum FlowOutcome {
  /// A purchase was submitted; the registrar's verdict is inside.
  Completed(PurchaseOutcome),
  /// The user backed out (or input closed) before submitting anything.
  Cancelled,
}

/// Interactive flows over one registrar client.
///
/// Everything the flows remember lives in locals threaded through the
/// step functions; nothing persists between menu invocations. Input
/// comes through the Prompt trait so tests can script entire sessions.
pub struct Flow<'a> {
  client: &'a GoDaddyClient,
  prompt: &'a mut dyn Prompt,
  renderer: &'a dyn PaymentRenderer,
}

impl<'a> Flow<'a> {
  pub fn new(
    client: &'a GoDaddyClient,
    prompt: &'a mut dyn Prompt,
    renderer: &'a dyn PaymentRenderer,
  ) -> Self {
    Self { client, prompt, renderer }
  }

  /// Availability check flow: one domain at a time, with a purchase
  /// hand-off when it is available and alternatives when it is not.
  pub async fn check_domain(&mut self) -> FlowOutcome {
    ui::print_header();
    println!("{}", "Domain Availability Check".green());

    loop {
      let Some(input) =
        self.ask("Enter the domain name to check (e.g., example.com) or 'back' to return: ")
      else {
        return FlowOutcome::Cancelled;
      };
      if input.eq_ignore_ascii_case("back") {
        return FlowOutcome::Cancelled;
      }
      if !validate::domain_name(&input) {
        println!("{}", "Invalid domain name format. Please try again.".red());
        continue;
      }

      println!("{}", format!("Checking availability for {input}...").yellow());
      let availability = match self.client.check_availability(&input).await {
        Ok(availability) => availability,
        Err(e) => {
          println!("{}", format!("Error checking domain: {e}").red());
          continue;
        }
      };

      if availability.available {
        println!();
        println!("{}", format!("Good news! {input} is available for purchase!").green());
        println!("Price: {} per year", format_price(availability.price));

        let Some(wants_it) = self.ask_yn("Would you like to purchase this domain? (y/n): ")
        else {
          return FlowOutcome::Cancelled;
        };
        if wants_it {
          return self.purchase_from(input).await;
        }
      } else {
        println!("{}", format!("Sorry, {input} is not available.").red());
        if let Some(alternative) = self.offer_suggestions(&input).await {
          return self.purchase_from(alternative).await;
        }
      }

      let Some(another) = self.ask_yn("Would you like to check another domain? (y/n): ") else {
        return FlowOutcome::Cancelled;
      };
      if !another {
        return FlowOutcome::Cancelled;
      }
    }
  }

  /// Keyword search flow across a TLD preset, with a purchase hand-off.
  pub async fn search(&mut self) -> FlowOutcome {
    ui::print_header();
    println!("{}", "Domain Search".green());

    let Some(keyword) = self.ask("Enter a keyword to search for domains (or 'back' to return): ")
    else {
      return FlowOutcome::Cancelled;
    };
    if keyword.is_empty() || keyword.eq_ignore_ascii_case("back") {
      return FlowOutcome::Cancelled;
    }

    let Some(tlds) = self.select_tlds() else {
      return FlowOutcome::Cancelled;
    };
    let tld_filter = if tlds.is_empty() { None } else { Some(tlds.as_slice()) };

    println!("{}", format!("Searching for domains related to '{keyword}'...").yellow());
    let results = match self.client.suggest(&keyword, tld_filter, SEARCH_LIMIT).await {
      Ok(results) => results,
      Err(e) => {
        println!("{}", format!("Error searching domains: {e}").red());
        return FlowOutcome::Cancelled;
      }
    };
    if results.is_empty() {
      println!("{}", format!("No domains found for keyword '{keyword}'.").yellow());
      return FlowOutcome::Cancelled;
    }

    println!();
    println!("{}", format!("Found {} domains related to '{keyword}':", results.len()).green());
    let shown = results.len().min(SEARCH_DISPLAY);
    for (i, suggestion) in results.iter().take(SEARCH_DISPLAY).enumerate() {
      println!("{}. {} - {} per year", i + 1, suggestion.domain, format_price(suggestion.price));
    }

    let Some(wants_one) = self.ask_yn("Would you like to purchase any of these domains? (y/n): ")
    else {
      return FlowOutcome::Cancelled;
    };
    if !wants_one {
      return FlowOutcome::Cancelled;
    }

    loop {
      let Some(selected) =
        self.ask(&format!("Enter domain number to purchase (1-{shown}) or 'back' to return: "))
      else {
        return FlowOutcome::Cancelled;
      };
      if selected.eq_ignore_ascii_case("back") {
        return FlowOutcome::Cancelled;
      }
      match selected.parse::<usize>() {
        Ok(n) if (1..=shown).contains(&n) => {
          return self.purchase_from(results[n - 1].domain.clone()).await;
        }
        _ => println!(
          "{}",
          format!("Invalid choice. Please enter a number between 1 and {shown}.").red()
        ),
      }
    }
  }

  /// Purchase flow from the top: collect a domain (unless the caller
  /// already has one), verify it is available, then hand over to the
  /// options and contact steps.
  pub async fn purchase(&mut self, initial: Option<String>) -> FlowOutcome {
    ui::print_header();
    println!("{}", "Domain Purchase".green());

    let mut candidate = initial;
    let domain = loop {
      let input = match candidate.take() {
        Some(domain) => domain,
        None => {
          let Some(line) =
            self.ask("Enter the domain name to purchase (e.g., example.com) or 'back' to return: ")
          else {
            return FlowOutcome::Cancelled;
          };
          line
        }
      };
      if input.eq_ignore_ascii_case("back") {
        return FlowOutcome::Cancelled;
      }
      if !validate::domain_name(&input) {
        println!("{}", "Invalid domain name format. Please try again.".red());
        continue;
      }

      println!("{}", format!("Checking availability for {input}...").yellow());
      match self.client.check_availability(&input).await {
        Ok(availability) if availability.available => {
          println!(
            "{}",
            format!("{input} is available for {} per year.", format_price(availability.price))
              .green()
          );
          break input;
        }
        Ok(_) => {
          println!("{}", format!("Sorry, {input} is not available for purchase.").red());
          match self.offer_suggestions(&input).await {
            Some(alternative) => break alternative,
            None => return FlowOutcome::Cancelled,
          }
        }
        Err(e) => {
          println!("{}", format!("Error checking domain: {e}").red());
          continue;
        }
      }
    };

    self.purchase_from(domain).await
  }

  /// Order status flow: look up an order id and pretty-print the result.
  pub async fn order_status(&mut self) {
    ui::print_header();
    println!("{}", "Order Status".green());

    let Some(order_id) = self.ask("Enter the order ID (or 'back' to return): ") else {
      return;
    };
    if order_id.is_empty() || order_id.eq_ignore_ascii_case("back") {
      return;
    }

    match self.client.order_status(&order_id).await {
      Ok(status) => {
        let pretty = serde_json::to_string_pretty(&status).unwrap_or_else(|_| status.to_string());
        println!("{pretty}");
      }
      Err(e) => println!("{}", format!("Error checking order: {e}").red()),
    }
  }

  /// Purchase steps once the domain is settled: options, contacts,
  /// confirmation, submission. Availability is not re-checked here, so
  /// suggestion picks go straight to the options step.
  async fn purchase_from(&mut self, domain: String) -> FlowOutcome {
    let Some(mut options) = self.collect_options() else {
      return FlowOutcome::Cancelled;
    };
    let Some(contact) = self.collect_contact() else {
      return FlowOutcome::Cancelled;
    };
    let registrant = format!("{} {}", contact.first_name, contact.last_name);
    options.contacts = Contacts::same_for_all(contact);

    ui::print_header();
    println!("{}", "Purchase Confirmation".green());
    println!("You are about to purchase {} with the following options:", domain.as_str().cyan());
    println!("- Registration Period: {} year(s)", options.period);
    println!("- Privacy Protection: {}", if options.privacy { "Enabled" } else { "Disabled" });
    println!("- Auto-Renewal: {}", if options.renew_auto { "Enabled" } else { "Disabled" });
    println!("- Registrant: {registrant}");

    let Some(confirmed) = self.ask_yn("Do you want to proceed with the purchase? (y/n): ") else {
      return FlowOutcome::Cancelled;
    };
    if !confirmed {
      println!("{}", "Purchase cancelled.".yellow());
      return FlowOutcome::Cancelled;
    }

    println!("{}", "Processing purchase...".yellow());
    let outcome = match self.client.purchase(&domain, &options).await {
      Ok(outcome) => outcome,
      Err(e) => PurchaseOutcome::Failure { detail: Value::String(e.to_string()) },
    };
    self.show_outcome(&domain, &outcome, options.period);
    FlowOutcome::Completed(outcome)
  }

  /// Fetch and present alternatives for a taken domain. Returns the
  /// chosen one, or None when nothing was wanted or found.
  async fn offer_suggestions(&mut self, domain: &str) -> Option<String> {
    println!("{}", "Getting suggestions for similar domains...".yellow());
    let mut suggestions = match self
      .client
      .suggest(keyword_of(domain), None, SUGGESTION_LIMIT as u32)
      .await
    {
      Ok(suggestions) => suggestions,
      Err(e) => {
        println!("{}", format!("Error fetching suggestions: {e}").red());
        return None;
      }
    };
    suggestions.truncate(SUGGESTION_LIMIT);
    if suggestions.is_empty() {
      println!("{}", "No suggested domains found.".yellow());
      return None;
    }

    println!();
    println!("{}", "Here are some available alternatives:".green());
    for (i, suggestion) in suggestions.iter().enumerate() {
      println!("{}. {} - {} per year", i + 1, suggestion.domain, format_price(suggestion.price));
    }

    if !self.ask_yn("Would you like to purchase any of these domains? (y/n): ")? {
      return None;
    }

    loop {
      let selected = self.ask(&format!(
        "Enter domain number to purchase (1-{}) or 'back' to return: ",
        suggestions.len()
      ))?;
      if selected.eq_ignore_ascii_case("back") {
        return None;
      }
      match selected.parse::<usize>() {
        Ok(n) if (1..=suggestions.len()).contains(&n) => {
          return Some(suggestions[n - 1].domain.clone());
        }
        _ => println!(
          "{}",
          format!("Invalid choice. Please enter a number between 1 and {}.", suggestions.len())
            .red()
        ),
      }
    }
  }

  /// Gather period, privacy and auto-renewal choices.
  fn collect_options(&mut self) -> Option<PurchaseOptions> {
    println!();
    println!("{}", "Select registration period:".cyan());
    println!("1. 1 year");
    println!("2. 2 years");
    println!("3. 3 years");
    println!("4. 5 years");
    println!("5. 10 years");
    let period = loop {
      let choice = self.prompt.line("Enter your choice (1-5): ")?;
      match choice.parse::<usize>().ok().and_then(period_for_choice) {
        Some(years) => break years,
        None => {
          println!("{}", "Invalid choice. Please enter a number between 1 and 5.".red())
        }
      }
    };

    println!();
    println!("{}", "Would you like to add privacy protection?".cyan());
    println!("1. Yes, protect my personal information");
    println!("2. No, make my information public");
    let privacy = self.menu_choice_1_2()? == 1;

    println!();
    println!("{}", "Would you like to enable auto-renewal?".cyan());
    println!("1. Yes, automatically renew this domain");
    println!("2. No, I will renew manually");
    let renew_auto = self.menu_choice_1_2()? == 1;

    Some(PurchaseOptions { period, renew_auto, privacy, ..PurchaseOptions::default() })
  }

  /// Gather the registrant contact record, validating as entered.
  fn collect_contact(&mut self) -> Option<ContactInfo> {
    ui::print_header();
    println!("{}", "Contact Information".green());
    println!("Please provide the registrant contact information for the domain:");

    let first_name = self.required_field("First Name")?;
    let last_name = self.required_field("Last Name")?;
    let email = self.validated_field(
      "Email Address",
      validate::email,
      "Invalid email format. Please enter a valid email.",
    )?;
    let phone = self.validated_field(
      "Phone Number (with country code, e.g., +1234567890)",
      validate::phone,
      "Invalid phone format. Please include country code (e.g., +1234567890).",
    )?;
    let address_line1 = self.required_field("Address Line 1")?;
    let address_line2 = self.ask("Address Line 2 (optional): ")?;
    let city = self.required_field("City")?;
    let state = self.required_field("State/Province")?;
    let postal_code = self.required_field("Postal/ZIP Code")?;
    let country = self.validated_field(
      "Country (2-letter code, e.g., US)",
      validate::country_code,
      "Country code should be 2 letters (e.g., US, IN, UK).",
    )?;

    Some(ContactInfo {
      first_name,
      last_name,
      email,
      phone,
      address_line1,
      address_line2: if address_line2.is_empty() { None } else { Some(address_line2) },
      city,
      state,
      postal_code,
      country,
    })
  }

  /// Report the terminal branch of a submitted purchase.
  fn show_outcome(&mut self, domain: &str, outcome: &PurchaseOutcome, period: u32) {
    match outcome {
      PurchaseOutcome::Success { order_id, .. } => {
        ui::print_header();
        println!("{}", "Congratulations!".green());
        println!("You have successfully purchased {}!", domain.cyan());
        println!("{}", format!("Order ID: {}", order_id.as_deref().unwrap_or("N/A")).yellow());
        println!("The domain will be active for {period} year(s).");
        println!();
        let _ = self.prompt.line("Press Enter to continue...");
      }
      PurchaseOutcome::PendingPayment { order_id, payment_url } => {
        self.show_payment(order_id, payment_url);
      }
      PurchaseOutcome::Failure { detail } => {
        println!("{}", "Error purchasing domain:".red());
        ui::print_error_detail(detail);
        println!();
        println!("Please check your input and try again.");
      }
    }
  }

  /// Payment hand-off screen for pending-payment purchases. This branch
  /// is not an error: registration completes once the out-of-band
  /// payment clears.
  fn show_payment(&mut self, order_id: &str, payment_url: &str) {
    ui::print_header();
    println!("{}", "Payment Required".green());
    println!("Order ID: {}", if order_id.is_empty() { "N/A" } else { order_id });
    println!();
    println!("Please complete your payment using one of the following methods:");
    println!();
    println!("1. Open this URL in your browser: {}", payment_url.cyan());
    match self.renderer.render(payment_url) {
      Some(block) => {
        println!();
        println!("2. Scan this QR code with your UPI app:");
        println!();
        println!("{block}");
      }
      None => {
        println!();
        println!("{}", "QR rendering is not available in this build.".yellow());
      }
    }
    println!("{}", "After completing the payment, your domain will be registered.".yellow());
    println!("{}", "You can check the status from the main menu.".yellow());

    if let Some(true) = self.ask_yn("Open the payment URL in your browser now? (y/n): ") {
      if let Err(e) = open::that(payment_url) {
        eprintln!("Failed to open browser: {e}");
      }
    }
  }

  /// Cyan input prompt.
  fn ask(&mut self, label: &str) -> Option<String> {
    self.prompt.line(&format!("{}", label.cyan()))
  }

  /// Yellow y/n question. Only `y` (any case) counts as yes.
  fn ask_yn(&mut self, question: &str) -> Option<bool> {
    let answer = self.prompt.line(&format!("{}", question.yellow()))?;
    Some(answer.eq_ignore_ascii_case("y"))
  }

  /// Read a 1-or-2 menu choice, re-prompting until valid.
  fn menu_choice_1_2(&mut self) -> Option<u8> {
    loop {
      let choice = self.prompt.line("Enter your choice (1-2): ")?;
      match choice.parse::<u8>() {
        Ok(n @ (1 | 2)) => return Some(n),
        _ => println!("{}", "Invalid choice. Please enter 1 or 2.".red()),
      }
    }
  }

  /// Non-empty field prompt, re-asking until something is entered.
  fn required_field(&mut self, label: &str) -> Option<String> {
    loop {
      let value = self.ask(&format!("{label}: "))?;
      if value.is_empty() {
        println!("{}", "This field is required. Please enter a value.".red());
        continue;
      }
      return Some(value);
    }
  }

  /// Field prompt with a format check, re-asking until it passes.
  fn validated_field(
    &mut self,
    label: &str,
    valid: fn(&str) -> bool,
    message: &str,
  ) -> Option<String> {
    loop {
      let value = self.required_field(label)?;
      if !valid(&value) {
        println!("{}", message.red());
        continue;
      }
      return Some(value);
    }
  }

  /// TLD preset menu for the search flow. Empty means no filter.
  fn select_tlds(&mut self) -> Option<Vec<String>> {
    println!();
    println!("{}", "Select TLD options:".cyan());
    println!("1. All popular TLDs");
    println!("2. .com, .net, .org only");
    println!("3. .io, .dev, .tech (tech domains)");
    println!("4. .ai, .app, .co (startup domains)");
    println!("5. Custom selection");

    let choice = loop {
      let input = self.prompt.line("Enter your choice (1-5): ")?;
      match input.parse::<u8>() {
        Ok(n @ 1..=5) => break n,
        _ => println!("{}", "Invalid choice. Please enter a number between 1 and 5.".red()),
      }
    };

    let preset: &[&str] = match choice {
      2 => &["com", "net", "org"],
      3 => &["io", "dev", "tech"],
      4 => &["ai", "app", "co"],
      5 => {
        let custom = self.ask("Enter TLDs separated by commas (e.g., com,net,org): ")?;
        return Some(
          custom
            .split(',')
            .map(|tld| tld.trim().trim_start_matches('.').to_string())
            .filter(|tld| !tld.is_empty())
            .collect(),
        );
      }
      _ => &[],
    };
    Some(preset.iter().map(|tld| tld.to_string()).collect())
  }
}

/// The suggestion keyword for a taken domain: the text before the first
/// dot.
fn keyword_of(domain: &str) -> &str {
  domain.split('.').next().unwrap_or(domain)
}

fn period_for_choice(choice: usize) -> Option<u32> {
  PERIOD_YEARS.get(choice.checked_sub(1)?).copied()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn period_table_maps_menu_choices() {
    assert_eq!(period_for_choice(1), Some(1));
    assert_eq!(period_for_choice(2), Some(2));
    assert_eq!(period_for_choice(3), Some(3));
    assert_eq!(period_for_choice(4), Some(5));
    assert_eq!(period_for_choice(5), Some(10));
  }

  #[test]
  fn period_rejects_out_of_range_choices() {
    assert_eq!(period_for_choice(0), None);
    assert_eq!(period_for_choice(6), None);
  }

  #[test]
  fn keyword_stops_at_the_first_dot() {
    assert_eq!(keyword_of("myidea.com"), "myidea");
    assert_eq!(keyword_of("sub.example.co.uk"), "sub");
    assert_eq!(keyword_of("nodot"), "nodot");
  }
}
