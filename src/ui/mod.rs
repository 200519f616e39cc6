pub mod payment;
pub mod prompt;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use serde_json::Value;
use std::io;

use crate::registrar::types::field_errors;

/// Clear the screen and print the application banner.
pub fn print_header() {
  let _ = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0));
  println!("{}", "GoDaddy Domain Manager".cyan().bold());
  println!("{}", "Automate your domain registration process".yellow());
  println!("{}", "-".repeat(80));
}

/// Format a micro-unit price for display: 1,000,000 micros = $1.
///
/// Rounds half-up at the cent, so 1299900 micros renders as "$1.30".
pub fn format_price(micros: u64) -> String {
  let cents = (micros + 5_000) / 10_000;
  format!("${}.{:02}", cents / 100, cents % 100)
}

/// Render a registrar error payload, listing field-level messages when
/// the structured form is present.
pub fn print_error_detail(detail: &Value) {
  let fields = field_errors(detail);
  if !fields.is_empty() {
    println!("{}", "Invalid fields in request:".red());
    for (field, message) in fields {
      println!("- {}: {}", field, message);
    }
    return;
  }
  if let Some(message) = detail.get("message").and_then(Value::as_str) {
    println!("{}", message.red());
    return;
  }
  match detail {
    Value::String(s) => println!("{}", s.as_str().red()),
    other => println!("{}", other.to_string().red()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn price_rounds_half_up_at_the_cent() {
    assert_eq!(format_price(1299900), "$1.30");
    assert_eq!(format_price(1005000), "$1.01");
    assert_eq!(format_price(1004999), "$1.00");
  }

  #[test]
  fn price_formats_whole_and_zero_amounts() {
    assert_eq!(format_price(0), "$0.00");
    assert_eq!(format_price(999900), "$1.00");
    assert_eq!(format_price(11990000), "$11.99");
    assert_eq!(format_price(123456789), "$123.46");
  }
}
