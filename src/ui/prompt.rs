use std::io::{self, Write};

/// Line-oriented input source for the interactive flows.
///
/// The flows take this as a trait object so tests can drive them with
/// scripted answers instead of a terminal.
pub trait Prompt {
  /// Show a label and read one line, trimmed. None means input closed.
  fn line(&mut self, label: &str) -> Option<String>;
}

/// Prompt backed by stdin/stdout.
pub struct TermPrompt;

impl Prompt for TermPrompt {
  fn line(&mut self, label: &str) -> Option<String> {
    print!("{label}");
    io::stdout().flush().ok()?;

    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
      Ok(0) => None, // EOF
      Ok(_) => Some(buf.trim().to_string()),
      Err(_) => None,
    }
  }
}
