use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors from the registrar client
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("network error: {0}")]
  Network(#[from] reqwest::Error),

  #[error("registrar returned HTTP {status}: {}", body_text(.body))]
  Api { status: u16, body: Value },

  #[error("invalid JSON: {0}")]
  Json(#[from] serde_json::Error),
}

fn body_text(body: &Value) -> String {
  match body {
    Value::String(s) => s.clone(),
    other => other
      .get("message")
      .and_then(Value::as_str)
      .map(str::to_owned)
      .unwrap_or_else(|| other.to_string()),
  }
}

/// Pull per-field messages out of a structured registrar error body.
///
/// The purchase endpoint reports schema problems either as a `fields`
/// array of `{path, message}` objects or as a plain field-to-message map;
/// both are flattened to `(field, message)` pairs. Anything else yields
/// an empty list.
pub fn field_errors(detail: &Value) -> Vec<(String, String)> {
  let Some(fields) = detail.get("fields") else {
    return Vec::new();
  };
  match fields {
    Value::Array(items) => items
      .iter()
      .filter_map(|field| {
        let path = field.get("path").and_then(Value::as_str)?;
        let message = field
          .get("message")
          .and_then(Value::as_str)
          .unwrap_or("invalid value");
        Some((path.to_string(), message.to_string()))
      })
      .collect(),
    Value::Object(map) => map
      .iter()
      .map(|(field, message)| {
        let text = match message {
          Value::String(s) => s.clone(),
          other => other.to_string(),
        };
        (field.clone(), text)
      })
      .collect(),
    _ => Vec::new(),
  }
}

/// Availability check result for a single domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Availability {
  #[serde(default)]
  pub domain: String,
  #[serde(default)]
  pub available: bool,
  /// Price in micro-units: 1,000,000 micros = 1 unit of `currency`.
  #[serde(default)]
  pub price: u64,
  #[serde(default)]
  pub currency: Option<String>,
  /// False when the registrar could only answer from a cached zone list.
  #[serde(default)]
  pub definitive: bool,
  #[serde(default)]
  pub period: Option<u32>,
}

/// One candidate from the suggestion endpoint, in registrar order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedDomain {
  pub domain: String,
  #[serde(default)]
  pub price: u64,
}

/// Registrant contact record collected from the user
#[derive(Debug, Clone, PartialEq)]
pub struct ContactInfo {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub address_line1: String,
  pub address_line2: Option<String>,
  pub city: String,
  pub state: String,
  pub postal_code: String,
  /// Two-letter country code.
  pub country: String,
}

/// Contact records by registrar role. Roles left as None are omitted
/// from the purchase payload and default server-side.
#[derive(Debug, Clone, Default)]
pub struct Contacts {
  pub admin: Option<ContactInfo>,
  pub billing: Option<ContactInfo>,
  pub registrant: Option<ContactInfo>,
  pub tech: Option<ContactInfo>,
}

impl Contacts {
  /// One record for all four roles, as the interactive flow collects it.
  pub fn same_for_all(contact: ContactInfo) -> Self {
    Self {
      admin: Some(contact.clone()),
      billing: Some(contact.clone()),
      registrant: Some(contact.clone()),
      tech: Some(contact),
    }
  }
}

/// Options assembled by the purchase flow; never persisted
#[derive(Debug, Clone)]
pub struct PurchaseOptions {
  /// Registration period in years (1, 2, 3, 5 or 10).
  pub period: u32,
  pub renew_auto: bool,
  pub privacy: bool,
  /// Custom name servers; empty means registrar defaults.
  pub name_servers: Vec<String>,
  pub contacts: Contacts,
  /// Consent attestation origin; None falls back to "127.0.0.1".
  pub agreed_by: Option<String>,
  /// Consent timestamp in epoch milliseconds; None means now.
  pub agreed_at: Option<u64>,
}

impl Default for PurchaseOptions {
  fn default() -> Self {
    Self {
      period: 1,
      renew_auto: true,
      privacy: true,
      name_servers: Vec::new(),
      contacts: Contacts::default(),
      agreed_by: None,
      agreed_at: None,
    }
  }
}

/// Terminal classification of a purchase response.
///
/// The registrar reports success, pending payment and rejection through
/// one JSON shape. An `error` key wins over a `paymentUrl`, and a
/// `paymentUrl` wins over plain success.
#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseOutcome {
  /// Registration accepted outright.
  Success { order_id: Option<String>, raw: Value },
  /// Registration recorded but waiting on an out-of-band payment.
  PendingPayment { order_id: String, payment_url: String },
  /// Registrar rejected the purchase; detail keeps any field messages.
  Failure { detail: Value },
}

impl PurchaseOutcome {
  pub fn classify(body: Value) -> Self {
    if let Some(err) = body.get("error") {
      return Self::Failure { detail: err.clone() };
    }
    if let Some(url) = body.get("paymentUrl").and_then(Value::as_str) {
      return Self::PendingPayment {
        order_id: order_id_of(&body).unwrap_or_default(),
        payment_url: url.to_string(),
      };
    }
    Self::Success {
      order_id: order_id_of(&body),
      raw: body,
    }
  }
}

/// Order ids arrive as JSON numbers or strings depending on endpoint.
fn order_id_of(body: &Value) -> Option<String> {
  match body.get("orderId") {
    Some(Value::String(s)) => Some(s.clone()),
    Some(Value::Number(n)) => Some(n.to_string()),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn error_key_beats_payment_url() {
    let outcome = PurchaseOutcome::classify(json!({
      "error": {"message": "declined"},
      "paymentUrl": "https://pay.example/x",
      "orderId": 7
    }));
    assert_eq!(
      outcome,
      PurchaseOutcome::Failure { detail: json!({"message": "declined"}) }
    );
  }

  #[test]
  fn payment_url_beats_success() {
    let outcome = PurchaseOutcome::classify(json!({
      "orderId": "ORD-9",
      "paymentUrl": "upi://pay?pa=x"
    }));
    assert_eq!(
      outcome,
      PurchaseOutcome::PendingPayment {
        order_id: "ORD-9".to_string(),
        payment_url: "upi://pay?pa=x".to_string(),
      }
    );
  }

  #[test]
  fn pending_without_order_id_gets_empty_id() {
    let outcome = PurchaseOutcome::classify(json!({"paymentUrl": "upi://pay"}));
    match outcome {
      PurchaseOutcome::PendingPayment { order_id, .. } => assert_eq!(order_id, ""),
      other => panic!("expected pending payment, got {other:?}"),
    }
  }

  #[test]
  fn numeric_order_id_becomes_string() {
    let outcome = PurchaseOutcome::classify(json!({"orderId": 1234567, "total": 11990000}));
    match outcome {
      PurchaseOutcome::Success { order_id, .. } => {
        assert_eq!(order_id.as_deref(), Some("1234567"));
      }
      other => panic!("expected success, got {other:?}"),
    }
  }

  #[test]
  fn plain_body_is_success_with_raw_kept() {
    let body = json!({"success": true});
    let outcome = PurchaseOutcome::classify(body.clone());
    assert_eq!(outcome, PurchaseOutcome::Success { order_id: None, raw: body });
  }

  #[test]
  fn field_errors_from_array_form() {
    let detail = json!({
      "code": "INVALID_BODY",
      "message": "Request body doesn't fulfill schema",
      "fields": [
        {"code": "REQUIRED", "message": "is required", "path": "contactAdmin.email"},
        {"code": "MALFORMED", "path": "period"}
      ]
    });
    let errors = field_errors(&detail);
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0], ("contactAdmin.email".to_string(), "is required".to_string()));
    assert_eq!(errors[1], ("period".to_string(), "invalid value".to_string()));
  }

  #[test]
  fn field_errors_from_map_form() {
    let detail = json!({"fields": {"phone": "must include country code"}});
    let errors = field_errors(&detail);
    assert_eq!(errors, vec![("phone".to_string(), "must include country code".to_string())]);
  }

  #[test]
  fn field_errors_absent_for_plain_messages() {
    assert!(field_errors(&json!({"message": "nope"})).is_empty());
    assert!(field_errors(&json!("boom")).is_empty());
  }

  #[test]
  fn same_for_all_fills_every_role() {
    let contact = ContactInfo {
      first_name: "Ada".into(),
      last_name: "Lovelace".into(),
      email: "ada@example.com".into(),
      phone: "+441234567890".into(),
      address_line1: "12 Gower St".into(),
      address_line2: None,
      city: "London".into(),
      state: "LDN".into(),
      postal_code: "NW1".into(),
      country: "GB".into(),
    };
    let contacts = Contacts::same_for_all(contact.clone());
    assert_eq!(contacts.admin.as_ref(), Some(&contact));
    assert_eq!(contacts.billing.as_ref(), Some(&contact));
    assert_eq!(contacts.registrant.as_ref(), Some(&contact));
    assert_eq!(contacts.tech.as_ref(), Some(&contact));
  }
}
