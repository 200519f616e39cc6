use reqwest::{header, Method};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, info};

use super::types::{
  ApiError, Availability, ContactInfo, PurchaseOptions, PurchaseOutcome, SuggestedDomain,
};

const API_VERSION: &str = "v1";
const PRODUCTION_URL: &str = "https://api.godaddy.com";

/// Client for the GoDaddy domains API.
///
/// Credentials and base URL are fixed at construction. One reqwest client
/// is reused for every call, so connections to the registrar are pooled
/// for the life of the session.
pub struct GoDaddyClient {
  http: reqwest::Client,
  base_url: String,
  auth: String,
}

impl GoDaddyClient {
  /// Build a client against `api_url`, or the production endpoint when
  /// the url is empty. Point it at https://api.ote-godaddy.com for the
  /// OTE sandbox.
  pub fn new(api_key: &str, api_secret: &str, api_url: &str) -> Self {
    let base = if api_url.trim().is_empty() { PRODUCTION_URL } else { api_url };
    Self {
      http: reqwest::Client::new(),
      base_url: normalize_base_url(base),
      auth: format!("sso-key {}:{}", api_key, api_secret),
    }
  }

  /// Check if a domain is available for purchase
  ///
  /// API: GET {base}/v1/domains/available?domain={domain}
  /// - 200: { "available": bool, "price": micros, "definitive": bool, .. }
  pub async fn check_availability(&self, domain: &str) -> Result<Availability, ApiError> {
    info!("checking availability for {domain}");
    let body = self
      .request(
        Method::GET,
        "domains/available",
        None,
        &[("domain", domain.to_string())],
      )
      .await?;
    Ok(serde_json::from_value(body)?)
  }

  /// Suggest purchasable domains for a keyword
  ///
  /// API: GET {base}/v1/domains/suggest?query={keyword}&limit={limit}&tlds=a,b
  /// - 200: [ { "domain": .., "price": micros }, .. ] in registrar order
  pub async fn suggest(
    &self,
    keyword: &str,
    tlds: Option<&[String]>,
    limit: u32,
  ) -> Result<Vec<SuggestedDomain>, ApiError> {
    info!("fetching suggestions for '{keyword}'");
    let mut query = vec![
      ("query", keyword.to_string()),
      ("limit", limit.to_string()),
    ];
    if let Some(tlds) = tlds {
      if !tlds.is_empty() {
        query.push(("tlds", tlds.join(",")));
      }
    }
    let body = self.request(Method::GET, "domains/suggest", None, &query).await?;
    Ok(serde_json::from_value(body)?)
  }

  /// Fetch registrar details for a domain in the account, unmodified
  ///
  /// API: GET {base}/v1/domains/{domain}
  pub async fn get_details(&self, domain: &str) -> Result<Value, ApiError> {
    info!("fetching details for {domain}");
    self
      .request(Method::GET, &format!("domains/{domain}"), None, &[])
      .await
  }

  /// Fetch the status of an order, unmodified
  ///
  /// API: GET {base}/v1/orders/{orderId}
  pub async fn order_status(&self, order_id: &str) -> Result<Value, ApiError> {
    info!("checking status for order {order_id}");
    self
      .request(Method::GET, &format!("orders/{order_id}"), None, &[])
      .await
  }

  /// Purchase a domain
  ///
  /// API: POST {base}/v1/domains/purchase
  ///
  /// The response is classified before it is returned: a rejection (an
  /// HTTP error status or an `error` key) becomes `Failure` so callers
  /// keep the registrar's field-level messages, a `paymentUrl` becomes
  /// `PendingPayment`, anything else `Success`. Only transport and
  /// decode problems surface as `Err`.
  pub async fn purchase(
    &self,
    domain: &str,
    options: &PurchaseOptions,
  ) -> Result<PurchaseOutcome, ApiError> {
    info!("purchasing domain {domain}");
    let payload = serde_json::to_value(PurchaseRequest::from_options(domain, options))?;
    debug!("purchase request: {payload}");

    match self.request(Method::POST, "domains/purchase", Some(&payload), &[]).await {
      Ok(body) => {
        let outcome = PurchaseOutcome::classify(body);
        if let PurchaseOutcome::PendingPayment { payment_url, .. } = &outcome {
          info!("payment url generated: {payment_url}");
        }
        Ok(outcome)
      }
      Err(ApiError::Api { status, body }) => {
        error!("purchase rejected with HTTP {status}");
        Ok(PurchaseOutcome::Failure { detail: body })
      }
      Err(e) => Err(e),
    }
  }

  /// One registrar call: auth and JSON headers, query, optional body.
  ///
  /// Non-2xx responses become `ApiError::Api` carrying the parsed error
  /// body (or the status line when the body is not JSON). An empty 2xx
  /// body is mapped to `{"success": true}` so callers always see JSON.
  async fn request(
    &self,
    method: Method,
    endpoint: &str,
    body: Option<&Value>,
    query: &[(&str, String)],
  ) -> Result<Value, ApiError> {
    let url = format!("{}/{}/{}", self.base_url, API_VERSION, endpoint);
    let mut request = self
      .http
      .request(method, &url)
      .header(header::AUTHORIZATION, &self.auth)
      .header(header::CONTENT_TYPE, "application/json")
      .header(header::ACCEPT, "application/json");
    if !query.is_empty() {
      request = request.query(query);
    }
    if let Some(body) = body {
      request = request.json(body);
    }

    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
      error!("registrar call failed: {} {}", status.as_u16(), url);
      let body = serde_json::from_str(&text)
        .unwrap_or_else(|_| Value::String(format!("HTTP {} for {}", status, url)));
      return Err(ApiError::Api { status: status.as_u16(), body });
    }

    if text.is_empty() {
      return Ok(json!({ "success": true }));
    }
    Ok(serde_json::from_str(&text)?)
  }
}

/// Prefix https:// when no scheme is given and drop trailing slashes, so
/// configured urls like `api.ote-godaddy.com/` still work.
fn normalize_base_url(url: &str) -> String {
  let url = url.trim();
  let with_scheme = if url.starts_with("http") {
    url.to_string()
  } else {
    format!("https://{}", url)
  };
  with_scheme.trim_end_matches('/').to_string()
}

fn epoch_millis() -> u64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|d| d.as_millis() as u64)
    .unwrap_or(0)
}

/// Consent attestation required by the purchase endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Consent {
  agreement_keys: Vec<String>,
  agreed_by: String,
  agreed_at: u64,
}

/// Contact in the registrar's wire shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegistrarContact {
  name_first: String,
  name_last: String,
  email: String,
  phone: String,
  address_mailing: MailingAddress,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MailingAddress {
  address1: String,
  address2: String,
  city: String,
  state: String,
  postal_code: String,
  country: String,
}

impl From<&ContactInfo> for RegistrarContact {
  fn from(contact: &ContactInfo) -> Self {
    Self {
      name_first: contact.first_name.clone(),
      name_last: contact.last_name.clone(),
      email: contact.email.clone(),
      phone: contact.phone.clone(),
      address_mailing: MailingAddress {
        address1: contact.address_line1.clone(),
        // The registrar wants an empty string here, not an absent key.
        address2: contact.address_line2.clone().unwrap_or_default(),
        city: contact.city.clone(),
        state: contact.state.clone(),
        postal_code: contact.postal_code.clone(),
        country: contact.country.clone(),
      },
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PurchaseRequest {
  domain: String,
  consent: Consent,
  period: u32,
  renew_auto: bool,
  privacy: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  contact_admin: Option<RegistrarContact>,
  #[serde(skip_serializing_if = "Option::is_none")]
  contact_billing: Option<RegistrarContact>,
  #[serde(skip_serializing_if = "Option::is_none")]
  contact_registrant: Option<RegistrarContact>,
  #[serde(skip_serializing_if = "Option::is_none")]
  contact_tech: Option<RegistrarContact>,
  #[serde(skip_serializing_if = "Option::is_none")]
  name_servers: Option<Vec<String>>,
}

impl PurchaseRequest {
  fn from_options(domain: &str, options: &PurchaseOptions) -> Self {
    Self {
      domain: domain.to_string(),
      consent: Consent {
        agreement_keys: vec!["DNRA".to_string()],
        agreed_by: options
          .agreed_by
          .clone()
          .unwrap_or_else(|| "127.0.0.1".to_string()),
        agreed_at: options.agreed_at.unwrap_or_else(epoch_millis),
      },
      period: options.period,
      renew_auto: options.renew_auto,
      privacy: options.privacy,
      contact_admin: options.contacts.admin.as_ref().map(RegistrarContact::from),
      contact_billing: options.contacts.billing.as_ref().map(RegistrarContact::from),
      contact_registrant: options.contacts.registrant.as_ref().map(RegistrarContact::from),
      contact_tech: options.contacts.tech.as_ref().map(RegistrarContact::from),
      name_servers: if options.name_servers.is_empty() {
        None
      } else {
        Some(options.name_servers.clone())
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::registrar::types::Contacts;

  fn contact() -> ContactInfo {
    ContactInfo {
      first_name: "Ada".into(),
      last_name: "Lovelace".into(),
      email: "ada@example.com".into(),
      phone: "+441234567890".into(),
      address_line1: "12 Gower St".into(),
      address_line2: None,
      city: "London".into(),
      state: "LDN".into(),
      postal_code: "NW1 2HR".into(),
      country: "GB".into(),
    }
  }

  #[test]
  fn normalizes_bare_hosts_to_https() {
    assert_eq!(normalize_base_url("api.ote-godaddy.com"), "https://api.ote-godaddy.com");
  }

  #[test]
  fn normalizes_trailing_slash_away() {
    assert_eq!(normalize_base_url("https://api.godaddy.com/"), "https://api.godaddy.com");
    assert_eq!(normalize_base_url(" https://api.godaddy.com// "), "https://api.godaddy.com");
  }

  #[test]
  fn keeps_explicit_http_scheme() {
    assert_eq!(normalize_base_url("http://127.0.0.1:5000"), "http://127.0.0.1:5000");
  }

  #[test]
  fn contact_maps_to_wire_names() {
    let wire = serde_json::to_value(RegistrarContact::from(&contact())).unwrap();
    assert_eq!(wire["nameFirst"], "Ada");
    assert_eq!(wire["nameLast"], "Lovelace");
    assert_eq!(wire["email"], "ada@example.com");
    assert_eq!(wire["addressMailing"]["address1"], "12 Gower St");
    assert_eq!(wire["addressMailing"]["postalCode"], "NW1 2HR");
    assert_eq!(wire["addressMailing"]["country"], "GB");
  }

  #[test]
  fn missing_address_line2_serializes_as_empty_string() {
    let wire = serde_json::to_value(RegistrarContact::from(&contact())).unwrap();
    assert_eq!(wire["addressMailing"]["address2"], "");
  }

  #[test]
  fn payload_omits_empty_roles_and_name_servers() {
    let options = PurchaseOptions {
      contacts: Contacts { registrant: Some(contact()), ..Contacts::default() },
      ..PurchaseOptions::default()
    };
    let payload = serde_json::to_value(PurchaseRequest::from_options("example.com", &options)).unwrap();

    assert_eq!(payload["domain"], "example.com");
    assert!(payload.get("contactRegistrant").is_some());
    assert!(payload.get("contactAdmin").is_none());
    assert!(payload.get("contactBilling").is_none());
    assert!(payload.get("contactTech").is_none());
    assert!(payload.get("nameServers").is_none());
  }

  #[test]
  fn payload_includes_name_servers_when_set() {
    let options = PurchaseOptions {
      name_servers: vec!["ns1.example.net".into(), "ns2.example.net".into()],
      ..PurchaseOptions::default()
    };
    let payload = serde_json::to_value(PurchaseRequest::from_options("example.com", &options)).unwrap();
    assert_eq!(payload["nameServers"][0], "ns1.example.net");
    assert_eq!(payload["nameServers"][1], "ns2.example.net");
  }

  #[test]
  fn consent_defaults_and_flags() {
    let options = PurchaseOptions { period: 2, privacy: false, ..PurchaseOptions::default() };
    let payload = serde_json::to_value(PurchaseRequest::from_options("example.com", &options)).unwrap();

    assert_eq!(payload["consent"]["agreementKeys"], serde_json::json!(["DNRA"]));
    assert_eq!(payload["consent"]["agreedBy"], "127.0.0.1");
    assert!(payload["consent"]["agreedAt"].as_u64().unwrap() > 0);
    assert_eq!(payload["period"], 2);
    assert_eq!(payload["renewAuto"], true);
    assert_eq!(payload["privacy"], false);
  }

  #[test]
  fn consent_overrides_are_used() {
    let options = PurchaseOptions {
      agreed_by: Some("203.0.113.7".into()),
      agreed_at: Some(1700000000000),
      ..PurchaseOptions::default()
    };
    let payload = serde_json::to_value(PurchaseRequest::from_options("example.com", &options)).unwrap();
    assert_eq!(payload["consent"]["agreedBy"], "203.0.113.7");
    assert_eq!(payload["consent"]["agreedAt"], 1700000000000u64);
  }
}
