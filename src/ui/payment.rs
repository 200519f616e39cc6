/// Renders the scannable part of the payment hand-off screen.
///
/// Selection happens once at startup via `default_renderer`; the flows
/// only see the trait.
pub trait PaymentRenderer {
  /// A terminal-printable block encoding the url, or None when this
  /// build cannot render one.
  fn render(&self, url: &str) -> Option<String>;
}

/// Fallback renderer: the user opens the url manually.
pub struct TextRenderer;

impl PaymentRenderer for TextRenderer {
  fn render(&self, _url: &str) -> Option<String> {
    None
  }
}

/// Unicode QR renderer for UPI-style payment urls.
#[cfg(feature = "qr")]
pub struct QrRenderer;

#[cfg(feature = "qr")]
impl PaymentRenderer for QrRenderer {
  fn render(&self, url: &str) -> Option<String> {
    use qrcode::render::unicode;
    use qrcode::QrCode;

    let code = QrCode::new(url.as_bytes()).ok()?;
    // Colors inverted for dark terminal backgrounds.
    Some(
      code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .quiet_zone(true)
        .build(),
    )
  }
}

/// The renderer for this build: QR when compiled in, text otherwise.
pub fn default_renderer() -> Box<dyn PaymentRenderer> {
  #[cfg(feature = "qr")]
  {
    Box::new(QrRenderer)
  }
  #[cfg(not(feature = "qr"))]
  {
    Box::new(TextRenderer)
  }
}
