use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Log lines go to stderr so interactive prompts on stdout stay clean.
/// RUST_LOG overrides the defaults when set.
pub fn init(verbose: bool) {
  let default_filter = if verbose { "domgr=debug,info" } else { "domgr=info" };
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

  tracing_subscriber::registry()
    .with(filter)
    .with(
      tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact(),
    )
    .init();
}
