use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVE: &str = "jassguard=info,jassguard_core=info";

/// Install the stderr subscriber. `RUST_LOG` wins over `default_directive`.
///
/// Returns `false` when a global subscriber was already set.
pub fn init(default_directive: &str) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true),
    );

    if subscriber.try_init().is_err() {
        return false;
    }

    tracing::debug!(default_directive, "tracing initialized");
    true
}
