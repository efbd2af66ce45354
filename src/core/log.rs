use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

const APP_TARGET: &str = "fxbudget";
/// Connection pool and TLS chatter of the rate service client.
const HTTP_TARGETS: [&str; 3] = ["reqwest", "hyper_util", "rustls"];

/// Per-target levels. Verbose mode shows the app at debug and the HTTP
/// client only from info upwards, otherwise everything is off.
fn log_targets(verbose: bool) -> Targets {
    if !verbose {
        return Targets::new().with_default(LevelFilter::OFF);
    }
    HTTP_TARGETS
        .iter()
        .fold(Targets::new(), |targets, target| {
            targets.with_target(*target, LevelFilter::INFO)
        })
        .with_target(APP_TARGET, LevelFilter::DEBUG)
}

/// Installs the global subscriber. Logging stays off unless `verbose` is set
/// or `RUST_LOG` asks for it.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().ok();
    // RUST_LOG takes over the per-target defaults entirely
    let targets = env_filter.is_none().then(|| log_targets(verbose));

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(targets)
        .with(env_filter)
        .init();
}
