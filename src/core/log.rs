use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs the global subscriber. Silent unless `verbose` or `RUST_LOG`.
///
/// Output goes to stderr so tables on stdout stay clean. Verbose mode shows
/// debug events from this crate only; the HTTP stack stays at warn.
pub fn init_logging(verbose: bool) {
    let (level_filter, directive) = if verbose {
        (LevelFilter::DEBUG, "debug,hyper=warn,hyper_util=warn,reqwest=warn")
    } else {
        (LevelFilter::OFF, "off")
    };
    let app_filter = Targets::new()
        .with_target("finboard", level_filter)
        .with_default(LevelFilter::WARN);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(app_filter)
        .with(env_filter)
        .init();
}
