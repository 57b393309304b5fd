use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Warnings (e.g. a reference-year fallback) are always shown; `--verbose`
/// adds the per-lookup debug trail.
fn levels(verbose: bool) -> (LevelFilter, &'static str) {
    if verbose {
        (LevelFilter::DEBUG, "debug")
    } else {
        (LevelFilter::WARN, "warn")
    }
}

/// Logs go to stderr so `valuate --json` output can be piped.
pub fn init_logging(verbose: bool) {
    let (level_filter, level) = levels(verbose);
    let storyval_filter = Targets::new().with_target("storyval", level_filter);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(storyval_filter)
        .with(env_filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_warnings_survive_quiet_mode() {
        assert_eq!(levels(false), (LevelFilter::WARN, "warn"));
        assert_eq!(levels(true), (LevelFilter::DEBUG, "debug"));
    }
}
