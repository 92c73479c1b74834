use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install the stderr subscriber. Stdout is reserved for JSON results.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    FmtSubscriber::builder()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
