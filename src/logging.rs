use tracing_subscriber::EnvFilter;

use crate::flags::Flags;

/// Environment variable holding an `EnvFilter` directive that overrides the
/// level chosen from the flags.
pub const LOG_ENV: &str = "RILL_LOG";

pub fn level(flags: &Flags) -> &'static str {
    if flags.is_set("debug") {
        "debug"
    } else if flags.is_set("quiet") {
        "error"
    } else {
        "warn"
    }
}

/// Installs the stderr subscriber. Safe to call more than once; later calls
/// keep the first subscriber.
pub fn init(flags: &Flags) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level(flags)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
