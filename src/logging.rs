use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Directives used when `RUST_LOG` is unset. Recoverable API failures are
/// logged at `warn`, so a plain run stays quiet.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "profilefetch=debug,warn"
    } else {
        "error"
    }
}

/// Install the stderr subscriber. `RUST_LOG` always wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
