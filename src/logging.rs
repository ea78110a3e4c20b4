//! Logging setup for the binary
//!
//! The library only talks to the `log` facade; this installs `env_logger`
//! behind it. `RUST_LOG` always wins over the verbosity flags.

use log::LevelFilter;

/// Filter used when `RUST_LOG` is not set
pub fn default_level(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    }
}

/// Install the stderr logger. Calling it twice is harmless.
pub fn init_logging(quiet: bool, verbose: bool) {
    let level = default_level(quiet, verbose);
    let env = env_logger::Env::default().default_filter_or(level.as_str().to_lowercase());

    let result = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();

    if result.is_ok() {
        log::debug!("logging initialized at {}", level);
    }
}
