pub mod args;
pub mod commands;
pub mod render;

pub use args::Cli;
pub use commands::run;

/// Install the stderr logger. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
