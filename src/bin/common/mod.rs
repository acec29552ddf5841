use env_logger::Env;

/// Initialize the logger, `RUST_LOG` taking precedence over the verbosity flags.
pub fn init_logger(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
