use env_logger::Env;

/// Filter used when RUST_LOG is unset. Transport crates stay at warn.
const DEFAULT_FILTER: &str = "info,reqwest=warn,hyper=warn";

/// Initialize the client logger
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp(None)
        .init();
}
