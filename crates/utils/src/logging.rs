use tracing_subscriber::{EnvFilter, filter::ParseError, prelude::*};

/// Crates whose logs follow `RUST_LOG`; everything else is held at `warn`.
pub const LOGGED_CRATES: &[&str] = &["server", "helpdesk", "utils"];

/// Filter directives for `level`, e.g. `warn,server=debug,helpdesk=debug,utils=debug`.
pub fn filter_directives(level: &str) -> String {
    std::iter::once("warn".to_string())
        .chain(LOGGED_CRATES.iter().map(|name| format!("{}={}", name, level)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the global fmt subscriber. The level comes from `RUST_LOG` (default `info`).
pub fn init_tracing() -> Result<(), ParseError> {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = EnvFilter::try_new(filter_directives(&log_level))?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_every_crate() {
        assert_eq!(
            filter_directives("debug"),
            "warn,server=debug,helpdesk=debug,utils=debug"
        );
        assert!(EnvFilter::try_new(filter_directives("info")).is_ok());
    }
}
