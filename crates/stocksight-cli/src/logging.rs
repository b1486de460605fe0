//! Tracing subscriber setup.

use crate::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Default filter directive for the given flags.
///
/// `--quiet` wins over everything, then `--debug`; otherwise `info`.
pub fn default_directive(debug: bool, quiet: bool) -> &'static str {
    if quiet {
        "off"
    } else if debug {
        "debug"
    } else {
        "info"
    }
}

/// Install the fmt subscriber on stderr.
///
/// `RUST_LOG` overrides the level chosen by the flags.
pub fn init(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(cli.debug, cli.quiet)));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(!cli.no_color)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false, false), "info");
        assert_eq!(default_directive(true, false), "debug");
        assert_eq!(default_directive(false, true), "off");
        assert_eq!(default_directive(true, true), "off");
    }
}
