//! Logging setup for the CLI.
//!
//! Logs go to stderr so snapshots written to stdout stay machine-readable.
//! `RUST_LOG` takes precedence over the verbosity flag.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count.
fn default_directive(verbosity: u8) -> &'static str {
  match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  }
}

pub fn init(verbosity: u8) {
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_directive() {
    assert_eq!(default_directive(0), "warn");
    assert_eq!(default_directive(1), "info");
    assert_eq!(default_directive(2), "debug");
    assert_eq!(default_directive(9), "trace");
  }
}
