mod bundle;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

use screenspec_runtime::{ChannelDispatcher, Request, Session, SessionConfig};

/// Screenspec - an interpreter for declarative multi-screen forms
#[derive(Parser)]
#[command(name = "screenspec")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to the data directory (default: ~/.screenspec)
  #[arg(long, global = true)]
  data_dir: Option<PathBuf>,

  /// Increase log verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Load and resolve a bundle, reporting any structural error
  Check {
    /// Bundle directory or document file
    bundle: PathBuf,
  },

  /// Print the snapshot of a screen
  View {
    /// Bundle directory or document file
    bundle: PathBuf,

    /// Screen to render instead of the initial screen
    #[arg(long)]
    screen: Option<String>,
  },

  /// Run a session, reading JSON requests from stdin one per line
  Run {
    /// Bundle directory or document file
    bundle: PathBuf,

    /// Screen to start on instead of the initial screen
    #[arg(long)]
    screen: Option<String>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  logging::init(cli.verbose);

  let data_dir = match cli.data_dir {
    Some(dir) => dir,
    None => dirs::home_dir()
      .context("could not determine home directory")?
      .join(".screenspec"),
  };

  let rt = tokio::runtime::Runtime::new()?;

  match cli.command {
    Some(Commands::Check { bundle }) => rt.block_on(check(bundle, data_dir)),
    Some(Commands::View { bundle, screen }) => rt.block_on(view(bundle, screen, data_dir)),
    Some(Commands::Run { bundle, screen }) => rt.block_on(run(bundle, screen, data_dir)),
    None => {
      println!("screenspec - use --help to see available commands");
      Ok(())
    }
  }
}

async fn check(bundle: PathBuf, data_dir: PathBuf) -> Result<()> {
  let path = bundle::locate(&bundle, &data_dir);
  let loaded = bundle::load(&path, None).await?;

  println!(
    "{}: {} screens, {} rules, {} transitions, {} assets, starts on '{}'",
    path.display(),
    loaded.spec.screens.len(),
    loaded.spec.rules.len(),
    loaded.spec.transitions.len(),
    loaded.assets.len(),
    loaded.spec.initial_screen,
  );

  Ok(())
}

async fn view(bundle: PathBuf, screen: Option<String>, data_dir: PathBuf) -> Result<()> {
  let path = bundle::locate(&bundle, &data_dir);
  let loaded = bundle::load(&path, None).await?;

  let session = Session::new(
    loaded.spec,
    loaded.assets,
    SessionConfig {
      initial_screen: screen,
    },
  )
  .context("failed to start session")?;

  let snapshot = session.snapshot().context("failed to render screen")?;
  println!("{}", serde_json::to_string_pretty(&snapshot)?);

  Ok(())
}

async fn run(bundle: PathBuf, screen: Option<String>, data_dir: PathBuf) -> Result<()> {
  let path = bundle::locate(&bundle, &data_dir);
  let loaded = bundle::load(&path, screen).await?;

  // Operations have no executor here; report them and let the session move on
  let (tx, mut rx) = mpsc::unbounded_channel();
  let reporter = tokio::spawn(async move {
    while let Some(request) = rx.recv().await {
      match serde_json::to_string(&request) {
        Ok(json) => eprintln!("operation: {}", json),
        Err(e) => warn!(error = %e, "failed to encode operation request"),
      }
    }
  });

  let mut session = Session::new(loaded.spec, loaded.assets, SessionConfig::default())
    .context("failed to start session")?
    .with_dispatcher(Arc::new(ChannelDispatcher::new(tx)));

  info!(session_id = %session.id(), "reading requests from stdin");

  let snapshot = session.snapshot().context("failed to render screen")?;
  println!("{}", serde_json::to_string(&snapshot)?);

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
    let line = line.trim();
    if line.is_empty() {
      continue;
    }

    let request: Request = match serde_json::from_str(line) {
      Ok(request) => request,
      Err(e) => {
        warn!(error = %e, "skipping malformed request");
        continue;
      }
    };

    let snapshot = session
      .handle(request)
      .context("failed to handle request")?;
    println!("{}", serde_json::to_string(&snapshot)?);
  }

  // Closes the channel so the reporter drains and exits
  drop(session);
  reporter.await?;

  Ok(())
}
