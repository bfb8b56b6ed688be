//! CLI entry point for licguard.
//!
//! This module is intentionally thin: it handles argument parsing, process
//! concerns (logging, signals, exit codes) and output. All business logic
//! lives in the `licguard-app` crate.

#![forbid(unsafe_code)]

use anyhow::Context;
use clap::{Parser, ValueEnum};
use licguard_app::{ScanInput, Violations, exit_code, load_policy, run_scan, write_json};
use licguard_render::TextRenderer;
use licguard_toolchain::{AskalonoClassifier, GoToolchain};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(
    name = "licguard",
    version,
    about = "Evaluate the licenses of modules embedded in compiled Go binaries"
)]
struct Cli {
    /// Binaries to audit.
    #[arg(value_name = "BINARY", required = true)]
    binaries: Vec<PathBuf>,

    /// Path to a TOML or YAML config file (`.yaml`/`.yml` select YAML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Handlebars template for the text report written to stdout.
    #[arg(long)]
    template: Option<String>,

    /// Write the JSON summary to this file.
    #[arg(long)]
    json: Option<PathBuf>,

    /// askalono license cache used instead of the bundled licenses.
    #[arg(long)]
    license_db: Option<PathBuf>,

    /// Colour the explanations in the text report.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Go toolchain binary.
    #[arg(long, env = "LICGUARD_GO", default_value = "go")]
    go: PathBuf,

    /// Cancel the run after this many seconds.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Tracing filter, e.g. `info` or `licguard_app=debug`.
    /// Defaults to `RUST_LOG`, else `warn`.
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    /// Only when stdout is a terminal and `NO_COLOR` is unset.
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // Usage errors exit 1; 2 is reserved for policy violations.
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };
    init_tracing(cli.log_level.as_deref());

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("licguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    runtime.block_on(cmd_scan(cli))
}

async fn cmd_scan(cli: Cli) -> anyhow::Result<i32> {
    let renderer = TextRenderer::new(cli.template.as_deref())
        .context("invalid template")?
        .with_color(cli.color.enabled());
    let policy = load_policy(cli.config.as_deref())?;
    let binaries = absolute_paths(&cli.binaries).context("invalid arguments")?;
    let classifier = match &cli.license_db {
        Some(path) => {
            AskalonoClassifier::from_cache_file(path).context("load license database")?
        }
        None => AskalonoClassifier::bundled(),
    };
    let go = GoToolchain::new(&cli.go);

    let token = CancellationToken::new();
    spawn_interrupt_watcher(token.clone());
    if let Some(secs) = cli.timeout {
        spawn_deadline(token.clone(), Duration::from_secs(secs));
    }

    let summary = run_scan(
        ScanInput {
            binaries: &binaries,
            policy: &policy,
        },
        &go,
        &go,
        &classifier,
        &token,
    )
    .await
    .context("failed to evaluate licenses")?;

    if let Some(path) = &cli.json {
        write_json(path, &summary).context("failed to write json")?;
    }

    let text = renderer.render(&summary).context("failed to write results")?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write results")?;

    if let Some(violations) = Violations::from_summary(&summary) {
        eprintln!("{violations}");
    }
    Ok(exit_code(&summary))
}

fn absolute_paths(paths: &[PathBuf]) -> anyhow::Result<Vec<String>> {
    paths
        .iter()
        .map(|p| {
            std::path::absolute(p)
                .map(|abs| abs.display().to_string())
                .with_context(|| format!("failed to get absolute path of {}", p.display()))
        })
        .collect()
}

fn spawn_interrupt_watcher(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling scan");
            token.cancel();
        }
    });
}

fn spawn_deadline(token: CancellationToken, after: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        tracing::warn!(secs = after.as_secs(), "timeout reached, cancelling scan");
        token.cancel();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn relative_paths_become_absolute() {
        let out = absolute_paths(&[PathBuf::from("bin/app")]).expect("absolute");
        assert!(Path::new(&out[0]).is_absolute());
        assert!(out[0].ends_with("app"));
    }

    #[test]
    fn explicit_color_choices_ignore_the_terminal() {
        assert!(ColorChoice::Always.enabled());
        assert!(!ColorChoice::Never.enabled());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
