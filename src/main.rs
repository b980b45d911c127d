use clap::Parser;
use food_vision::{cli, client, config, error, render, report, runner, scanner};
use cli::{Cli, Commands};
use client::HttpPredictor;
use config::Config;
use error::{FoodVisionError, Result};
use food_vision_common::UiState;
use render::{Presenter, QuietPresenter, TerminalPresenter};
use report::RunReport;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;
    let theme = cli.theme.unwrap_or(config.theme);

    match cli.command {
        Commands::Predict { path, recursive, json, output, endpoint, timeout } => {
            let endpoint = match endpoint {
                Some(endpoint) => {
                    config::validate_endpoint(&endpoint)?;
                    endpoint
                }
                None => config.endpoint(),
            };
            let mut config = config;
            if let Some(seconds) = timeout {
                config.set_timeout(seconds)?;
            }

            let paths = scanner::collect_candidates(&path, recursive)?;
            if paths.is_empty() {
                return Err(FoodVisionError::NoImagesFound(path.display().to_string()));
            }

            let predictor = HttpPredictor::new(endpoint.clone(), config.timeout())?;
            let mut state: UiState<PathBuf> = UiState::new(theme);

            if !json {
                println!("🍕 food-vision - {} image(s) → {}\n", paths.len(), endpoint);
            }

            let sessions = if json {
                run(&mut state, &predictor, &mut QuietPresenter, &paths).await?
            } else {
                run(&mut state, &predictor, &mut TerminalPresenter::new(), &paths).await?
            };

            let report = RunReport::new(endpoint, sessions);

            if json {
                println!("{}", report.to_json()?);
            } else {
                println!("\n✅ {}/{} analyzed", report.completed(), report.attempted());
            }

            if let Some(output) = output {
                report.write(&output)?;
                if !json {
                    println!("✔ Report saved: {}", output.display());
                }
            }

            if report.all_failed() {
                return Err(FoodVisionError::AllFailed(report.attempted()));
            }
        }

        Commands::Health { endpoint } => {
            let endpoint = endpoint.unwrap_or_else(|| config.endpoint());
            config::validate_endpoint(&endpoint)?;

            let predictor = HttpPredictor::new(endpoint, config.timeout())?;
            let health = predictor.health().await?;

            println!(
                "{} {}{}",
                if health.is_healthy() { "✔" } else { "✘" },
                health.status,
                health.message.map(|m| format!(" - {}", m)).unwrap_or_default(),
            );
        }

        Commands::Config { set_endpoint, set_timeout, set_theme, show } => {
            let mut config = config;
            let changed = set_endpoint.is_some() || set_timeout.is_some() || set_theme.is_some();

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
            }
            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
            }
            if let Some(theme) = set_theme {
                config.theme = theme;
            }

            if changed {
                config.save()?;
                println!("✔ Saved: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("Config:");
                println!("  endpoint: {}", config.endpoint());
                println!("  timeout: {}s", config.timeout_seconds);
                println!("  theme: {}", config.theme);
            }
        }
    }

    Ok(())
}

async fn run<P: Presenter>(
    state: &mut UiState<PathBuf>,
    predictor: &HttpPredictor,
    presenter: &mut P,
    paths: &[PathBuf],
) -> Result<Vec<report::SessionReport>> {
    runner::run_batch(state, predictor, presenter, paths, || async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    })
    .await
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
