use crate::cli::commands::{Cli, Commands, DiscordCommandAction};
use crate::config::Config;
use crate::diagnostics::doctor;
use crate::links::{CallOptions, ConversionPipeline, ServiceClassifier, detect_music_url};
use crate::runtime::observability::{Observer, ObserverEvent, create_observer_handle};
use crate::transport::channels::discord::{self, clear_commands, list_commands, register_commands};
use anyhow::{Result, bail};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::render::{render_commands, render_outcome};

pub async fn dispatch(cli: Cli, mut config: Config) -> Result<()> {
    let handle = create_observer_handle(&config.observability);
    let observer = handle.observer();
    observer.record_event(&ObserverEvent::ProcessStarted);

    let result = match cli.command {
        Commands::Convert {
            text,
            enable_youtube,
            json,
            timeout,
        } => {
            record_command(&observer, "convert");
            if enable_youtube {
                config.discord.enable_youtube = true;
            }
            run_convert(&config, Arc::clone(&observer), &text.join(" "), json, timeout).await
        }
        Commands::Classify {
            url,
            enable_youtube,
        } => {
            record_command(&observer, "classify");
            run_classify(&url, enable_youtube || config.discord.enable_youtube)
        }
        Commands::Commands { action } => {
            record_command(&observer, "commands");
            run_commands(&config, action).await
        }
        Commands::Doctor => {
            record_command(&observer, "doctor");
            if doctor::run(&config).await {
                Ok(())
            } else {
                bail!("doctor found problems")
            }
        }
    };

    handle.shutdown().await;
    result
}

fn record_command(observer: &Arc<dyn Observer>, command: &str) {
    observer.record_event(&ObserverEvent::CommandInvoked {
        command: command.to_string(),
    });
}

/// Cancelled when the process receives Ctrl-C.
fn interrupt_token() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, cancelling in-flight requests");
            child.cancel();
        }
    });
    token
}

async fn run_convert(
    config: &Config,
    observer: Arc<dyn Observer>,
    text: &str,
    json: bool,
    timeout: Option<u64>,
) -> Result<()> {
    let pipeline = ConversionPipeline::from_config(config, observer);
    let mut options = CallOptions::default().cancelled_by(interrupt_token());
    if let Some(secs) = timeout.filter(|s| *s > 0) {
        options.timeout = Some(Duration::from_secs(secs));
    }

    match pipeline.run(text, &options).await {
        Ok(outcome) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                for line in render_outcome(&outcome) {
                    println!("{line}");
                }
            }
            Ok(())
        }
        Err(failure) => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "error": failure.to_string()
                    }))?
                );
            }
            Err(failure.into())
        }
    }
}

fn run_classify(url: &str, enable_youtube: bool) -> Result<()> {
    let classifier = ServiceClassifier::with_generic_video_hosts(enable_youtube);
    match detect_music_url(url, &classifier) {
        Some((normalized, service)) => {
            println!("{service}\t{normalized}");
            Ok(())
        }
        None => {
            let table = classifier.table();
            let accepted: Vec<&str> = table
                .services()
                .flat_map(|service| table.hosts_for(service, enable_youtube))
                .collect();
            bail!(
                "unsupported link: {url} (accepted hosts: {})",
                accepted.join(", ")
            )
        }
    }
}

async fn run_commands(config: &Config, action: DiscordCommandAction) -> Result<()> {
    let (http, client_id) = discord::client_from_config(&config.discord)?;
    match action {
        DiscordCommandAction::Register => {
            let registered = register_commands(&http, &client_id).await?;
            println!("Registered {} command(s):", registered.len());
            for line in render_commands(&registered) {
                println!("  {line}");
            }
        }
        DiscordCommandAction::List => {
            for line in render_commands(&list_commands(&http, &client_id).await?) {
                println!("{line}");
            }
        }
        DiscordCommandAction::Clear => {
            clear_commands(&http, &client_id).await?;
            println!("Cleared all commands.");
        }
    }
    Ok(())
}
