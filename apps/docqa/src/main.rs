mod intent;
mod render;

use std::{future::Future, io::Write, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{load_file_ref, load_settings, SessionController, SessionEvent, SessionSnapshot};
use shared::domain::{is_supported_document, FileRef};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::intent::{parse_line, Intent, HELP};

#[derive(Parser, Debug)]
#[command(about = "Ask questions about your PDFs and scanned images")]
struct Args {
    /// Base URL of the ingestion service; overrides docqa.toml and env.
    #[arg(long)]
    server_url: Option<String>,
    /// Files to queue before the prompt opens.
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    info!(server_url = %settings.server_url, "docqa: starting session");

    let controller = SessionController::from_settings(&settings)
        .context("failed to set up the ingestion client")?;
    let mut events = controller.subscribe_events();

    if !args.files.is_empty() {
        with_live_events(add_paths(&controller, &args.files), &mut events).await;
    }
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let snapshot = controller.snapshot().await;
        print!("{}", render::prompt(&snapshot));
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let intent = match parse_line(&line, snapshot.phase) {
            Ok(Some(intent)) => intent,
            Ok(None) => continue,
            Err(usage) => {
                println!("{usage}");
                continue;
            }
        };

        if intent == Intent::Quit {
            break;
        }
        with_live_events(dispatch(&controller, intent, &snapshot), &mut events).await;
    }

    Ok(())
}

async fn dispatch(
    controller: &Arc<SessionController>,
    intent: Intent,
    snapshot: &SessionSnapshot,
) {
    match intent {
        Intent::AddFiles(paths) => add_paths(controller, &paths).await,
        Intent::RemoveFile(index) => match controller.remove_file(index).await {
            Ok(snapshot) => println!("{}", render::file_list(&snapshot)),
            Err(err) => println!("{}", render::contract_error(&err)),
        },
        Intent::ListFiles => println!("{}", render::file_list(snapshot)),
        Intent::Upload => match controller.submit_upload().await {
            Ok(outcome) if outcome.is_ready() => println!("Documents are ready. Ask away."),
            // The failure itself arrives as an UploadFailed event.
            Ok(_) => {}
            Err(err) => println!("{}", render::contract_error(&err)),
        },
        Intent::Ask(question) => {
            if let Err(err) = controller.ask(&question).await {
                println!("{}", render::contract_error(&err));
            }
        }
        Intent::Help => println!("{HELP}"),
        Intent::Quit => {}
    }
}

async fn add_paths(controller: &Arc<SessionController>, paths: &[PathBuf]) {
    let mut loaded: Vec<FileRef> = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        if !is_supported_document(name) {
            warn!(path = %path.display(), "docqa: skipping unsupported file type");
            println!(
                "skipped {}: only .pdf, .jpg, .jpeg and .png are supported",
                path.display()
            );
            continue;
        }
        match load_file_ref(path).await {
            Ok(file) => loaded.push(file),
            Err(err) => println!("{err:#}"),
        }
    }

    match controller.add_files(loaded).await {
        Ok(snapshot) => println!("{}", render::file_list(&snapshot)),
        Err(err) => println!("{}", render::contract_error(&err)),
    }
}

/// Drives `action` to completion while printing session events as they
/// arrive, so busy labels show up while a request is outstanding.
async fn with_live_events<F: Future<Output = ()>>(
    action: F,
    events: &mut broadcast::Receiver<SessionEvent>,
) {
    tokio::pin!(action);
    loop {
        tokio::select! {
            () = &mut action => break,
            received = events.recv() => match received {
                Ok(event) => print_event(&event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "docqa: dropped session events");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    action.as_mut().await;
                    break;
                }
            },
        }
    }
    drain_events(events);
}

fn drain_events(events: &mut broadcast::Receiver<SessionEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => print_event(&event),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "docqa: dropped session events");
            }
            Err(_) => break,
        }
    }
}

fn print_event(event: &SessionEvent) {
    if let Some(line) = render::event_line(event) {
        println!("{line}");
    }
}
