use std::env::{self, current_dir};

use axum::Router;
use color_eyre::Section;
use liblexicon::{
    config::{INPUT_FILES, OUTPUT_DIR, STYLESHEET},
    pipeline::{build_once, load_dictionary},
    search::{SearchOutcome, search},
};
use notify::{EventKind, RecursiveMode, Watcher};
use tower_http::services::ServeDir;
use tower_livereload::LiveReloadLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("serve") => serve().await?,
        Some("search") => print_search(&args[1..].join(" "))?,
        Some("build") | None => build_once()?,
        Some(other) => {
            warn!(command = other, "unknown command, building");
            build_once()?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lexicon=info,liblexicon=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_search(query: &str) -> color_eyre::Result<()> {
    let root = current_dir().with_note(|| "While getting the current working directory")?;
    let dict = load_dictionary(&root)?;

    match search(query, dict.index()) {
        SearchOutcome::Inactive => println!("no search active"),
        SearchOutcome::Results(results) if results.is_empty() => println!("no matches"),
        SearchOutcome::Results(results) => {
            for r in results {
                println!("{} — {}", r.term, r.chapter);
            }
        }
    }
    Ok(())
}

async fn serve() -> color_eyre::Result<()> {
    info!("building site");
    build_once()?;

    let current_dir = current_dir().with_note(|| "While getting the current working directory")?;
    let public_dir = current_dir.join(OUTPUT_DIR);

    let livereload = LiveReloadLayer::new();
    let reloader = livereload.reloader();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        match res {
            Ok(event) => {
                // Access events fire on our own reads and would loop.
                if matches!(event.kind, EventKind::Access(_)) {
                    return;
                }

                info!("change detected, rebuilding");
                // Keep serving the last good build on failure.
                if let Err(e) = build_once() {
                    error!("build failed: {e}");
                } else {
                    info!("rebuild complete");
                    reloader.reload();
                }
            }
            Err(e) => error!("watch error: {e}"),
        }
    })?;

    let watched = INPUT_FILES
        .iter()
        .copied()
        .chain(["header.html", "footer.html", STYLESHEET])
        .map(|name| current_dir.join(name))
        .filter(|p| p.exists());
    for path in watched {
        watcher.watch(&path, RecursiveMode::NonRecursive)?;
    }

    let app = Router::new()
        .fallback_service(ServeDir::new(public_dir))
        .layer(livereload);

    info!("serving on http://localhost:3000");
    let listener = tokio::net::TcpListener::bind(ADDR).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
