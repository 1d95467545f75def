use anyhow::{anyhow, bail, Result};
use clap::Parser;
use serde::Serialize;
use threadsift::{
    BoundaryConfig, CategoryScope, KeywordInput, MemoryStore, QueryBoundary, QueryEngine,
    RankWindow, Route, TimeInput, UserId,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("threadsift=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Topics {
            dataset,
            keywords,
            window,
            fuzzy,
            uid,
        } => {
            let store = MemoryStore::load(&dataset)?;
            let engine = QueryEngine::over(&store);
            let topics = engine.search_topics(
                UserId(uid),
                KeywordInput::Text(keywords.join(" ")),
                RankWindow::new(window.start, window.stop),
                fuzzy,
            )?;
            info!(found = topics.len(), "topic search done");
            print_json(&serde_json::json!({ "topics": topics }))
        }
        Commands::Posts {
            dataset,
            keywords,
            window,
            fuzzy,
            uid,
        } => {
            let store = MemoryStore::load(&dataset)?;
            let engine = QueryEngine::over(&store);
            let posts = engine.search_posts(
                UserId(uid),
                KeywordInput::Text(keywords.join(" ")),
                RankWindow::new(window.start, window.stop),
                fuzzy,
            )?;
            info!(found = posts.len(), "post search done");
            print_json(&serde_json::json!({ "posts": posts }))
        }
        Commands::Range {
            dataset,
            from,
            to,
            window,
            cid,
            uid,
        } => {
            let store = MemoryStore::load(&dataset)?;
            let engine = QueryEngine::over(&store);
            let page = engine.search_time_range(
                UserId(uid),
                TimeInput::Text(from),
                TimeInput::Text(to),
                window.start,
                window.stop,
                CategoryScope::from_raw(cid),
            )?;
            info!(found = page.posts.len(), next_start = page.next_start, "range search done");
            print_json(&page)
        }
        Commands::ServeRequest {
            dataset,
            route,
            query,
            config,
            uid,
        } => {
            let route: Route = route.parse().map_err(|e: String| anyhow!(e))?;
            let config = match config {
                Some(path) => BoundaryConfig::load(path)?,
                None => BoundaryConfig::default(),
            };
            let store = MemoryStore::load(&dataset)?;
            let boundary = QueryBoundary::new(QueryEngine::over(&store), config);

            let response = boundary.handle(route, &query, UserId(uid));
            print_json(&response.body)?;
            if response.status != 200 {
                bail!("request failed with status {} ({})", response.status, response.code());
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
