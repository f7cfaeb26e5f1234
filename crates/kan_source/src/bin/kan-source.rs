use clap::{Parser, Subcommand};
use kan_media::SourceId;
use kan_source::{tracing::init_tracing_subscriber, HttpFetcher, KanAdapter};

#[derive(Parser)]
#[command(name = "kan-source", about = "KAN broadcaster content adapter")]
struct Cli {
    /// Maximum listing pages to walk per call
    #[arg(long, env = "KAN_MAX_PAGES", default_value = "5")]
    max_pages: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the static top-level directory
    Discover,
    /// List shows from the kan-box lobby
    Shows,
    /// List podcast programs
    Podcasts,
    /// List the episodes of a show or podcast id (show_<id>, pod_<id>)
    Episodes { id: String },
    /// Resolve an episode id to playable media (episode_<id>, podep_<id>)
    Resolve { id: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let adapter = KanAdapter::new(HttpFetcher::new()).with_max_pages(cli.max_pages);

    match cli.command {
        Command::Discover => print_json(&adapter.discover())?,
        Command::Shows => print_json(&adapter.explore(&SourceId::ShowsRoot).await)?,
        Command::Podcasts => print_json(&adapter.explore(&SourceId::PodcastsRoot).await)?,
        Command::Episodes { id } => match parse_id(&id) {
            Some(id) => print_json(&adapter.explore(&id).await)?,
            None => print_json(&serde_json::json!([]))?,
        },
        Command::Resolve { id } => {
            let media = match parse_id(&id) {
                Some(id) => adapter.get_item(&id).await,
                None => None,
            };
            match media {
                Some(media) => print_json(&media)?,
                None => print_json(&serde_json::Value::Null)?,
            }
        }
    }

    Ok(())
}

/// Parse a wire-form id; unrecognized input degrades to `None`, the
/// same way the adapter treats unknown item kinds.
fn parse_id(raw: &str) -> Option<SourceId> {
    match raw.parse() {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!(error = %e, raw, "Unrecognized id");
            None
        }
    }
}


fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
