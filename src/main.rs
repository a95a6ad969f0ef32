use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use afg::config::Config;
use afg::error::{AppError, AppResult};
use afg::history::{MemoryHistory, Navigator};
use afg::load::{BODY_LOAD, LoadNotifier, MAP};
use afg::query::QueryCodec;
use afg::search::{HttpTransport, SearchPage, SearchSession};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "afg", version, about = "Volunteer opportunity search client")]
struct Cli {
    /// Config file; defaults to $AFG_CONFIG_PATH or ~/.config/afg/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Print the canonical form of a search fragment.
    Canonicalize { fragment: String },
    /// Print the parsed query as JSON.
    Inspect { fragment: String },
    /// Run one search against the configured backend and print the body.
    Search {
        fragment: String,
        #[arg(long)]
        my_events: bool,
        #[arg(long)]
        referrer: Option<String>,
    },
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    afg::logging::init(&config.log);

    let codec = QueryCodec::new(config.search.page_size)
        .with_default_location(config.search.default_location.as_str());

    match cli.command {
        CliCommand::Canonicalize { fragment } => {
            println!("{}", codec.canonicalize(&fragment));
            Ok(())
        }
        CliCommand::Inspect { fragment } => {
            let query = codec.deserialize(&fragment);
            let json = serde_json::to_string_pretty(&query)
                .map_err(|err| AppError::unsupported(format!("cannot encode query: {err}")))?;
            println!("{json}");
            Ok(())
        }
        CliCommand::Search {
            fragment,
            my_events,
            referrer,
        } => search(&config, &fragment, my_events, referrer).await,
    }
}

async fn search(
    config: &Config,
    fragment: &str,
    my_events: bool,
    referrer: Option<String>,
) -> AppResult<()> {
    let notifier = Rc::new(LoadNotifier::new([BODY_LOAD, MAP]));
    let page = if my_events {
        SearchPage::MyEvents
    } else {
        SearchPage::Search
    };

    let mut session = SearchSession::new(
        config,
        MemoryHistory::new(fragment),
        Arc::new(HttpTransport::new()),
        Rc::clone(&notifier),
    )
    .with_page(page);
    if let Some(referrer) = referrer {
        session = session.with_referrer(referrer);
    }

    let session = Rc::new(RefCell::new(session));
    let starter = Rc::clone(&session);
    notifier.add_callback(BODY_LOAD, move || {
        starter.borrow_mut().on_navigate();
    });
    notifier.done_loading(BODY_LOAD);

    let mut session = Rc::try_unwrap(session)
        .map_err(|_| AppError::unsupported("search session is still shared"))?
        .into_inner();
    session.wait().await?;

    tracing::info!(fragment = %session.navigator().fragment(), "search settled");
    if let Some(message) = session.state().last_error() {
        return Err(AppError::transport(message));
    }
    println!("{}", session.state().last_body().unwrap_or_default());
    Ok(())
}
