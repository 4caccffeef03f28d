use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use github_user_search::cli::{CliArgs, Command, HELP, edited_value};
use github_user_search::render::render_session;
use github_user_search::{AppConfig, FilterField, GithubClient, SearchController, SearchFilters, SearchSession};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main] // Marks the main function as asynchronous
async fn main() {
    if let Err(err) = run().await {
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenv::dotenv().ok();
    let args = CliArgs::parse();
    init_tracing(args.log_level.as_deref());

    let config = AppConfig::from_env()?
        .with_overrides(args.api_url.clone(), args.user_agent.clone())?;
    let client = GithubClient::new(config.user_agent()).context("failed to build HTTP client")?;
    tracing::info!(api_url = config.api_url(), "searching GitHub users");

    let mut controller = SearchController::new(client, config.api_url()).with_observer(show);

    let filters = args.filters();
    if !filters.is_empty() || args.no_interactive {
        controller.submit_search(filters).await;
    }
    if args.no_interactive {
        return Ok(());
    }

    println!("{HELP}");
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = prompt(&mut input, "> ").await? {
        match Command::parse(&line) {
            Some(Command::More) => {
                if !controller.load_more().await {
                    println!("No more users to load.");
                }
            }
            Some(Command::Search) => {
                let current = controller.session().filters().clone();
                let Some(filters) = edit_filters(&mut input, current).await? else {
                    break;
                };
                controller.submit_search(filters).await;
            }
            Some(Command::Help) => println!("{HELP}"),
            Some(Command::Quit) => break,
            None => println!("Unknown command. {HELP}"),
        }
    }

    Ok(())
}

fn show(session: &SearchSession) {
    if session.is_loading() {
        println!("Loading...");
    } else {
        print!("{}", render_session(session));
    }
}

async fn prompt(input: &mut Input, label: &str) -> Result<Option<String>> {
    print!("{label}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}

// Returns `None` when stdin closes mid-edit.
async fn edit_filters(input: &mut Input, mut filters: SearchFilters) -> Result<Option<SearchFilters>> {
    for (field, label) in [
        (FilterField::Username, "Username"),
        (FilterField::Location, "Location"),
        (FilterField::MinRepos, "Min repos"),
    ] {
        let label = format!("{label} [{}] (- to clear): ", filters.get(field));
        let Some(answer) = prompt(input, &label).await? else {
            return Ok(None);
        };
        filters = filters.with_field(field, edited_value(filters.get(field), &answer));
    }
    Ok(Some(filters))
}

fn init_tracing(filter: Option<&str>) {
    let env_filter = filter
        .map(str::to_string)
        .unwrap_or_else(|| "warn,github_user_search=info".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}
