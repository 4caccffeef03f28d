use clap::Parser;

use crate::search_query::SearchFilters;

#[derive(Parser, Debug)]
#[command(
    name = "github_user_search",
    version,
    about = "Search GitHub users by username, location and repository count"
)]
/// Command-line arguments accepted by the `github_user_search` binary.
pub struct CliArgs {
    #[arg(short, long, value_name = "LOGIN", help = "Match against user logins")]
    pub username: Option<String>,
    #[arg(short, long, value_name = "PLACE", help = "Filter by profile location")]
    pub location: Option<String>,
    #[arg(
        short = 'r',
        long = "min-repos",
        value_name = "COUNT",
        help = "Minimum number of public repositories (ranges like 5..20 also accepted)"
    )]
    pub min_repos: Option<String>,
    #[arg(
        long = "api-url",
        value_name = "URL",
        help = "Override the GitHub API base URL (default: GITHUB_API_URL or https://api.github.com)"
    )]
    pub api_url: Option<String>,
    #[arg(long = "user-agent", value_name = "UA", help = "Override the User-Agent header")]
    pub user_agent: Option<String>,
    #[arg(
        long = "log-level",
        value_name = "FILTER",
        env = "RUST_LOG",
        help = "Tracing filter directive (default: warn,github_user_search=info)"
    )]
    pub log_level: Option<String>,
    #[arg(
        long = "no-interactive",
        help = "Run the initial search, print the first page and exit"
    )]
    pub no_interactive: bool,
}

impl CliArgs {
    pub fn filters(&self) -> SearchFilters {
        SearchFilters::new()
            .username(self.username.as_deref().unwrap_or_default())
            .location(self.location.as_deref().unwrap_or_default())
            .min_repos(self.min_repos.as_deref().unwrap_or_default())
    }
}

/// One line typed at the interactive prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    More,
    Search,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "m" | "more" => Some(Self::More),
            "s" | "search" => Some(Self::Search),
            "h" | "help" | "?" => Some(Self::Help),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

pub const HELP: &str = "Commands: more (m), search (s), help (h), quit (q)";

/// Interpret an answer to a field prompt: blank keeps the current value,
/// `-` clears it, anything else replaces it.
pub fn edited_value<'a>(current: &'a str, answer: &'a str) -> &'a str {
    match answer.trim() {
        "" => current,
        "-" => "",
        value => value,
    }
}
