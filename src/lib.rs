pub mod api_client;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod render;
pub mod search_query;
pub mod session;

pub use api_client::{GithubClient, UserFetcher};
pub use config::AppConfig;
pub use search_query::{FilterField, PER_PAGE, RequestDescriptor, SearchFilters, SearchRequest};
pub use session::{SearchController, SearchSession, SessionState};
