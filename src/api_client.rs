use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

use crate::errors::FetchError;
use crate::models::SearchResponse;
use crate::search_query::RequestDescriptor;

/// Performs one user-search call. Injected into the session controller so
/// tests can substitute canned responses.
#[async_trait]
pub trait UserFetcher: Send + Sync {
    async fn fetch(&self, request: &RequestDescriptor) -> Result<SearchResponse, FetchError>;
}

/// `UserFetcher` backed by the GitHub REST API over reqwest.
pub struct GithubClient {
    client: Client,
}

impl GithubClient {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|_| FetchError::Other(format!("invalid user agent: {user_agent}")))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UserFetcher for GithubClient {
    async fn fetch(&self, request: &RequestDescriptor) -> Result<SearchResponse, FetchError> {
        tracing::debug!(
            endpoint = %request.endpoint,
            q = %request.query,
            page = request.page,
            "searching users"
        );

        let response = self
            .client
            .request(request.method.clone(), &request.endpoint)
            .query(&request.query_pairs())
            .send()
            .await?;

        let status_code = response.status();
        let raw_body = response.text().await?;

        if status_code.eq(&422) {
            return Err(FetchError::InvalidQuery(raw_body));
        } else if status_code.eq(&403) {
            return Err(FetchError::Forbidden(raw_body));
        } else if status_code.is_client_error() {
            return Err(FetchError::Client { status: status_code, body: raw_body });
        } else if status_code.is_server_error() {
            return Err(FetchError::Server { status: status_code, body: raw_body });
        } else if !status_code.is_success() {
            return Err(FetchError::Other(format!("unexpected status {status_code}")));
        }

        let result: SearchResponse = serde_json::from_str(&raw_body)?;
        tracing::debug!(
            total_count = result.total_count,
            returned = result.items.len(),
            "search page received"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search_query::{SearchFilters, SearchRequest};
    use mockito::{Matcher, Server};

    const PAGE_BODY: &str = r#"{
        "total_count": 45,
        "incomplete_results": false,
        "items": [
            {"id": 1, "login": "ada", "avatar_url": "https://avatars/1", "html_url": "https://github.com/ada"}
        ]
    }"#;

    fn descriptor(base: &str, page: u32) -> RequestDescriptor {
        SearchRequest::new(SearchFilters::new().username("ada").location("London"), page)
            .to_descriptor(base)
    }

    #[tokio::test]
    async fn sends_query_and_pagination_parameters() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/search/users")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "ada in:login location:London".into()),
                Matcher::UrlEncoded("page".into(), "2".into()),
                Matcher::UrlEncoded("per_page".into(), "20".into()),
            ]))
            .match_header("user-agent", "test-agent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(PAGE_BODY)
            .create_async()
            .await;

        let client = GithubClient::new("test-agent").unwrap();
        let page = client.fetch(&descriptor(&server.url(), 2)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.total_count, 45);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].login, "ada");
    }

    #[tokio::test]
    async fn maps_unprocessable_entity_to_invalid_query() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/search/users")
            .match_query(Matcher::Any)
            .with_status(422)
            .with_body(r#"{"message": "Validation Failed"}"#)
            .create_async()
            .await;

        let client = GithubClient::new("test-agent").unwrap();
        let err = client.fetch(&descriptor(&server.url(), 1)).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidQuery(body) if body.contains("Validation Failed")));
    }

    #[tokio::test]
    async fn maps_forbidden_and_server_errors() {
        let mut server = Server::new_async().await;
        let _forbidden = server
            .mock("GET", "/search/users")
            .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
            .with_status(403)
            .with_body("rate limited")
            .create_async()
            .await;
        let _broken = server
            .mock("GET", "/search/users")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let client = GithubClient::new("test-agent").unwrap();
        let forbidden = client.fetch(&descriptor(&server.url(), 1)).await.unwrap_err();
        assert!(matches!(forbidden, FetchError::Forbidden(_)));

        let broken = client.fetch(&descriptor(&server.url(), 2)).await.unwrap_err();
        assert!(matches!(broken, FetchError::Server { status, .. } if status.as_u16() == 502));
    }

    #[tokio::test]
    async fn unexpected_body_is_a_shape_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/search/users")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"users": []}"#)
            .create_async()
            .await;

        let client = GithubClient::new("test-agent").unwrap();
        let err = client.fetch(&descriptor(&server.url(), 1)).await.unwrap_err();
        assert!(matches!(err, FetchError::Shape(_)));
    }

    #[test]
    fn rejects_user_agent_with_control_characters() {
        assert!(GithubClient::new("bad\nagent").is_err());
    }
}
