use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: u64,                       // Unique GitHub account id
    pub login: String,                 // e.g., "octocat"
    pub avatar_url: String,            // Link to avatar image
    pub html_url: String,              // Link to profile
    #[serde(default)]
    pub location: Option<String>,      // Not returned by every search result
    #[serde(default)]
    pub public_repos: Option<u32>,     // Only present on full user payloads
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResponse {
    pub total_count: u32,              // Total number of matching users
    #[serde(default)]
    pub incomplete_results: bool,      // If the search timed out on GitHub's side
    pub items: Vec<UserSummary>,       // One page of users
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_search_page_with_optional_fields() {
        let body = r#"{
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                {"id": 1, "login": "ada", "avatar_url": "https://a/1", "html_url": "https://github.com/ada",
                 "location": "London", "public_repos": 12, "score": 1.0},
                {"id": 2, "login": "adam", "avatar_url": "https://a/2", "html_url": "https://github.com/adam"}
            ]
        }"#;

        let page: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.items[0].location.as_deref(), Some("London"));
        assert_eq!(page.items[0].public_repos, Some(12));
        assert_eq!(page.items[1].location, None);
        assert_eq!(page.items[1].public_repos, None);
    }

    #[test]
    fn null_location_is_absent() {
        let body = r#"{"id": 3, "login": "x", "avatar_url": "a", "html_url": "h", "location": null}"#;
        let user: UserSummary = serde_json::from_str(body).unwrap();
        assert_eq!(user.location, None);
    }

    #[test]
    fn rejects_payload_without_items() {
        let body = r#"{"message": "API rate limit exceeded"}"#;
        assert!(serde_json::from_str::<SearchResponse>(body).is_err());
    }
}
