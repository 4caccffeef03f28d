use reqwest::Method;

/// Number of users requested per page.
pub const PER_PAGE: u32 = 20;

/// One of the three editable search inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Username,
    Location,
    MinRepos,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub username: String,
    pub location: String,
    pub min_repos: String,
}

impl SearchFilters {
    // Initialize a new set of filters with nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    // Add a username filter, matched against logins only
    pub fn username(mut self, username: &str) -> Self {
        self.username = username.to_owned();
        self
    }

    // Add a location filter
    pub fn location(mut self, location: &str) -> Self {
        self.location = location.to_owned();
        self
    }

    // Add a minimum repository count filter
    pub fn min_repos(mut self, repos: &str) -> Self {
        self.min_repos = repos.to_owned();
        self
    }

    /// Returns a copy with one field replaced, leaving `self` untouched.
    pub fn with_field(&self, field: FilterField, value: &str) -> Self {
        let next = self.clone();
        match field {
            FilterField::Username => next.username(value),
            FilterField::Location => next.location(value),
            FilterField::MinRepos => next.min_repos(value),
        }
    }

    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Username => &self.username,
            FilterField::Location => &self.location,
            FilterField::MinRepos => &self.min_repos,
        }
    }

    pub fn is_empty(&self) -> bool {
        present(&self.username).is_none()
            && present(&self.location).is_none()
            && present(&self.min_repos).is_none()
    }

    /// Convert the filters to a GitHub user-search query string.
    ///
    /// Qualifiers are separated by a single space. Empty filters yield an
    /// empty string, which is sent to the API unchanged.
    pub fn to_query_string(&self) -> String {
        let mut qualifiers = Vec::with_capacity(3);
        if let Some(username) = present(&self.username) {
            qualifiers.push(format!("{} in:login", quoted(username)));
        }
        if let Some(location) = present(&self.location) {
            qualifiers.push(format!("location:{}", quoted(location)));
        }
        if let Some(repos) = present(&self.min_repos) {
            qualifiers.push(format!("repos:{}", at_least(repos)));
        }
        qualifiers.join(" ")
    }
}

fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

// Multi-word values must be quoted or GitHub splits them into separate terms.
fn quoted(value: &str) -> String {
    if value.chars().any(char::is_whitespace) {
        format!("\"{}\"", value.replace('"', ""))
    } else {
        value.to_owned()
    }
}

// A bare count means "exactly" to GitHub; ranges and operators pass through.
fn at_least(repos: &str) -> String {
    if repos.chars().all(|c| c.is_ascii_digit()) {
        format!(">={}", repos)
    } else {
        repos.to_owned()
    }
}

/// Filters paired with the page to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub filters: SearchFilters,
    pub page: u32,
}

impl SearchRequest {
    /// Pages are 1-based; 0 is clamped to the first page.
    pub fn new(filters: SearchFilters, page: u32) -> Self {
        Self {
            filters,
            page: page.max(1),
        }
    }

    pub fn to_descriptor(&self, base_url: &str) -> RequestDescriptor {
        RequestDescriptor {
            method: Method::GET,
            endpoint: format!("{}/search/users", base_url.trim_end_matches('/')),
            query: self.filters.to_query_string(),
            page: self.page,
            per_page: PER_PAGE,
        }
    }
}

/// Everything needed to issue one user-search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub endpoint: String,
    pub query: String,
    pub page: u32,
    pub per_page: u32,
}

impl RequestDescriptor {
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("q", self.query.clone()),
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}
