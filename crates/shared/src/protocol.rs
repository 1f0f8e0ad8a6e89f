use std::fmt;

use serde::{Deserialize, Serialize};

/// Response of `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Form body of `POST /login`.
#[derive(Debug, Serialize)]
pub struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

pub const LOGIN_PATH: &str = "/login";

/// The four data endpoints read by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    TotalGenre,
    RecentSale,
    GenreSaleSummary,
    NotSold,
}

impl Endpoint {
    pub const ALL: [Endpoint; 4] = [
        Endpoint::TotalGenre,
        Endpoint::RecentSale,
        Endpoint::GenreSaleSummary,
        Endpoint::NotSold,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::TotalGenre => "/total-genre",
            Endpoint::RecentSale => "/recent-sale",
            Endpoint::GenreSaleSummary => "/genre-sale-summary",
            Endpoint::NotSold => "/not-sold",
        }
    }

    /// Only the summary endpoint is protected by a bearer token.
    pub fn requires_auth(self) -> bool {
        matches!(self, Endpoint::GenreSaleSummary)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path().trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_summary_requires_auth() {
        let protected: Vec<_> = Endpoint::ALL
            .into_iter()
            .filter(|endpoint| endpoint.requires_auth())
            .collect();
        assert_eq!(protected, vec![Endpoint::GenreSaleSummary]);
    }

    #[test]
    fn display_is_path_without_slash() {
        assert_eq!(Endpoint::NotSold.to_string(), "not-sold");
        assert_eq!(Endpoint::TotalGenre.path(), "/total-genre");
    }
}
