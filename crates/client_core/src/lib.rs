use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{GenreSalesSummary, RecentSale, TotalGenreCount, UnsoldGenre},
    error::BackendErrorBody,
    protocol::Endpoint,
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

pub mod error;
pub mod session;

pub use error::{AuthError, DashboardError, FetchCause, FetchError};
pub use session::{Credential, SessionClient, SessionToken};

const STATE_CHANNEL_CAPACITY: usize = 16;

/// Everything the dashboard renders, fetched in one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DashboardData {
    #[serde(flatten)]
    pub total_genres: TotalGenreCount,
    pub recent_sale: Option<RecentSale>,
    pub genre_summaries: Vec<GenreSalesSummary>,
    pub unsold_genres: Vec<UnsoldGenre>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardViewState {
    Loading,
    Ready(DashboardData),
    Failed { reason: String },
}

impl DashboardViewState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DashboardViewState::Loading)
    }
}

/// The login endpoint plus the four data endpoints.
#[async_trait]
pub trait DashboardBackend: Send + Sync {
    async fn login(&self, credential: &Credential) -> Result<SessionToken, AuthError>;
    async fn total_genre(&self) -> Result<TotalGenreCount, FetchError>;
    async fn recent_sale(&self) -> Result<Option<RecentSale>, FetchError>;
    async fn genre_sale_summary(
        &self,
        token: SessionToken,
    ) -> Result<Vec<GenreSalesSummary>, FetchError>;
    async fn not_sold(&self) -> Result<Vec<UnsoldGenre>, FetchError>;
}

pub struct HttpBackend {
    http: Client,
    base_url: String,
    session: SessionClient,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            session: SessionClient::new(http.clone(), base_url.clone()),
            http,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        bearer: Option<String>,
    ) -> Result<T, FetchError> {
        let mut request = self
            .http
            .get(format!("{}{}", self.base_url, endpoint.path()));
        if let Some(header) = bearer {
            request = request.header(AUTHORIZATION, header);
        }

        let res = request
            .send()
            .await
            .map_err(|err| FetchError::new(endpoint, FetchCause::Transport(err.to_string())))?;
        let status = res.status();
        let raw = res
            .text()
            .await
            .map_err(|err| FetchError::new(endpoint, FetchCause::Transport(err.to_string())))?;
        debug!(%endpoint, %status, bytes = raw.len(), "fetched endpoint");

        if !status.is_success() {
            let detail = BackendErrorBody::parse(&raw).map(|body| body.message());
            return Err(FetchError::new(endpoint, FetchCause::Status { status, detail }));
        }

        serde_json::from_str(&raw)
            .map_err(|err| FetchError::new(endpoint, FetchCause::Decode(err.to_string())))
    }
}

#[async_trait]
impl DashboardBackend for HttpBackend {
    async fn login(&self, credential: &Credential) -> Result<SessionToken, AuthError> {
        self.session.login(credential).await
    }

    async fn total_genre(&self) -> Result<TotalGenreCount, FetchError> {
        self.fetch_json(Endpoint::TotalGenre, None).await
    }

    async fn recent_sale(&self) -> Result<Option<RecentSale>, FetchError> {
        self.fetch_json(Endpoint::RecentSale, None).await
    }

    async fn genre_sale_summary(
        &self,
        token: SessionToken,
    ) -> Result<Vec<GenreSalesSummary>, FetchError> {
        self.fetch_json(Endpoint::GenreSaleSummary, Some(token.into_bearer_header()))
            .await
    }

    async fn not_sold(&self) -> Result<Vec<UnsoldGenre>, FetchError> {
        self.fetch_json(Endpoint::NotSold, None).await
    }
}

/// Runs login followed by the four data fetches and publishes each view
/// state transition to subscribers.
pub struct Dashboard<B: DashboardBackend> {
    backend: B,
    states: broadcast::Sender<DashboardViewState>,
}

impl<B: DashboardBackend> Dashboard<B> {
    pub fn new(backend: B) -> Self {
        let (states, _) = broadcast::channel(STATE_CHANNEL_CAPACITY);
        Self { backend, states }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn subscribe_states(&self) -> broadcast::Receiver<DashboardViewState> {
        self.states.subscribe()
    }

    /// Publishes `Loading`, then exactly one of `Ready` or `Failed`, and
    /// returns the terminal state. Never panics on backend failure.
    pub async fn load_dashboard(&self, credential: Credential) -> DashboardViewState {
        let _ = self.states.send(DashboardViewState::Loading);

        let state = match self.fetch_all(credential).await {
            Ok(data) => {
                info!(
                    total_genres = data.total_genres.total_genre_sold,
                    summaries = data.genre_summaries.len(),
                    unsold = data.unsold_genres.len(),
                    "dashboard ready"
                );
                DashboardViewState::Ready(data)
            }
            Err(err) => {
                match &err {
                    DashboardError::Auth(source) => warn!(error = ?source, "dashboard login failed"),
                    DashboardError::Fetch(source) => warn!(
                        endpoint = %source.endpoint,
                        error = ?source.cause,
                        "dashboard fetch failed"
                    ),
                }
                DashboardViewState::Failed {
                    reason: err.to_string(),
                }
            }
        };

        let _ = self.states.send(state.clone());
        state
    }

    /// All four fetches must succeed. The first error to resolve wins and
    /// the remaining in-flight fetches are dropped.
    pub async fn fetch_all(&self, credential: Credential) -> Result<DashboardData, DashboardError> {
        let token = self.backend.login(&credential).await?;
        drop(credential);

        let (total_genres, recent_sale, genre_summaries, unsold_genres) = tokio::try_join!(
            self.backend.total_genre(),
            self.backend.recent_sale(),
            self.backend.genre_sale_summary(token),
            self.backend.not_sold(),
        )?;

        Ok(DashboardData {
            total_genres,
            recent_sale,
            genre_summaries,
            unsold_genres,
        })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
