use std::sync::Arc;

use crate::{
    models::SessionUser,
    presentation::client::{ClientError, MovieFactsApi},
};

pub const RESOLVE_FAILED_NOTICE: &str = "Failed to check your favorite movie.";
pub const SAVE_FAILED_NOTICE: &str = "Failed to save your favorite movie. Please try again.";
pub const FACT_FAILED_NOTICE: &str = "Failed to load movie fact. Please try refreshing the page.";

/// What the fact panel is showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactStatus {
    Loading,
    Ready(String),
    /// Holds the notice shown next to the retry action
    Failed(String),
}

/// Dashboard state for one browser session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardState {
    Unauthenticated,
    /// Signed in, favorite movie not yet known
    Resolving {
        user: SessionUser,
        notice: Option<String>,
    },
    /// Entry form shown
    NoFavorite {
        user: SessionUser,
        /// Last submitted name, resubmitted by the retry action
        draft: Option<String>,
        /// A save request is in flight
        saving: bool,
        notice: Option<String>,
    },
    /// Fact panel shown; only reachable once the server confirmed a non-empty favorite
    HasFavorite {
        user: SessionUser,
        movie: String,
        fact: FactStatus,
    },
}

impl DashboardState {
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            DashboardState::Unauthenticated => None,
            DashboardState::Resolving { user, .. }
            | DashboardState::NoFavorite { user, .. }
            | DashboardState::HasFavorite { user, .. } => Some(user),
        }
    }
}

/// Identifies one fact request; only the most recently issued ticket may update the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactTicket(u64);

/// Drives the dashboard through its states against a [`MovieFactsApi`]
pub struct Dashboard<A: MovieFactsApi + ?Sized> {
    api: Arc<A>,
    state: DashboardState,
    issued: u64,
    latest: Option<FactTicket>,
}

impl<A: MovieFactsApi + ?Sized> Dashboard<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: DashboardState::Unauthenticated,
            issued: 0,
            latest: None,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Reacts to the session provider: `None` on logout or expiry, `Some` once signed in
    pub async fn session_changed(&mut self, session: Option<SessionUser>) {
        match session {
            None => self.logout(),
            Some(user) => {
                self.latest = None;
                self.state = DashboardState::Resolving { user, notice: None };
                self.resolve().await;
            }
        }
    }

    /// Clears all form and fact state; in-flight fact responses are discarded
    pub fn logout(&mut self) {
        self.latest = None;
        self.state = DashboardState::Unauthenticated;
    }

    /// The retry action offered by every error notice
    pub async fn retry(&mut self) {
        match self.state {
            DashboardState::Resolving { .. } => self.resolve().await,
            DashboardState::HasFavorite { .. } => self.request_new_fact().await,
            DashboardState::NoFavorite {
                notice: Some(_),
                saving: false,
                ..
            } => {
                let draft = match &self.state {
                    DashboardState::NoFavorite { draft, .. } => draft.clone(),
                    _ => None,
                };
                if let Some(draft) = draft {
                    self.submit_favorite(&draft).await;
                }
            }
            DashboardState::Unauthenticated | DashboardState::NoFavorite { .. } => {}
        }
    }

    async fn resolve(&mut self) {
        let DashboardState::Resolving { user, .. } = &self.state else {
            return;
        };
        let user = user.clone();

        match self.api.get_favorite_movie(&user.id).await {
            Ok(Some(movie)) if !movie.trim().is_empty() => {
                self.enter_has_favorite(user, movie).await;
            }
            Ok(_) => {
                self.state = DashboardState::NoFavorite {
                    user,
                    draft: None,
                    saving: false,
                    notice: None,
                };
            }
            Err(e) => {
                tracing::warn!(error = %e, user_id = %user.id, "Favorite movie lookup failed");
                self.state = DashboardState::Resolving {
                    user,
                    notice: Some(RESOLVE_FAILED_NOTICE.to_string()),
                };
            }
        }
    }

    /// Submits the entry form; blank input is ignored without a request
    pub async fn submit_favorite(&mut self, movie_name: &str) {
        let Some(movie_name) = self.begin_save(movie_name) else {
            return;
        };
        let Some(user_id) = self.state.user().map(|u| u.id.clone()) else {
            return;
        };

        let result = self.api.set_favorite_movie(&user_id, &movie_name).await;
        self.finish_save(result).await;
    }

    /// Marks the form as saving and keeps the trimmed name as its draft
    ///
    /// Returns `None` for blank input, while another save is pending, or
    /// outside the entry form.
    pub fn begin_save(&mut self, movie_name: &str) -> Option<String> {
        let DashboardState::NoFavorite {
            draft,
            saving,
            notice,
            ..
        } = &mut self.state
        else {
            return None;
        };
        let movie_name = movie_name.trim();
        if movie_name.is_empty() || *saving {
            return None;
        }

        *draft = Some(movie_name.to_string());
        *saving = true;
        *notice = None;
        Some(movie_name.to_string())
    }

    /// Applies a save response; returns `false` when no save was pending and the response was dropped
    pub async fn finish_save(&mut self, result: Result<String, ClientError>) -> bool {
        let DashboardState::NoFavorite {
            user,
            draft,
            saving: true,
            ..
        } = &self.state
        else {
            tracing::debug!("Discarding save response outside a pending save");
            return false;
        };
        let user = user.clone();
        let draft = draft.clone();

        match result {
            Ok(stored) if !stored.trim().is_empty() => {
                self.enter_has_favorite(user, stored).await;
            }
            result => {
                if let Err(e) = result {
                    tracing::warn!(error = %e, user_id = %user.id, "Saving favorite movie failed");
                }
                self.state = DashboardState::NoFavorite {
                    user,
                    draft,
                    saving: false,
                    notice: Some(SAVE_FAILED_NOTICE.to_string()),
                };
            }
        }
        true
    }

    async fn enter_has_favorite(&mut self, user: SessionUser, movie: String) {
        self.state = DashboardState::HasFavorite {
            user,
            movie,
            fact: FactStatus::Loading,
        };
        self.request_new_fact().await;
    }

    /// The "new fact" action: issues a request and applies its response
    pub async fn request_new_fact(&mut self) {
        let Some(ticket) = self.begin_fact_request() else {
            return;
        };
        let Some(user_id) = self.state.user().map(|u| u.id.clone()) else {
            return;
        };

        let result = self.api.movie_fact(&user_id).await;
        self.finish_fact_request(ticket, result);
    }

    /// Puts the fact panel into `Loading` and issues a new ticket
    ///
    /// Issuing a ticket supersedes every earlier one. Returns `None` outside
    /// the fact panel.
    pub fn begin_fact_request(&mut self) -> Option<FactTicket> {
        let DashboardState::HasFavorite { fact, .. } = &mut self.state else {
            return None;
        };
        *fact = FactStatus::Loading;

        self.issued += 1;
        let ticket = FactTicket(self.issued);
        self.latest = Some(ticket);
        Some(ticket)
    }

    /// Applies a fact response; returns `false` when the ticket is stale and the response was dropped
    pub fn finish_fact_request(
        &mut self,
        ticket: FactTicket,
        result: Result<String, ClientError>,
    ) -> bool {
        if self.latest != Some(ticket) {
            tracing::debug!(?ticket, "Discarding superseded fact response");
            return false;
        }
        let DashboardState::HasFavorite { fact, .. } = &mut self.state else {
            return false;
        };

        *fact = match result {
            Ok(text) if !text.trim().is_empty() => FactStatus::Ready(text),
            Ok(_) => FactStatus::Failed(FACT_FAILED_NOTICE.to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "Movie fact request failed");
                FactStatus::Failed(FACT_FAILED_NOTICE.to_string())
            }
        };
        self.latest = None;
        true
    }

    /// Text the dashboard displays for its current state
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        match &self.state {
            DashboardState::Unauthenticated => {
                lines.push("Movie Facts App".to_string());
                lines.push("Sign in to discover interesting facts about your favorite movies.".to_string());
            }
            DashboardState::Resolving { user, notice } => {
                push_header(&mut lines, user);
                match notice {
                    Some(notice) => {
                        lines.push(notice.clone());
                        lines.push("[Try Again]".to_string());
                    }
                    None => lines.push("Loading...".to_string()),
                }
            }
            DashboardState::NoFavorite {
                user,
                draft,
                saving,
                notice,
            } => {
                push_header(&mut lines, user);
                lines.push("Tell us about your favorite movie!".to_string());
                lines.push(
                    "We'll use this information to show you interesting facts about your favorite movie."
                        .to_string(),
                );
                lines.push("What's your favorite movie?".to_string());
                if let Some(draft) = draft {
                    lines.push(format!("> {}", draft));
                }
                if let Some(notice) = notice {
                    lines.push(notice.clone());
                    lines.push("[Try Again]".to_string());
                }
                if *saving {
                    lines.push("[Saving...]".to_string());
                } else {
                    lines.push("[Save Favorite Movie]".to_string());
                }
            }
            DashboardState::HasFavorite { user, movie, fact } => {
                push_header(&mut lines, user);
                lines.push(format!("Movie Fact of the Day: {}", movie));
                match fact {
                    FactStatus::Loading => {
                        lines.push("Generating an interesting fact...".to_string())
                    }
                    FactStatus::Ready(text) => {
                        lines.push(text.clone());
                        lines.push("[New Fact]".to_string());
                    }
                    FactStatus::Failed(notice) => {
                        lines.push(notice.clone());
                        lines.push("[Try Again]".to_string());
                    }
                }
            }
        }

        lines.join("\n")
    }
}

/// Greeting, logout action and profile card shared by every signed-in state
fn push_header(lines: &mut Vec<String>, user: &SessionUser) {
    lines.push(greeting(user));
    lines.push("[Logout]".to_string());
    if let Some(image) = &user.image {
        lines.push(format!("Avatar: {}", image));
    }
    if let Some(name) = &user.name {
        lines.push(name.clone());
    }
    if let Some(email) = &user.email {
        lines.push(email.clone());
    }
}

fn greeting(user: &SessionUser) -> String {
    let name = user
        .name
        .as_deref()
        .or(user.email.as_deref())
        .unwrap_or(&user.id);
    format!("Welcome, {}!", name)
}
