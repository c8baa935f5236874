//! Client-side dashboard: the favorite-movie form and the fact panel.
//!
//! The dashboard is an explicit state machine driven by session changes and
//! user actions. It reaches the server only through [`MovieFactsApi`], so it
//! runs the same against the HTTP client or a test double.

pub mod client;
pub mod dashboard;

pub use client::{ClientError, HttpMovieFactsClient, MovieFactsApi};
pub use dashboard::{Dashboard, DashboardState, FactStatus, FactTicket};
