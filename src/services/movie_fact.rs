use std::sync::Arc;

use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::UserId,
    services::{
        favorite_movie::FavoriteMovieService,
        providers::{GenerationRequest, TextGenerator},
    },
};

pub const SYSTEM_INSTRUCTION: &str = "You are a movie expert who provides interesting, fun, and accurate facts about movies. Keep responses engaging and informative, around 2-3 sentences.";

/// Returned with a 200 when the provider produced no usable text
pub const FALLBACK_FACT: &str = "Unable to generate fact at this time.";

pub const NO_FAVORITE_MESSAGE: &str = "User has no favorite movie set";

const MAX_TOKENS: u32 = 150;
const TEMPERATURE: f32 = 0.7;

/// Generates a short fact about a user's stored favorite movie
#[derive(Clone)]
pub struct MovieFactService {
    favorites: FavoriteMovieService,
    generator: Arc<dyn TextGenerator>,
}

impl MovieFactService {
    pub fn new(favorites: FavoriteMovieService, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            favorites,
            generator,
        }
    }

    /// Builds the generation request for `movie`
    pub fn build_request(movie: &str) -> GenerationRequest {
        GenerationRequest {
            system: SYSTEM_INSTRUCTION.to_string(),
            prompt: format!(
                "Tell me one interesting fact about the movie \"{}\". Make it fun and engaging.",
                movie
            ),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }

    /// Generates one fact; facts are not cached, so repeat calls may differ
    #[instrument(skip(self))]
    pub async fn generate_fact(&self, user_id: &str) -> AppResult<String> {
        UserId::parse(user_id)?;

        // Checked before the outbound call so a missing favorite never costs a generation.
        let movie = self
            .favorites
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::Precondition(NO_FAVORITE_MESSAGE.to_string()))?;

        let request = Self::build_request(&movie);
        let candidates = self.generator.generate(&request).await?;

        let fact = candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.text)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        match fact {
            Some(fact) => {
                tracing::info!(provider = self.generator.name(), "Movie fact generated");
                Ok(fact)
            }
            None => {
                tracing::warn!(
                    provider = self.generator.name(),
                    "Provider returned no usable text, using fallback fact"
                );
                Ok(FALLBACK_FACT.to_string())
            }
        }
    }
}
