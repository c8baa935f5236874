use std::sync::Arc;

use tracing::instrument;

use crate::{
    db::UserStore,
    error::{AppError, AppResult},
    models::UserId,
};

/// Reads and writes the favorite-movie field of a user record
#[derive(Clone)]
pub struct FavoriteMovieService {
    store: Arc<dyn UserStore>,
}

impl FavoriteMovieService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Returns the user's favorite movie
    ///
    /// `None` when the favorite is unset or the user does not exist.
    #[instrument(skip(self))]
    pub async fn get(&self, user_id: &str) -> AppResult<Option<String>> {
        let user_id = UserId::parse(user_id)?;

        let user = self.store.find_user(&user_id).await?;
        let favorite = user
            .as_ref()
            .and_then(|u| u.favorite_movie())
            .map(str::to_string);

        tracing::debug!(
            found = user.is_some(),
            has_favorite = favorite.is_some(),
            "Favorite movie resolved"
        );

        Ok(favorite)
    }

    /// Stores `favorite_movie` (trimmed) for an existing user and returns the stored value
    ///
    /// Overwrites any previous value. Fails with `NotFound` rather than creating
    /// a user when `user_id` matches no record.
    #[instrument(skip(self, favorite_movie))]
    pub async fn set(&self, user_id: &str, favorite_movie: &str) -> AppResult<String> {
        let favorite_movie = favorite_movie.trim();
        if user_id.trim().is_empty() || favorite_movie.is_empty() {
            return Err(AppError::InvalidInput(
                "User ID and favorite movie are required".to_string(),
            ));
        }
        let user_id = UserId::parse(user_id)?;

        let stored = self
            .store
            .update_favorite_movie(&user_id, favorite_movie)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!("Favorite movie saved");

        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MockUserStore;
    use crate::db::InMemoryUserStore;
    use crate::models::User;
    use tokio_test::{assert_err, assert_ok};

    fn service_with(store: MockUserStore) -> FavoriteMovieService {
        FavoriteMovieService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_get_without_favorite_returns_none() {
        let mut store = MockUserStore::new();
        store
            .expect_find_user()
            .withf(|id| id.as_str() == "u1")
            .returning(|_| Ok(Some(User::new("u1"))));

        let service = service_with(store);
        assert_eq!(service.get("u1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_unknown_user_returns_none() {
        let mut store = MockUserStore::new();
        store.expect_find_user().returning(|_| Ok(None));

        let service = service_with(store);
        assert_eq!(service.get("ghost").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_requires_user_id() {
        let mut store = MockUserStore::new();
        store.expect_find_user().never();

        let service = service_with(store);
        let result = service.get("").await;
        assert!(matches!(result, Err(AppError::InvalidInput(msg)) if msg == "User ID is required"));
    }

    #[tokio::test]
    async fn test_get_store_failure_is_internal() {
        let mut store = MockUserStore::new();
        store
            .expect_find_user()
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let service = service_with(store);
        let err = assert_err!(service.get("u1").await);
        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_set_trims_before_writing() {
        let mut store = MockUserStore::new();
        store
            .expect_update_favorite_movie()
            .withf(|id, movie| id.as_str() == "u1" && movie == "The Matrix")
            .times(1)
            .returning(|_, movie| Ok(Some(movie.to_string())));

        let service = service_with(store);
        let stored = assert_ok!(service.set("u1", "  The Matrix  ").await);
        assert_eq!(stored, "The Matrix");
    }

    #[tokio::test]
    async fn test_set_rejects_blank_inputs_without_writing() {
        let mut store = MockUserStore::new();
        store.expect_update_favorite_movie().never();

        let service = service_with(store);
        for (user_id, movie) in [("", "Heat"), ("u1", ""), ("u1", "   "), ("  ", "Heat")] {
            let result = service.set(user_id, movie).await;
            assert!(
                matches!(&result, Err(AppError::InvalidInput(msg)) if msg == "User ID and favorite movie are required"),
                "expected validation error for ({:?}, {:?})",
                user_id,
                movie
            );
        }
    }

    #[tokio::test]
    async fn test_set_unknown_user_is_not_found() {
        let mut store = MockUserStore::new();
        store
            .expect_update_favorite_movie()
            .returning(|_, _| Ok(None));

        let service = service_with(store);
        let result = service.set("ghost", "Heat").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_set_store_failure_is_internal() {
        let mut store = MockUserStore::new();
        store
            .expect_update_favorite_movie()
            .times(1)
            .returning(|_, _| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let service = service_with(store);
        let err = assert_err!(service.set("u1", "Heat").await);
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_set_then_get_round_trip() {
        let store = InMemoryUserStore::new();
        store.insert(User::new("u1")).await;
        let service = FavoriteMovieService::new(Arc::new(store));

        assert_eq!(service.get("u1").await.unwrap(), None);
        service.set("u1", "  The Matrix  ").await.unwrap();
        assert_eq!(service.get("u1").await.unwrap(), Some("The Matrix".to_string()));

        service.set("u1", "Arrival").await.unwrap();
        assert_eq!(service.get("u1").await.unwrap(), Some("Arrival".to_string()));
    }
}
