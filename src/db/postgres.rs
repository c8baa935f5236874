use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::store::UserStore,
    error::AppResult,
    models::{User, UserId},
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the embedded migrations under `migrations/`
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// User store backed by the `users` table
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PgUserStore {
    async fn find_user(&self, id: &UserId) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, image, favorite_movie
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_favorite_movie(&self, id: &UserId, movie: &str) -> AppResult<Option<String>> {
        // A missing row yields no RETURNING row, which callers report as not found.
        let stored: Option<Option<String>> = sqlx::query_scalar(
            r#"
            UPDATE users
            SET favorite_movie = $1, updated_at = now()
            WHERE id = $2
            RETURNING favorite_movie
            "#,
        )
        .bind(movie)
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(stored.flatten())
    }
}
