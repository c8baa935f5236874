pub mod postgres;
pub mod redis;
pub mod store;

pub use postgres::{create_pool, run_migrations, PgUserStore};
pub use self::redis::{create_redis_client, RedisSessionProvider};
pub use store::{InMemoryUserStore, UserStore};
