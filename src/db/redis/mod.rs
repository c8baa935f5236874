pub mod session;

pub use session::create_redis_client;
pub use session::RedisSessionProvider;
pub use session::SessionKey;
