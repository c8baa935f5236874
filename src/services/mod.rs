pub mod favorite_movie;
pub mod movie_fact;
pub mod providers;
pub mod session;

pub use favorite_movie::FavoriteMovieService;
pub use movie_fact::MovieFactService;
pub use providers::{OpenAiGenerator, TextGenerator};
pub use session::SessionProvider;
