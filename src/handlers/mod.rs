pub mod health;
pub mod songs;

pub use health::{count_songs, health_check};
pub use songs::{create_song, delete_song, get_song, list_songs, update_song};
