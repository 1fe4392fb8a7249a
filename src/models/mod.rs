pub mod song;

pub use song::{seed_dataset, to_extended_json, Song};
