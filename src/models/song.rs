use crate::error::AppError;
use mongodb::bson::{Bson, Document};

/// A song is an opaque document: an integer `id` used as the lookup key
/// plus whatever other fields the dataset or the caller supplies. The
/// service imposes no schema beyond that.
pub type Song = Document;

const SEED_DATA: &str = include_str!("../../data/songs.json");

/// Parses the bundled seed dataset. The file ships inside the binary, so
/// a parse failure is a build defect surfaced at startup.
pub fn seed_dataset() -> Result<Vec<Song>, AppError> {
    serde_json::from_str(SEED_DATA)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Invalid bundled song dataset: {}", e)))
}

/// Serializes a stored document as MongoDB relaxed extended JSON, which
/// keeps driver-specific values like `_id` object ids representable while
/// leaving plain integers and strings untouched.
pub fn to_extended_json(song: Song) -> serde_json::Value {
    Bson::Document(song).into_relaxed_extjson()
}
