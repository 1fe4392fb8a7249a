use crate::error::AppError;
use crate::models::Song;
use mongodb::{
    bson::doc,
    error::{Error as MongoError, ErrorKind},
    Client as MongoClient, Collection, Database,
};

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        Ok(Self { client, db })
    }

    /// Round-trips a `ping` so connection and credential problems surface
    /// at startup instead of on the first request.
    pub async fn ping(&self) -> Result<(), MongoError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }

    /// Drops the song collection and bulk-inserts the given dataset,
    /// discarding any prior state.
    pub async fn reseed(&self, songs: &[Song]) -> Result<(), AppError> {
        tracing::warn!(
            count = songs.len(),
            "Reseeding song collection; existing documents will be discarded"
        );
        self.songs().drop(None).await.map_err(|e| {
            tracing::error!("Failed to drop songs collection: {}", e);
            AppError::from(e)
        })?;
        self.songs().insert_many(songs, None).await.map_err(|e| {
            tracing::error!("Failed to insert seed dataset: {}", e);
            AppError::from(e)
        })?;
        tracing::info!(count = songs.len(), "Seed dataset loaded");
        Ok(())
    }

    pub fn songs(&self) -> Collection<Song> {
        self.db.collection("songs")
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}

pub fn is_authentication_error(err: &MongoError) -> bool {
    matches!(*err.kind, ErrorKind::Authentication { .. })
}
