//! Object-storage and artifact-catalog client.
//!
//! Talks to a Supabase-style backend: video objects live in a storage
//! bucket under a `daily/` prefix, and a PostgREST table tracks published
//! artifacts with a single `is_latest` slot. Promotion to that slot
//! (delete superseded objects and rows, insert the new one) is serialized
//! behind an in-process lock; see [`client::StorageClient::promote_to_latest`].

pub mod client;
pub mod types;

pub use client::{StorageClient, StorageError, StorageSettings};
pub use types::ArtifactRecord;
