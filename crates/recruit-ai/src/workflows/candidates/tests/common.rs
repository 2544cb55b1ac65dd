use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::storage::{KeyValueStore, MemoryStore, StorageError, CANDIDATES_KEY};
use crate::workflows::candidates::{Candidate, CandidateDraft, CandidateStore};

pub(super) fn ada() -> CandidateDraft {
    CandidateDraft::new("Ada Lovelace", "ada@x.com", "Backend Engineer").with_phone("555-0100")
}

pub(super) fn grace() -> CandidateDraft {
    CandidateDraft::new("Grace Hopper", "grace@navy.mil", "DevOps Engineer")
}

pub(super) fn alan() -> CandidateDraft {
    CandidateDraft::new("Alan Turing", "alan@bletchley.uk", "Data Scientist")
}

pub(super) fn memory_store() -> (CandidateStore<MemoryStore>, Arc<MemoryStore>) {
    let backend = Arc::new(MemoryStore::new());
    (CandidateStore::open(backend.clone()), backend)
}

pub(super) fn seeded_store() -> (CandidateStore<MemoryStore>, Arc<MemoryStore>, Vec<Candidate>) {
    let (store, backend) = memory_store();
    let seeded = [ada(), grace(), alan()]
        .into_iter()
        .map(|draft| store.create(draft).expect("seed candidate"))
        .collect();
    (store, backend, seeded)
}

pub(super) fn persisted(backend: &MemoryStore) -> Vec<Candidate> {
    let raw = backend
        .get(CANDIDATES_KEY)
        .expect("read backend")
        .expect("collection persisted");
    serde_json::from_str(&raw).expect("valid collection")
}

/// Backend that accepts reads but refuses every write.
pub(super) struct ReadOnlyBackend {
    pub(super) inner: MemoryStore,
}

impl KeyValueStore for ReadOnlyBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn put(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io {
            key: CANDIDATES_KEY.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read only"),
        })
    }
}

/// Backend whose reads fail outright.
pub(super) struct OfflineBackend;

impl KeyValueStore for OfflineBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Io {
            key: key.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk offline"),
        })
    }

    fn put(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io {
            key: key.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk offline"),
        })
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
