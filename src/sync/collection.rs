//! Collection synchronizer backing the list view.

use tracing::{debug, error, info};

use super::Outcome;
use crate::lifetime::ViewToken;
use crate::models::{Record, RecordId};
use crate::store::RecordStore;

/// The list view's local copy of the remote collection.
///
/// Local state only changes in two ways: [`load`](Self::load) replaces it
/// wholesale, [`remove`](Self::remove) shrinks it.
#[derive(Debug)]
pub struct RecordCollection {
    store: RecordStore,
    token: ViewToken,
    records: Vec<Record>,
}

impl RecordCollection {
    pub fn new(store: RecordStore, token: ViewToken) -> Self {
        Self {
            store,
            token,
            records: Vec::new(),
        }
    }

    /// Records in the order the store returned them.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id.as_ref() == Some(id))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fetches every record and replaces the local collection.
    ///
    /// On failure the local collection is left as it was.
    pub async fn load(&mut self) -> Outcome {
        match self.token.run(self.store.list()).await {
            None => {
                debug!("Record list fetch cancelled, view ended");
                Outcome::Cancelled
            }
            Some(Ok(records)) => {
                info!("Loaded {} record(s)", records.len());
                self.records = records;
                Outcome::Applied
            }
            Some(Err(e)) => {
                error!(kind = e.kind(), "Failed to fetch records: {}", e);
                Outcome::Failed(e)
            }
        }
    }

    /// Deletes `id` remotely, then drops it from the local collection.
    ///
    /// Local removal happens once the delete has been issued, whatever its
    /// result. If the view has already ended nothing is issued and the
    /// collection is left alone.
    pub async fn remove(&mut self, id: &RecordId) -> Outcome {
        if self.token.is_ended() {
            debug!(%id, "View ended, record delete not issued");
            return Outcome::Cancelled;
        }

        let outcome = match self.token.run(self.store.delete(id)).await {
            None => {
                debug!(%id, "Record delete cancelled, view ended");
                Outcome::Cancelled
            }
            Some(Ok(())) => {
                info!(%id, "Deleted record");
                Outcome::Applied
            }
            Some(Err(e)) => {
                error!(%id, kind = e.kind(), "Failed to delete record: {}", e);
                Outcome::Failed(e)
            }
        };

        self.records.retain(|r| r.id.as_ref() != Some(id));
        outcome
    }
}
