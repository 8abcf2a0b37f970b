//! Record editor backing the create/edit view.
//!
//! ```text
//!   New ──initialize(None)──────────────────────────► Ready
//!    │                                                  ▲ │
//!    └─initialize(Some(id))─► Loading ──found/failed────┘ │ submit
//!                                │                        ▼
//!                                └─absent/ended─► Done ◄─ Submitting
//! ```

use tracing::{debug, error, info, warn};

use super::Navigation;
use crate::lifetime::ViewToken;
use crate::models::{Record, RecordId, RecordPatch};
use crate::store::{RecordStore, StoreError};

/// Whether the draft will be created or update an existing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    New,
    Existing(RecordId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// Constructed, not yet initialized
    New,
    /// Fetching the record being edited
    Loading,
    /// Draft populated and editable
    Ready,
    /// Save in flight
    Submitting,
    /// Navigated away; terminal
    Done,
}

/// Draft state for one activation of the editor view.
#[derive(Debug)]
pub struct RecordEditor {
    store: RecordStore,
    token: ViewToken,
    draft: Record,
    target: EditTarget,
    state: EditorState,
    last_error: Option<StoreError>,
}

impl RecordEditor {
    pub fn new(store: RecordStore, token: ViewToken) -> Self {
        Self {
            store,
            token,
            draft: Record::empty(),
            target: EditTarget::New,
            state: EditorState::New,
            last_error: None,
        }
    }

    pub fn draft(&self) -> &Record {
        &self.draft
    }

    pub fn target(&self) -> &EditTarget {
        &self.target
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn is_new(&self) -> bool {
        self.target == EditTarget::New
    }

    /// The failure behind the most recent fetch or save, if it failed.
    ///
    /// Failures never change the editor's flow; this only lets a caller
    /// report them.
    pub fn last_error(&self) -> Option<&StoreError> {
        self.last_error.as_ref()
    }

    /// Binds the editor to an existing record, or to a fresh draft.
    ///
    /// For an existing record the draft is fetched from the store. An absent
    /// record, or a view that ends mid-fetch, finishes the editor and asks
    /// for the collection view. Any other failure is logged and leaves the
    /// draft empty.
    pub async fn initialize(&mut self, id: Option<RecordId>) -> Navigation {
        if self.state != EditorState::New {
            warn!(state = ?self.state, "Editor already initialized, ignoring");
            return Navigation::Stay;
        }

        let Some(id) = id else {
            self.draft = Record::empty();
            self.target = EditTarget::New;
            self.state = EditorState::Ready;
            return Navigation::Stay;
        };

        self.target = EditTarget::Existing(id.clone());
        self.state = EditorState::Loading;

        match self.token.run(self.store.get(&id)).await {
            None => {
                debug!(%id, "Record fetch cancelled, view ended");
                self.state = EditorState::Done;
                Navigation::Collection
            }
            Some(Ok(record)) => {
                debug!(%id, "Loaded record for editing");
                self.draft = record;
                self.state = EditorState::Ready;
                Navigation::Stay
            }
            Some(Err(StoreError::NotFound)) => {
                warn!(%id, "Record not found");
                self.state = EditorState::Done;
                Navigation::Collection
            }
            Some(Err(e)) => {
                error!(%id, kind = e.kind(), "Failed to fetch record: {}", e);
                self.last_error = Some(e);
                self.state = EditorState::Ready;
                Navigation::Stay
            }
        }
    }

    /// Shallow-merges `patch` into the draft.
    pub fn update_field(&mut self, patch: RecordPatch) {
        if self.state == EditorState::Done {
            debug!("Editor is done, ignoring field update");
            return;
        }
        self.draft.merge(patch);
    }

    /// Creates or updates the remote record from the full draft.
    ///
    /// Whatever the result of the call, the draft is reset and the editor
    /// asks for the collection view. Failures are only logged.
    pub async fn submit(&mut self) -> Navigation {
        if self.state != EditorState::Ready {
            warn!(state = ?self.state, "Submit outside of ready state, ignoring");
            return Navigation::Stay;
        }
        self.state = EditorState::Submitting;

        self.last_error = None;
        let payload = std::mem::take(&mut self.draft);
        let result = match &self.target {
            EditTarget::New => self.token.run(self.store.create(&payload)).await,
            EditTarget::Existing(id) => self.token.run(self.store.update(id, &payload)).await,
        };

        match result {
            None => debug!("Record save cancelled, view ended"),
            Some(Ok(())) => match &self.target {
                EditTarget::New => info!("Created record '{}'", payload.name),
                EditTarget::Existing(id) => info!(%id, "Updated record"),
            },
            Some(Err(e)) => {
                error!(
                    kind = e.kind(),
                    "A problem occurred adding or updating a record: {}", e
                );
                self.last_error = Some(e);
            }
        }

        self.draft = Record::empty();
        self.state = EditorState::Done;
        Navigation::Collection
    }
}
