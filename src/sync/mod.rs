//! Client-side sync units for the record views.
//!
//! - [`RecordCollection`] mirrors the remote collection for the list view.
//! - [`RecordEditor`] holds the draft for the create/edit view.
//!
//! Remote failures never propagate out of these units: they are logged and
//! reported back as plain values ([`Outcome`], [`Navigation`]) that callers
//! are free to ignore.

mod collection;
mod editor;

pub use collection::RecordCollection;
pub use editor::{EditTarget, EditorState, RecordEditor};

use crate::store::StoreError;

/// What a collection operation did to local state.
#[derive(Debug)]
pub enum Outcome {
    /// The remote call succeeded and its result was applied
    Applied,
    /// The remote call failed; the error has already been logged
    Failed(StoreError),
    /// The view ended before the call completed
    Cancelled,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Where the view should go after an editor operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Collection,
}
