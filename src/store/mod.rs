//! Access to the remote record store.
//!
//! The store exposes a single `record` resource over HTTP:
//!
//! | Operation | Request |
//! |---|---|
//! | list   | `GET /record` |
//! | get    | `GET /record/{id}` |
//! | create | `POST /record` |
//! | update | `PATCH /record/{id}` |
//! | delete | `DELETE /record/{id}` |

mod client;
mod error;

pub use client::RecordStore;
pub use error::StoreError;
