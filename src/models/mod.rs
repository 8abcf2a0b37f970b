mod level;
mod record;

pub use level::Level;
pub use record::{Record, RecordId, RecordPatch};
