pub mod ecs;
pub mod kind;
pub mod record;

pub use ecs::OptExtract;
pub use kind::{EntryKind, RecordKind};
