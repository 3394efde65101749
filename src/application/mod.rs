// src/application/mod.rs
pub mod notes_store;
pub mod transport;

pub use notes_store::{NotesStore, OperationStatus, StoreState};
pub use transport::{Transport, NOTES_PATH};
