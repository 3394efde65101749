// src/domain/mod.rs
pub mod error;
pub mod note;
pub mod outcome;

pub use error::{DomainError, TransportError};
pub use note::{NewNote, Note, NoteList};
pub use outcome::{ApiFailure, HttpMethod, Payload, RequestOutcome};
