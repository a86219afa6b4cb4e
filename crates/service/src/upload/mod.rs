//! Upload handling: content-type policy, stored-name scheme and disk writes.

pub mod policy;
pub mod store;

pub use policy::{generate_filename, UploadKind};
pub use store::{IncomingFile, StoredFile, UploadStore};
