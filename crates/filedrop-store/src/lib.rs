//! Local-directory blob storage for filedrop.
//!
//! Uploaded files live as flat files in a single directory. Each file is
//! named `<unix-millis>-<original>` by the [`namer`] module and written
//! through a [`BlobStore`].
//!
//! # Design Rules
//!
//! 1. The directory listing is the index. No sidecar metadata is written.
//! 2. Names are a single path component; anything else is rejected.
//! 3. Writes are not locked. The last writer of a name wins.
//! 4. Reported sizes come from the filesystem after the write, not from the
//!    input length.

pub mod blob;
pub mod error;
pub mod namer;

pub use blob::{BlobStore, BlobWriter, StoredBlob};
pub use error::{StoreError, StoreResult};
pub use namer::{parse_storage_name, sanitize_original_name, storage_name, storage_name_at};
