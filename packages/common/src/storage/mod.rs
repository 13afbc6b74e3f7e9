mod error;
mod key;
mod traits;

pub mod filesystem;
pub mod remote;

pub use error::StorageError;
pub use key::PhotoKey;
pub use remote::{PhotoUrlPolicy, RemotePattern};
pub use traits::{BoxReader, PhotoStore, StoredPhoto};
