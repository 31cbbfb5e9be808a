//! objectgate - HTTP gateway for object storage
//!
//! A small front end that maps three routes onto a single object store
//! binding: authenticated multipart uploads, authenticated JSON deletes, and
//! unauthenticated serving of objects by key. Durability and content
//! addressing are the backing store's problem; the gateway only validates,
//! dispatches, and shapes responses.

pub mod auth;
pub mod config;
pub mod error;
pub mod server;
pub mod store;

pub use auth::Credentials;
pub use config::{Config, StoreBackend};
pub use error::{Error, Result};
pub use server::GatewayServer;
pub use store::{MemoryStore, ObjectStore, S3Store, StoredObject};
