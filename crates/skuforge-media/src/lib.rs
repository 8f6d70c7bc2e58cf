//! Client for the external image CDN that stores product and variant
//! media.
//!
//! The admin API and CLI talk to the CDN through [`MediaClient`]: multipart
//! uploads keyed by folder, and deletion by the `file_id` handed back at
//! upload time. The client is optional at runtime; when no media
//! credentials are configured the rest of the system runs without it.

pub mod client;
pub mod error;
pub mod types;

pub use client::MediaClient;
pub use error::MediaError;
pub use types::UploadedImage;
