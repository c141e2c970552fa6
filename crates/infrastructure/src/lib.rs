//! HTTP adapters for the Galaxy ports.

#![forbid(unsafe_code)]

mod collection_archive;
mod http_galaxy_client;
mod http_galaxy_sessions;

pub use collection_archive::{CollectionArchive, build_collection_archive};
pub use http_galaxy_client::{HttpGalaxyClient, TaskPolling};
pub use http_galaxy_sessions::HttpGalaxySessions;
