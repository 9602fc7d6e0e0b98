// jman-core: Cache-first reactive data layer between jman-api and consumers.

pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod service;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::{CacheError, Collection, FileCache, MemoryCache, PersistentCache};
pub use config::{DataConfig, TlsVerification};
pub use error::{CoreError, DEFAULT_FETCH_ERROR};
pub use service::DataService;
pub use store::{DataStore, LoadStatus, Snapshot};
pub use stream::{EntityStream, EntityWatchStream, Lookup};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Core entities
    Plugin, Server, Site, SiteDetail,
    // Supporting types
    AdditionalDomain, AutoUpdate, Backups, BasicAuth, DiskSpace, Https, Nginx, ServerDatabase,
    SiteDatabase, StorageProvider, Toggle, UpdateFlag,
};
