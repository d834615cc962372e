pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod opml;
pub mod session;
pub mod store;

pub use api::ApiGateway;
pub use config::AppConfig;
pub use error::{Error, Result};
pub use models::{Entry, Feed, ReadStatus};
pub use session::{AuthToken, CredentialStore, FileStore, MemoryStore, Session};
pub use store::{ArticleList, CurrentArticle, EntryFilter, FeedList};
