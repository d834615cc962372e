//! In-memory collection state, passed down explicitly rather than held as
//! ambient globals.

mod article;
mod articles;
mod feeds;

pub use article::CurrentArticle;
pub use articles::{ArticleList, EntryFilter};
pub use feeds::FeedList;
