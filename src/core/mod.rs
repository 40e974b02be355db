pub mod feed;

pub use feed::{Feed, FeedState};
