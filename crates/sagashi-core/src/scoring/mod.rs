pub mod matcher;
pub mod policy;
pub mod similarity;
pub mod slug;

pub use matcher::{checked_query, TitleMatcher};
pub use policy::{MatchPolicy, SlugPolicy, DEFAULT_THRESHOLD};
pub use similarity::{edit_distance, similarity};
pub use slug::{query_slug, slug_of, SlugMatch, SlugMatcher, SlugRank};
