pub mod candidate;
pub mod episode;
pub mod quality;

pub use candidate::Candidate;
pub use episode::{find_episode, EpisodeLink};
pub use quality::{group_by_quality, LabeledLink, Quality};
