pub mod episode;

pub use episode::EpisodeParser;
