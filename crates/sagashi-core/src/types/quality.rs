use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stream quality advertised by a download link label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quality {
    /// 360p
    P360,
    /// 480p — Standard Definition
    P480,
    /// 720p — High Definition
    P720,
    /// 1080p — Full HD
    P1080,
}

impl Quality {
    /// Recognizes a quality from free-form link text such as
    /// `"SubsPlease · 720p (120MB)"`.
    ///
    /// Markers are checked from lowest to highest; the first hit wins.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let text = label.trim().to_lowercase();
        [
            ("360", Self::P360),
            ("480", Self::P480),
            ("720", Self::P720),
            ("1080", Self::P1080),
        ]
        .into_iter()
        .find(|(marker, _)| text.contains(marker))
        .map(|(_, quality)| quality)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::P360 => write!(f, "360p"),
            Self::P480 => write!(f, "480p"),
            Self::P720 => write!(f, "720p"),
            Self::P1080 => write!(f, "1080p"),
        }
    }
}

/// A labelled download link, typically one anchor on a play page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledLink {
    /// Visible link text.
    pub label: String,
    /// Link target.
    pub url: String,
}

impl LabeledLink {
    /// Creates a new labelled link.
    #[must_use]
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Groups links by the quality named in their label.
///
/// Links with no recognizable quality are keyed by their trimmed, lowercased
/// label. A later link with the same key replaces an earlier one.
#[must_use]
pub fn group_by_quality<'a, I>(links: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = &'a LabeledLink>,
{
    let mut map = BTreeMap::new();
    for link in links {
        let key = match Quality::from_label(&link.label) {
            Some(quality) => quality.to_string(),
            None => link.label.trim().to_lowercase(),
        };
        map.insert(key, link.url.clone());
    }
    map
}
