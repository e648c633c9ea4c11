use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Watchlist item status tags as the backend spells them.
///
/// Transitions happen server-side; the client only reads them and requests
/// changes through the item update endpoint. Tags this client does not know
/// are kept verbatim in `Other` so one new tag cannot break a whole listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum ItemStatus {
    /// Still to watch
    Active,
    Watching,
    Watched,
    Dropped,
    Other(String),
}

impl ItemStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Watching => "watching",
            ItemStatus::Watched => "watched",
            ItemStatus::Dropped => "dropped",
            ItemStatus::Other(tag) => tag,
        }
    }

    /// Human form of the tag: `plan_to_watch` reads as `plan to watch`.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ItemStatus::Other(_))
    }
}

impl From<String> for ItemStatus {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "active" => ItemStatus::Active,
            "watching" => ItemStatus::Watching,
            "watched" => ItemStatus::Watched,
            "dropped" => ItemStatus::Dropped,
            _ => ItemStatus::Other(tag),
        }
    }
}

impl From<ItemStatus> for String {
    fn from(status: ItemStatus) -> Self {
        match status {
            ItemStatus::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    /// Case-insensitive. Unknown tags are accepted as long as they look like
    /// a backend tag (letters, digits and underscores).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let well_formed = !lowered.is_empty()
            && lowered.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !well_formed {
            return Err(format!(
                "Invalid item status: {}. Use one of: active, watching, watched, dropped",
                s
            ));
        }
        Ok(ItemStatus::from(lowered))
    }
}
