//! Fixed calendar-month season buckets.

use std::fmt;

use serde::Serialize;

/// One of the four calendar-month groupings used by the four-season grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// March to May.
    Spring,
    /// June to August.
    Summer,
    /// September to November.
    Fall,
    /// December, January and February.
    Winter,
}

impl Season {
    /// Seasons in grid row order.
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Maps a calendar month (1-12) to its season.
    ///
    /// Returns `None` for a month outside 1-12.
    ///
    /// # Examples
    ///
    /// ```
    /// use genesys_profile::season::Season;
    ///
    /// assert_eq!(Season::from_month(7), Some(Season::Summer));
    /// assert_eq!(Season::from_month(12), Some(Season::Winter));
    /// assert_eq!(Season::from_month(13), None);
    /// ```
    pub fn from_month(month: u32) -> Option<Self> {
        match month {
            3..=5 => Some(Self::Spring),
            6..=8 => Some(Self::Summer),
            9..=11 => Some(Self::Fall),
            12 | 1 | 2 => Some(Self::Winter),
            _ => None,
        }
    }

    /// Row index of this season in a four-season profile.
    pub fn index(self) -> usize {
        match self {
            Self::Spring => 0,
            Self::Summer => 1,
            Self::Fall => 2,
            Self::Winter => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
            Self::Winter => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
