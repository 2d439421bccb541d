// ABOUTME: Seasons and seasonal availability flags for catalog items
// ABOUTME: Meteorological season derivation from calendar dates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use bitflags::bitflags;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Season used for availability filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// March through May
    Spring,
    /// June through August
    Summer,
    /// September through November
    Autumn,
    /// December through February
    Winter,
}

impl Season {
    /// Northern-hemisphere meteorological season for a date
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        match date.month() {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Autumn,
            _ => Self::Winter,
        }
    }

    /// Availability flag for this season
    #[must_use]
    pub const fn flag(self) -> Seasons {
        match self {
            Self::Spring => Seasons::SPRING,
            Self::Summer => Seasons::SUMMER,
            Self::Autumn => Seasons::AUTUMN,
            Self::Winter => Seasons::WINTER,
        }
    }
}

bitflags! {
    /// Seasons in which a catalog item is available
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Seasons: u8 {
        /// Available in spring
        const SPRING = 0b0001;
        /// Available in summer
        const SUMMER = 0b0010;
        /// Available in autumn
        const AUTUMN = 0b0100;
        /// Available in winter
        const WINTER = 0b1000;
    }
}

impl Default for Seasons {
    fn default() -> Self {
        Self::all()
    }
}

impl Seasons {
    /// Whether the item is available in `season`; `None` disables filtering
    #[must_use]
    pub const fn available_in(self, season: Option<Season>) -> bool {
        match season {
            Some(season) => self.contains(season.flag()),
            None => true,
        }
    }
}
