use crate::domain::market::{RiskBand, Sector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SectorFilter {
    #[default]
    All,
    Only(Sector),
}

impl fmt::Display for SectorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectorFilter::All => write!(f, "All"),
            SectorFilter::Only(sector) => write!(f, "{}", sector),
        }
    }
}

impl FromStr for SectorFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(SectorFilter::All)
        } else {
            Sector::from_str(s).map(SectorFilter::Only)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RiskFilter {
    #[default]
    All,
    Only(RiskBand),
}

impl fmt::Display for RiskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskFilter::All => write!(f, "All"),
            RiskFilter::Only(band) => write!(f, "{}", band),
        }
    }
}

impl FromStr for RiskFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(RiskFilter::All)
        } else {
            RiskBand::from_str(s).map(RiskFilter::Only)
        }
    }
}

/// User-selected filters. Replaced wholesale whenever the user changes one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub sector: SectorFilter,
    pub risk: RiskFilter,
    pub search_text: String,
}

impl FilterCriteria {
    pub fn with_sector(&self, sector: SectorFilter) -> Self {
        Self {
            sector,
            ..self.clone()
        }
    }

    pub fn with_risk(&self, risk: RiskFilter) -> Self {
        Self {
            risk,
            ..self.clone()
        }
    }

    pub fn with_search(&self, search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            ..self.clone()
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.sector == SectorFilter::All && self.risk == RiskFilter::All && self.search_text.is_empty()
    }
}
