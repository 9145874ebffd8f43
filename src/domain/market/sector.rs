use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Industry classification of a tracked asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    #[serde(rename = "AI/Semiconductors")]
    AiSemiconductors,
    #[serde(rename = "Cloud/AI")]
    CloudAi,
    #[serde(rename = "AI/Search")]
    AiSearch,
    #[serde(rename = "Social/VR")]
    SocialVr,
    #[serde(rename = "Consumer Tech")]
    ConsumerTech,
    #[serde(rename = "AI/Defense")]
    AiDefense,
    #[serde(rename = "Cloud Data")]
    CloudData,
    #[serde(rename = "Enterprise AI")]
    EnterpriseAi,
    #[serde(rename = "Semiconductors")]
    Semiconductors,
    #[serde(rename = "FinTech")]
    FinTech,
    #[serde(rename = "Asset Mgmt")]
    AssetManagement,
    #[serde(rename = "Crypto Exchange")]
    CryptoExchange,
    #[serde(rename = "EV/Energy")]
    EvEnergy,
    #[serde(rename = "Clean Energy")]
    CleanEnergy,
    #[serde(rename = "Solar")]
    Solar,
    #[serde(rename = "Biotech")]
    Biotech,
    #[serde(rename = "MedTech")]
    MedTech,
    #[serde(rename = "5G/Mobile")]
    FiveGMobile,
}

impl Sector {
    pub const ALL: [Sector; 18] = [
        Sector::AiSemiconductors,
        Sector::CloudAi,
        Sector::AiSearch,
        Sector::SocialVr,
        Sector::ConsumerTech,
        Sector::AiDefense,
        Sector::CloudData,
        Sector::EnterpriseAi,
        Sector::Semiconductors,
        Sector::FinTech,
        Sector::AssetManagement,
        Sector::CryptoExchange,
        Sector::EvEnergy,
        Sector::CleanEnergy,
        Sector::Solar,
        Sector::Biotech,
        Sector::MedTech,
        Sector::FiveGMobile,
    ];

    /// Sectors offered in the dashboard's sector selector
    pub const SELECTABLE: [Sector; 7] = [
        Sector::AiSemiconductors,
        Sector::CloudAi,
        Sector::FinTech,
        Sector::Biotech,
        Sector::CleanEnergy,
        Sector::EvEnergy,
        Sector::SocialVr,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Sector::AiSemiconductors => "AI/Semiconductors",
            Sector::CloudAi => "Cloud/AI",
            Sector::AiSearch => "AI/Search",
            Sector::SocialVr => "Social/VR",
            Sector::ConsumerTech => "Consumer Tech",
            Sector::AiDefense => "AI/Defense",
            Sector::CloudData => "Cloud Data",
            Sector::EnterpriseAi => "Enterprise AI",
            Sector::Semiconductors => "Semiconductors",
            Sector::FinTech => "FinTech",
            Sector::AssetManagement => "Asset Mgmt",
            Sector::CryptoExchange => "Crypto Exchange",
            Sector::EvEnergy => "EV/Energy",
            Sector::CleanEnergy => "Clean Energy",
            Sector::Solar => "Solar",
            Sector::Biotech => "Biotech",
            Sector::MedTech => "MedTech",
            Sector::FiveGMobile => "5G/Mobile",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Sector::ALL
            .iter()
            .copied()
            .find(|sector| sector.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown sector '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_parse_is_case_insensitive() {
        assert_eq!(Sector::from_str("fintech").unwrap(), Sector::FinTech);
        assert_eq!(Sector::from_str(" AI/Semiconductors ").unwrap(), Sector::AiSemiconductors);
        assert!(Sector::from_str("Agriculture").is_err());
    }

    #[test]
    fn test_sector_serializes_as_label() {
        let json = serde_json::to_string(&Sector::FiveGMobile).unwrap();
        assert_eq!(json, "\"5G/Mobile\"");
    }
}
