use super::predicate_trait::AssetPredicate;
use crate::domain::market::AssetSnapshot;

/// Case-insensitive substring match on symbol or name
pub struct SearchPredicate {
    needle: String,
}

impl SearchPredicate {
    pub fn new(search_text: &str) -> Self {
        Self {
            needle: search_text.to_lowercase(),
        }
    }
}

impl AssetPredicate for SearchPredicate {
    fn name(&self) -> &str {
        "search"
    }

    fn matches(&self, asset: &AssetSnapshot) -> bool {
        self.needle.is_empty()
            || asset.symbol.to_lowercase().contains(&self.needle)
            || asset.name.to_lowercase().contains(&self.needle)
    }

    fn is_active(&self) -> bool {
        !self.needle.is_empty()
    }

    fn order(&self) -> u8 {
        30
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::Sector;
    use crate::domain::test_fixtures::asset;

    #[test]
    fn test_matches_symbol_or_name() {
        let mut nvda = asset(1, "NVDA", Sector::AiSemiconductors, 3.0);
        nvda.name = "NVIDIA".to_string();
        let mut msft = asset(2, "MSFT", Sector::CloudAi, 3.0);
        msft.name = "Microsoft".to_string();

        assert!(SearchPredicate::new("nvd").matches(&nvda));
        assert!(SearchPredicate::new("micro").matches(&msft));
        assert!(!SearchPredicate::new("micro").matches(&nvda));
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let predicate = SearchPredicate::new("");
        assert!(!predicate.is_active());
        assert!(predicate.matches(&asset(1, "NVDA", Sector::AiSemiconductors, 3.0)));
    }
}
