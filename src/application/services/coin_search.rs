//! Fuzzy coin lookup for the coin selection step.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::domain::entities::Coin;

/// Ranks coins against a typed query by symbol and name.
pub struct CoinSearch {
    coins: Vec<Coin>,
    matcher: SkimMatcherV2,
}

impl CoinSearch {
    /// Creates a search over `coins`.
    #[must_use]
    pub fn new(coins: Vec<Coin>) -> Self {
        Self {
            coins,
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }

    /// Returns the catalog in its original order.
    #[must_use]
    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    /// Returns matching coins, best first. An empty query lists everything
    /// in catalog order.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Coin> {
        let query = query.trim();
        if query.is_empty() {
            return self.coins.iter().collect();
        }

        let mut scored: Vec<(i64, &Coin)> = self
            .coins
            .iter()
            .filter_map(|coin| {
                let symbol_score = self.matcher.fuzzy_match(coin.symbol(), query);
                let name_score = self.matcher.fuzzy_match(coin.name(), query);
                let exact_bonus = if coin.symbol().eq_ignore_ascii_case(query) {
                    1_000
                } else {
                    0
                };
                symbol_score
                    .max(name_score)
                    .map(|score| (score + exact_bonus, coin))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, coin)| coin).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::default_coins;

    #[test]
    fn test_empty_query_lists_all() {
        let search = CoinSearch::new(default_coins());
        assert_eq!(search.search("  ").len(), search.coins().len());
    }

    #[test]
    fn test_exact_symbol_ranks_first() {
        let search = CoinSearch::new(default_coins());
        let results = search.search("eth");
        assert_eq!(results.first().map(|c| c.symbol()), Some("ETH"));
    }

    #[test]
    fn test_matches_by_name() {
        let search = CoinSearch::new(default_coins());
        let results = search.search("doge");
        assert!(results.iter().any(|c| c.name() == "Dogecoin"));
    }

    #[test]
    fn test_no_match() {
        let search = CoinSearch::new(default_coins());
        assert!(search.search("zzzzqq").is_empty());
    }
}
