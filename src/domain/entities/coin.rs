//! Tradable coin listing.

use serde::{Deserialize, Serialize};

/// Coin the user can attach alerts to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    symbol: String,
    name: String,
}

impl Coin {
    /// Creates a coin; the symbol is normalized to upper case.
    #[must_use]
    pub fn new(symbol: impl AsRef<str>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.as_ref().trim().to_uppercase(),
            name: name.into(),
        }
    }

    /// Returns ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns human readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}

/// Coins offered when the backend listing is unavailable.
pub const DEFAULT_COINS: &[(&str, &str)] = &[
    ("BTC", "Bitcoin"),
    ("ETH", "Ethereum"),
    ("TON", "Toncoin"),
    ("SOL", "Solana"),
    ("BNB", "BNB"),
    ("XRP", "XRP"),
    ("USDT", "Tether"),
    ("DOGE", "Dogecoin"),
    ("ADA", "Cardano"),
    ("TRX", "TRON"),
];

/// Builds the default coin list.
#[must_use]
pub fn default_coins() -> Vec<Coin> {
    DEFAULT_COINS
        .iter()
        .map(|(symbol, name)| Coin::new(symbol, *name))
        .collect()
}
