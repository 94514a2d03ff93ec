use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marketplace a sale went through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Marketplace {
    #[default]
    #[serde(rename = "Яндекс")]
    YandexMarket,
    #[serde(rename = "Озон")]
    Ozon,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown marketplace: {0}")]
pub struct UnknownMarketplace(pub String);

impl Marketplace {
    /// Every known marketplace, in display order
    pub fn all() -> &'static [Marketplace] {
        &[Marketplace::YandexMarket, Marketplace::Ozon]
    }

    /// Short stable code
    pub fn code(&self) -> &'static str {
        match self {
            Marketplace::YandexMarket => "mp-ym",
            Marketplace::Ozon => "mp-ozon",
        }
    }

    /// Name stored on sale records and matched by the marketplace filter
    pub fn display_name(&self) -> &'static str {
        match self {
            Marketplace::YandexMarket => "Яндекс",
            Marketplace::Ozon => "Озон",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Marketplace::YandexMarket => &["яндекс маркет", "yandex", "yandex market", "ym"],
            Marketplace::Ozon => &["ozon"],
        }
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Marketplace {
    type Err = UnknownMarketplace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Marketplace::all()
            .iter()
            .find(|mp| {
                mp.display_name().to_lowercase() == needle
                    || mp.code() == needle
                    || mp.aliases().contains(&needle.as_str())
            })
            .copied()
            .ok_or_else(|| UnknownMarketplace(s.trim().to_string()))
    }
}
