use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Simplified taxation (УСН) presets offered when entering a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaxSystem {
    /// УСН Доходы, 1%
    Usn1,
    /// УСН Доходы, 7%
    Usn7,
    /// УСН Доходы-Расходы, 15%
    Usn15,
}

impl TaxSystem {
    /// Fraction of revenue retained after tax, as stored in a sale's `tax_rate`
    pub fn retained_fraction(&self) -> Decimal {
        Decimal::ONE - self.rate()
    }

    /// Effective tax rate
    pub fn rate(&self) -> Decimal {
        match self {
            TaxSystem::Usn1 => dec!(0.01),
            TaxSystem::Usn7 => dec!(0.07),
            TaxSystem::Usn15 => dec!(0.15),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaxSystem::Usn1 => "УСН Доходы (1%)",
            TaxSystem::Usn7 => "УСН Доходы (7%)",
            TaxSystem::Usn15 => "УСН Доходы-Расходы (15%)",
        }
    }

    pub fn parse(s: &str) -> Option<TaxSystem> {
        match s.trim().to_lowercase().trim_end_matches('%') {
            "usn1" | "1" => Some(TaxSystem::Usn1),
            "usn7" | "7" => Some(TaxSystem::Usn7),
            "usn15" | "15" => Some(TaxSystem::Usn15),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retained_fractions_match_presets() {
        assert_eq!(TaxSystem::Usn1.retained_fraction(), dec!(0.99));
        assert_eq!(TaxSystem::Usn7.retained_fraction(), dec!(0.93));
        assert_eq!(TaxSystem::Usn15.retained_fraction(), dec!(0.85));
    }

    #[test]
    fn parses_names_and_percentages() {
        assert_eq!(TaxSystem::parse("usn7"), Some(TaxSystem::Usn7));
        assert_eq!(TaxSystem::parse("15%"), Some(TaxSystem::Usn15));
        assert_eq!(TaxSystem::parse("USN1"), Some(TaxSystem::Usn1));
        assert_eq!(TaxSystem::parse("6"), None);
    }
}
