//! Grunderwerbsteuer (property transfer tax) by German federal state.
//!
//! The tax rate is not free input: it is determined by the state the
//! property lies in, so it is modelled as a closed enum.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::Percent;
use crate::KreditError;

/// Every distinct transfer-tax rate currently levied, ascending.
pub const TRANSFER_TAX_RATES: [Percent; 5] = [dec!(3.5), dec!(5.0), dec!(5.5), dec!(6.0), dec!(6.5)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FederalState {
    BadenWuerttemberg,
    Bayern,
    Berlin,
    Brandenburg,
    Bremen,
    Hamburg,
    Hessen,
    MecklenburgVorpommern,
    Niedersachsen,
    NordrheinWestfalen,
    RheinlandPfalz,
    Saarland,
    Sachsen,
    SachsenAnhalt,
    SchleswigHolstein,
    Thueringen,
}

impl FederalState {
    pub const ALL: [FederalState; 16] = [
        FederalState::BadenWuerttemberg,
        FederalState::Bayern,
        FederalState::Berlin,
        FederalState::Brandenburg,
        FederalState::Bremen,
        FederalState::Hamburg,
        FederalState::Hessen,
        FederalState::MecklenburgVorpommern,
        FederalState::Niedersachsen,
        FederalState::NordrheinWestfalen,
        FederalState::RheinlandPfalz,
        FederalState::Saarland,
        FederalState::Sachsen,
        FederalState::SachsenAnhalt,
        FederalState::SchleswigHolstein,
        FederalState::Thueringen,
    ];

    /// Grunderwerbsteuer in percent of the purchase price.
    pub fn transfer_tax_rate(self) -> Percent {
        match self {
            FederalState::Bayern => dec!(3.5),
            FederalState::BadenWuerttemberg
            | FederalState::Bremen
            | FederalState::Niedersachsen
            | FederalState::RheinlandPfalz
            | FederalState::SachsenAnhalt
            | FederalState::Thueringen => dec!(5.0),
            FederalState::Hamburg | FederalState::Sachsen => dec!(5.5),
            FederalState::Berlin | FederalState::Hessen | FederalState::MecklenburgVorpommern => {
                dec!(6.0)
            }
            FederalState::Brandenburg
            | FederalState::NordrheinWestfalen
            | FederalState::Saarland
            | FederalState::SchleswigHolstein => dec!(6.5),
        }
    }

    /// Machine key, identical to the serde representation.
    pub fn key(self) -> &'static str {
        match self {
            FederalState::BadenWuerttemberg => "baden_wuerttemberg",
            FederalState::Bayern => "bayern",
            FederalState::Berlin => "berlin",
            FederalState::Brandenburg => "brandenburg",
            FederalState::Bremen => "bremen",
            FederalState::Hamburg => "hamburg",
            FederalState::Hessen => "hessen",
            FederalState::MecklenburgVorpommern => "mecklenburg_vorpommern",
            FederalState::Niedersachsen => "niedersachsen",
            FederalState::NordrheinWestfalen => "nordrhein_westfalen",
            FederalState::RheinlandPfalz => "rheinland_pfalz",
            FederalState::Saarland => "saarland",
            FederalState::Sachsen => "sachsen",
            FederalState::SachsenAnhalt => "sachsen_anhalt",
            FederalState::SchleswigHolstein => "schleswig_holstein",
            FederalState::Thueringen => "thueringen",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FederalState::BadenWuerttemberg => "Baden-Württemberg",
            FederalState::Bayern => "Bayern",
            FederalState::Berlin => "Berlin",
            FederalState::Brandenburg => "Brandenburg",
            FederalState::Bremen => "Bremen",
            FederalState::Hamburg => "Hamburg",
            FederalState::Hessen => "Hessen",
            FederalState::MecklenburgVorpommern => "Mecklenburg-Vorpommern",
            FederalState::Niedersachsen => "Niedersachsen",
            FederalState::NordrheinWestfalen => "Nordrhein-Westfalen",
            FederalState::RheinlandPfalz => "Rheinland-Pfalz",
            FederalState::Saarland => "Saarland",
            FederalState::Sachsen => "Sachsen",
            FederalState::SachsenAnhalt => "Sachsen-Anhalt",
            FederalState::SchleswigHolstein => "Schleswig-Holstein",
            FederalState::Thueringen => "Thüringen",
        }
    }
}

impl fmt::Display for FederalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FederalState {
    type Err = KreditError;

    /// Accepts the machine key, with hyphens or underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        FederalState::ALL
            .into_iter()
            .find(|state| state.key() == key)
            .ok_or_else(|| KreditError::InvalidInput {
                field: "federal_state".into(),
                reason: format!("Unknown federal state '{s}'"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_state_maps_into_rate_set() {
        for state in FederalState::ALL {
            assert!(
                TRANSFER_TAX_RATES.contains(&state.transfer_tax_rate()),
                "{state} has rate outside the known set"
            );
        }
    }

    #[test]
    fn test_known_rates() {
        assert_eq!(FederalState::Bayern.transfer_tax_rate(), dec!(3.5));
        assert_eq!(FederalState::Berlin.transfer_tax_rate(), dec!(6.0));
        assert_eq!(FederalState::NordrheinWestfalen.transfer_tax_rate(), dec!(6.5));
    }

    #[test]
    fn test_parse_roundtrips_key() {
        for state in FederalState::ALL {
            assert_eq!(state.key().parse::<FederalState>().unwrap(), state);
        }
        assert_eq!(
            "Nordrhein-Westfalen".parse::<FederalState>().unwrap(),
            FederalState::NordrheinWestfalen
        );
        assert!("atlantis".parse::<FederalState>().is_err());
    }

    #[test]
    fn test_serde_key_matches() {
        let json = serde_json::to_string(&FederalState::SchleswigHolstein).unwrap();
        assert_eq!(json, "\"schleswig_holstein\"");
    }
}
