use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Construction phase a line item is required for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum Phase {
    Preparation,
    Seal,
    Asphalt,
}

impl TryFrom<String> for Phase {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_three_phases() {
        assert_eq!("Preparation".parse::<Phase>().unwrap(), Phase::Preparation);
        assert_eq!("Seal".parse::<Phase>().unwrap(), Phase::Seal);
        assert_eq!("Asphalt".parse::<Phase>().unwrap(), Phase::Asphalt);
    }

    #[test]
    fn unknown_phase_is_rejected() {
        assert!("Cleanup".parse::<Phase>().is_err());
    }

    #[test]
    fn display_round_trips() {
        assert_eq!(Phase::Seal.to_string(), "Seal");
    }
}
