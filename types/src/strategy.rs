//! Yield strategy lookup.
//!
//! Rooms are created against one of three backend yield strategies. The
//! client only needs the id/name mapping and the advertised APY for display.

/// Advertised APY (percent) when the strategy is unknown.
pub const DEFAULT_STRATEGY_APY: u32 = 5;

/// A room's yield strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Conservative,
    Balanced,
    Aggressive,
}

impl Strategy {
    /// Map a backend strategy id to a strategy, if known.
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Self::Conservative),
            2 => Some(Self::Balanced),
            3 => Some(Self::Aggressive),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "conservative" => Some(Self::Conservative),
            "balanced" => Some(Self::Balanced),
            "aggressive" => Some(Self::Aggressive),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
        }
    }

    /// Advertised APY in percent.
    pub fn apy(&self) -> u32 {
        match self {
            Self::Conservative => 5,
            Self::Balanced => 10,
            Self::Aggressive => 15,
        }
    }
}

/// APY for a backend strategy id, falling back to the default for unknown ids.
pub fn apy_for_id(id: u32) -> u32 {
    Strategy::from_id(id).map_or(DEFAULT_STRATEGY_APY, |s| s.apy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids_map() {
        assert_eq!(Strategy::from_id(2), Some(Strategy::Balanced));
        assert_eq!(apy_for_id(3), 15);
    }

    #[test]
    fn unknown_id_falls_back() {
        assert_eq!(Strategy::from_id(9), None);
        assert_eq!(apy_for_id(9), DEFAULT_STRATEGY_APY);
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        assert_eq!(Strategy::from_name("Aggressive"), Some(Strategy::Aggressive));
        assert_eq!(Strategy::from_name("unknown"), None);
    }
}
