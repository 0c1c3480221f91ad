use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum League {
    Gold,
    Silver,
    Bronze,
    Unranked,
}

impl League {
    pub const GOLD_POINTS: u64 = 120;
    pub const SILVER_POINTS: u64 = 60;
    pub const BRONZE_POINTS: u64 = 30;

    pub fn from_points(points: u64) -> Self {
        if points >= Self::GOLD_POINTS {
            League::Gold
        } else if points >= Self::SILVER_POINTS {
            League::Silver
        } else if points >= Self::BRONZE_POINTS {
            League::Bronze
        } else {
            League::Unranked
        }
    }

    pub fn tier_name(&self) -> &'static str {
        match self {
            League::Gold => "gold",
            League::Silver => "silver",
            League::Bronze => "bronze",
            League::Unranked => "unranked",
        }
    }

    pub fn display_label(&self) -> &'static str {
        match self {
            League::Gold => "🏆 Gold League",
            League::Silver => "🥈 Silver League",
            League::Bronze => "🥉 Bronze League",
            League::Unranked => "Contributor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(League::from_points(0), League::Unranked);
        assert_eq!(League::from_points(29), League::Unranked);
        assert_eq!(League::from_points(30), League::Bronze);
        assert_eq!(League::from_points(59), League::Bronze);
        assert_eq!(League::from_points(60), League::Silver);
        assert_eq!(League::from_points(119), League::Silver);
        assert_eq!(League::from_points(120), League::Gold);
        assert_eq!(League::from_points(5000), League::Gold);
    }

    #[test]
    fn tiers_order_from_best_to_worst() {
        assert!(League::Gold < League::Silver);
        assert!(League::Bronze < League::Unranked);
    }

    #[test]
    fn labels() {
        assert_eq!(League::Gold.tier_name(), "gold");
        assert_eq!(League::Unranked.display_label(), "Contributor");
    }
}
