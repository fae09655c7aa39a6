//! Radius profiles for tapering tube meshes along a path.

use serde::{Deserialize, Serialize};

/// Maps `(sample index, cumulative distance)` along a path to a tube radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RadiusProfile {
    /// `numerator / (index + offset)`; independent of distance.
    Hyperbolic { numerator: f64, offset: f64 },
    /// Same radius everywhere.
    Constant { radius: f64 },
}

impl RadiusProfile {
    /// The axon taper `5 / (index + 4)`: radius 1.25 at the nucleus, thinning outward.
    pub const AXON: RadiusProfile = RadiusProfile::Hyperbolic {
        numerator: 5.0,
        offset: 4.0,
    };

    pub fn radius_at(&self, index: usize, _distance: f64) -> f64 {
        match *self {
            RadiusProfile::Hyperbolic { numerator, offset } => numerator / (index as f64 + offset),
            RadiusProfile::Constant { radius } => radius,
        }
    }
}

impl Default for RadiusProfile {
    fn default() -> Self {
        Self::AXON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axon_taper() {
        let profile = RadiusProfile::AXON;
        assert_eq!(profile.radius_at(0, 0.0), 1.25);
        assert_eq!(profile.radius_at(1, 0.0), 1.0);
        assert_eq!(profile.radius_at(46, 0.0), 0.1);
        // distance has no influence
        assert_eq!(profile.radius_at(6, 0.0), profile.radius_at(6, 123.0));
    }

    #[test]
    fn test_constant() {
        let profile = RadiusProfile::Constant { radius: 0.5 };
        assert_eq!(profile.radius_at(0, 0.0), 0.5);
        assert_eq!(profile.radius_at(99, 10.0), 0.5);
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_string(&RadiusProfile::AXON).unwrap();
        assert_eq!(json, r#"{"kind":"hyperbolic","numerator":5.0,"offset":4.0}"#);
        let back: RadiusProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RadiusProfile::AXON);
    }
}
