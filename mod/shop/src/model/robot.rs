use serde::{Deserialize, Serialize};

/// The fixed set of robot models accepted by both intake paths.
pub const VALID_MODELS: &[&str] = &["R2", "13", "X5"];

/// Robot — one produced unit. Append-only; never updated after intake.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Robot {
    /// Generated ID — primary key.
    pub id: String,

    /// Matching key against pending orders: `"{model}-{version}"`.
    /// Compared exactly, case-sensitive, no normalization.
    pub serial: String,

    /// Model name — one of [`VALID_MODELS`].
    pub model: String,

    /// Version string (free-form).
    pub version: String,

    /// Production timestamp in the `YYYY-MM-DD HH:MM:SS` wire format.
    pub created: String,
}

/// Whether `model` is a member of the fixed allowed set.
pub fn is_valid_model(model: &str) -> bool {
    VALID_MODELS.contains(&model)
}

/// The serial assigned at intake.
pub fn derive_serial(model: &str, version: &str) -> String {
    format!("{model}-{version}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn robot_json_roundtrip() {
        let r = Robot {
            id: "abc".into(),
            serial: "R2-D2".into(),
            model: "R2".into(),
            version: "D2".into(),
            created: "2024-01-15 09:30:00".into(),
        };
        let json = serde_json::to_string(&r).unwrap();
        let back: Robot = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }

    #[test]
    fn model_membership_is_exact() {
        assert!(is_valid_model("R2"));
        assert!(is_valid_model("13"));
        assert!(is_valid_model("X5"));
        assert!(!is_valid_model("r2"));
        assert!(!is_valid_model("BadModel"));
        assert!(!is_valid_model(""));
    }

    #[test]
    fn serial_is_model_dash_version() {
        assert_eq!(derive_serial("R2", "D2"), "R2-D2");
        assert_eq!(derive_serial("X5", "LT"), "X5-LT");
    }
}
