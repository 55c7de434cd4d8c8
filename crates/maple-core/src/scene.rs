//! Story graph content: scenes, choices and stat effects.

use serde::{Deserialize, Serialize};

/// Signed stat deltas carried by a choice.
///
/// Absent keys decode as zero. Keys outside the tracked stat set are
/// rejected rather than dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatEffects {
    /// Honor delta.
    pub honor: i64,
    /// Rage delta.
    pub rage: i64,
    /// Karma delta.
    pub karma: i64,
}

/// An edge out of a scene. Its id is unique within the parent scene only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Choice identifier, scoped to the parent scene.
    pub id: String,
    /// Display text.
    #[serde(default)]
    pub text: String,
    /// Target scene identifier. Checked only when a player travels it.
    pub next: String,
    /// Stat deltas applied when the choice is taken.
    #[serde(default)]
    pub effects: StatEffects,
}

/// An immutable node in the story graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene identifier, unique within the content store.
    pub id: String,
    /// Display text.
    #[serde(default)]
    pub text: String,
    /// Ordered choices offered to the player.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_effect_keys_default_to_zero() {
        let effects: StatEffects = serde_json::from_str(r#"{"rage": 2}"#).unwrap();

        assert_eq!(
            effects,
            StatEffects {
                honor: 0,
                rage: 2,
                karma: 0,
            }
        );
    }

    #[test]
    fn test_unknown_effect_key_is_rejected() {
        let result: Result<StatEffects, _> = serde_json::from_str(r#"{"luck": 1}"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_choice_without_effects_decodes_with_zero_effects() {
        let choice: Choice =
            serde_json::from_str(r#"{"id": "wait", "next": "courtyard"}"#).unwrap();

        assert_eq!(choice.effects, StatEffects::default());
        assert!(choice.text.is_empty());
    }
}
