use crate::{Status, TargetType};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Named animation routines an action can play.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum AnimationKind {
    /// The caster lunges at its opponent.
    Spin,
    /// A coloured orb flies from the caster to its opponent.
    Glob,
}

/// How a state change touches the status slot.
///
/// Absence (`None` on the owning step) leaves the status alone; `Clear`
/// removes whatever status is present.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Set(Status),
    Clear,
}

/// One declarative step of an action. Steps run in declaration order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum EffectStep {
    /// Text with optional `{CASTER}`, `{ACTION}` and `{TARGET}` placeholders.
    TextMessage { text: String },
    Animation {
        animation: AnimationKind,
        #[serde(default)]
        color: Option<String>,
    },
    /// Damage always lands on the target. Recovery and status land on the
    /// caster when `on_caster` is set, otherwise on the target.
    StateChange {
        #[serde(default)]
        damage: Option<u32>,
        #[serde(default)]
        recover: Option<u32>,
        #[serde(default)]
        status: Option<StatusChange>,
        #[serde(default)]
        on_caster: bool,
    },
}

impl EffectStep {
    pub fn text(text: impl Into<String>) -> Self {
        EffectStep::TextMessage { text: text.into() }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ActionData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_type: TargetType,
    pub effects: Vec<EffectStep>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StatusKind;

    #[test]
    fn test_state_change_fields_default_when_omitted() {
        let step: EffectStep = ron::from_str("StateChange(damage: Some(10))").unwrap();
        assert_eq!(
            step,
            EffectStep::StateChange {
                damage: Some(10),
                recover: None,
                status: None,
                on_caster: false,
            }
        );
    }

    #[test]
    fn test_status_set_and_clear_parse() {
        let set: EffectStep = ron::from_str(
            "StateChange(status: Some(Set((kind: Clumsy, expires_in: 3))))",
        )
        .unwrap();
        let clear: EffectStep = ron::from_str("StateChange(status: Some(Clear))").unwrap();

        assert!(matches!(
            set,
            EffectStep::StateChange { status: Some(StatusChange::Set(Status { kind: StatusKind::Clumsy, expires_in: 3 })), .. }
        ));
        assert!(matches!(
            clear,
            EffectStep::StateChange { status: Some(StatusChange::Clear), .. }
        ));
    }
}
