//! Field mapping between the wizard's vocabulary and the backend's
//!
//! Every renamed key lives in this one table and both directions read from it,
//! so a draft sent out and read back lands on the same fields.

use crate::domain::value_objects::Action;

/// (internal action, backend key)
const ACTION_KEYS: [(Action, &str); 12] = [
    (Action::Hunt, "hunt"),
    (Action::Study, "study"),
    (Action::Survey, "survey"),
    (Action::Tinker, "tinker"),
    (Action::Finesse, "finesse"),
    (Action::Prowl, "prowl"),
    (Action::Skirmish, "skirmish"),
    (Action::Wreck, "wreck"),
    (Action::Bizarre, "attune"),
    (Action::Command, "command"),
    (Action::Consort, "consort"),
    (Action::Sway, "sway"),
];

/// Backend key for an action
pub fn action_to_external(action: Action) -> &'static str {
    ACTION_KEYS
        .iter()
        .find(|(internal, _)| *internal == action)
        .map(|(_, external)| *external)
        // The table covers every variant.
        .unwrap_or_else(|| action.as_str())
}

/// Action for a backend key; accepts any letter case
pub fn action_from_external(key: &str) -> Option<Action> {
    ACTION_KEYS
        .iter()
        .find(|(_, external)| external.eq_ignore_ascii_case(key))
        .map(|(internal, _)| *internal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bizarre_is_attune_on_the_wire() {
        assert_eq!(action_to_external(Action::Bizarre), "attune");
        assert_eq!(action_from_external("attune"), Some(Action::Bizarre));
        assert_eq!(action_from_external("ATTUNE"), Some(Action::Bizarre));
        assert_eq!(action_from_external("bizarre"), None);
    }

    #[test]
    fn test_table_is_a_bijection() {
        for action in Action::ALL {
            assert_eq!(action_from_external(action_to_external(action)), Some(action));
        }
        let mut keys: Vec<_> = ACTION_KEYS.iter().map(|(_, key)| *key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), Action::ALL.len());
    }
}
