//=========================================================================
// Game State Store
//=========================================================================
//
// Single source of truth with change-aware notification.
//
// Architecture:
//   update(patch) → snapshot old → apply → diff → release borrow
//                                                     ↓ (non-empty diff)
//                              EventBus::publish("stateChanged", ...)
//
// Subscribers run after the write is complete and the borrow released,
// so reads from inside a handler see the fully applied state and may
// even issue further updates.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use serde_json::Value;

//=== Internal Dependencies ===============================================

use super::{Field, FieldValue, GameState, StateChange, StatePatch};
use crate::core::error::StateError;
use crate::core::event_bus::{names, EventBus, EventPayload};

//=== GameStateStore ======================================================

/// Owns the live [`GameState`] and publishes its changes.
///
/// The only way to mutate the record is [`update`](Self::update),
/// [`update_json`](Self::update_json) or
/// [`reset_state`](Self::reset_state). Reads hand out copies.
pub struct GameStateStore {
    state: RefCell<GameState>,
    bus: Rc<EventBus>,
}

impl GameStateStore {
    /// Creates a store with all fields zeroed.
    pub fn new(bus: Rc<EventBus>) -> Self {
        Self {
            state: RefCell::new(GameState::default()),
            bus,
        }
    }

    //--- Reads ------------------------------------------------------------

    /// Returns the current value of one field.
    pub fn get(&self, field: Field) -> FieldValue {
        self.state.borrow().get(field)
    }

    /// Returns the current value of the field named `name`.
    pub fn get_by_name(&self, name: &str) -> Result<FieldValue, StateError> {
        Ok(self.get(name.parse()?))
    }

    /// Returns an independent copy of the full record.
    pub fn snapshot(&self) -> GameState {
        self.state.borrow().clone()
    }

    pub fn current_word(&self) -> String {
        self.state.borrow().current_word.clone()
    }

    pub fn scrambled_word(&self) -> String {
        self.state.borrow().scrambled_word.clone()
    }

    pub fn score(&self) -> u32 {
        self.state.borrow().score
    }

    pub fn hint_used(&self) -> bool {
        self.state.borrow().hint_used
    }

    pub fn available_words(&self) -> Vec<String> {
        self.state.borrow().available_words.clone()
    }

    //--- Writes -----------------------------------------------------------

    /// Applies `patch` and publishes `stateChanged` if any value changed.
    ///
    /// Returns the change record; it is empty when the patch left every
    /// field at its prior value, in which case no event fires.
    pub fn update(&self, patch: StatePatch) -> StateChange {
        let (old_state, new_state, changes) = {
            let mut state = self.state.borrow_mut();
            let old_state = state.clone();
            patch.apply_to(&mut state);
            let changes = StateChange::between(&old_state, &state);
            (old_state, state.clone(), changes)
        };

        if changes.is_empty() {
            debug!("State update produced no changes");
            return changes;
        }

        debug!(
            "State changed: {:?}",
            changes.fields().map(Field::as_str).collect::<Vec<_>>()
        );

        self.bus.publish(
            names::STATE_CHANGED,
            &EventPayload::StateChanged {
                changes: changes.clone(),
                old_state,
                new_state,
            },
        );
        changes
    }

    /// Applies an untyped JSON patch, as sent by browser-side glue.
    ///
    /// Rejects anything that is not a JSON object, names an unknown field,
    /// or carries a value of the wrong type. On rejection the state is
    /// left untouched and nothing is published.
    pub fn update_json(&self, patch: &Value) -> Result<StateChange, StateError> {
        let Value::Object(fields) = patch else {
            let kind = json_kind(patch);
            warn!("Rejected state update: expected object, got {}", kind);
            return Err(StateError::NotARecord(kind));
        };

        if let Some(unknown) = fields.keys().find(|key| key.parse::<Field>().is_err()) {
            warn!("Rejected state update: unknown field '{}'", unknown);
            return Err(StateError::UnknownField(unknown.clone()));
        }

        let patch: StatePatch = serde_json::from_value(patch.clone()).map_err(|err| {
            warn!("Rejected state update: {}", err);
            StateError::from(err)
        })?;

        Ok(self.update(patch))
    }

    /// Restores every field to its zero value and publishes `stateReset`.
    ///
    /// The event fires unconditionally, even when the state was already
    /// zeroed.
    pub fn reset_state(&self) {
        let old_state = self.state.replace(GameState::default());
        info!("Game state reset (score was {})", old_state.score);

        self.bus.publish(
            names::STATE_RESET,
            &EventPayload::StateReset {
                old_state,
                new_state: GameState::default(),
            },
        );
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::core::event_bus::handler;

    fn store_with_log() -> (GameStateStore, Rc<RefCell<Vec<EventPayload>>>) {
        let bus = Rc::new(EventBus::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        for event in [names::STATE_CHANGED, names::STATE_RESET] {
            let log = log.clone();
            bus.subscribe(
                event,
                handler(move |payload| {
                    log.borrow_mut().push(payload.clone());
                    Ok(())
                }),
            )
            .unwrap();
        }
        (GameStateStore::new(bus), log)
    }

    #[test]
    fn new_store_starts_zeroed() {
        let (store, _) = store_with_log();
        assert_eq!(store.snapshot(), GameState::default());
        assert_eq!(store.get(Field::Score), FieldValue::Number(0));
    }

    #[test]
    fn update_publishes_exact_diff_with_copies() {
        let (store, log) = store_with_log();
        store.update(StatePatch::new().current_word("cat").score(5));

        let changes = store.update(StatePatch::new().current_word("dog").score(5));
        assert_eq!(changes.fields().collect::<Vec<_>>(), vec![Field::CurrentWord]);

        let log = log.borrow();
        assert_eq!(log.len(), 2);
        let EventPayload::StateChanged {
            changes,
            old_state,
            new_state,
        } = &log[1]
        else {
            panic!("expected stateChanged, got {:?}", log[1]);
        };
        assert_eq!(changes.len(), 1);
        assert_eq!(old_state.current_word, "cat");
        assert_eq!(new_state.current_word, "dog");
        assert_eq!(new_state.score, 5);
    }

    #[test]
    fn no_op_update_publishes_nothing() {
        let (store, log) = store_with_log();
        store.update(StatePatch::new().score(3));
        log.borrow_mut().clear();

        let changes = store.update(StatePatch::new().score(3));
        assert!(changes.is_empty());

        let changes = store.update(StatePatch::new());
        assert!(changes.is_empty());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn snapshot_is_copy_on_read() {
        let (store, _) = store_with_log();
        store.update(StatePatch::new().available_words(vec!["cat".to_string()]));

        let mut copy = store.snapshot();
        copy.available_words.clear();
        copy.score = 99;

        assert_eq!(store.available_words(), vec!["cat".to_string()]);
        assert_eq!(store.score(), 0);
    }

    #[test]
    fn subscriber_sees_fully_applied_state() {
        let bus = Rc::new(EventBus::new());
        let store = Rc::new(GameStateStore::new(bus.clone()));
        let observed = Rc::new(RefCell::new(None));

        let reader = store.clone();
        let sink = observed.clone();
        bus.subscribe(
            names::STATE_CHANGED,
            handler(move |_| {
                *sink.borrow_mut() = Some(reader.snapshot());
                Ok(())
            }),
        )
        .unwrap();

        store.update(
            StatePatch::new()
                .current_word("cat")
                .scrambled_word("tac")
                .score(10),
        );

        let seen = observed.borrow().clone().unwrap();
        assert_eq!(seen.current_word, "cat");
        assert_eq!(seen.scrambled_word, "tac");
        assert_eq!(seen.score, 10);
    }

    #[test]
    fn subscriber_may_update_reentrantly() {
        let bus = Rc::new(EventBus::new());
        let store = Rc::new(GameStateStore::new(bus.clone()));

        let writer = store.clone();
        bus.subscribe(
            names::STATE_CHANGED,
            handler(move |payload| {
                if let EventPayload::StateChanged { changes, .. } = payload {
                    if changes.contains(Field::CurrentWord) {
                        writer.update(StatePatch::new().hint_used(false));
                    }
                }
                Ok(())
            }),
        )
        .unwrap();

        store.update(StatePatch::new().hint_used(true));
        store.update(StatePatch::new().current_word("owl"));
        assert!(!store.hint_used());
    }

    #[test]
    fn update_json_rejects_non_records() {
        let (store, log) = store_with_log();

        for bad in [json!(null), json!(3), json!("score"), json!([1, 2])] {
            assert!(matches!(
                store.update_json(&bad),
                Err(StateError::NotARecord(_))
            ));
        }
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn update_json_rejects_unknown_fields_and_bad_types() {
        let (store, _) = store_with_log();

        assert!(matches!(
            store.update_json(&json!({"score": 1, "lives": 3})),
            Err(StateError::UnknownField(name)) if name == "lives"
        ));
        assert!(matches!(
            store.update_json(&json!({"score": "ten"})),
            Err(StateError::InvalidPatch { .. })
        ));
        assert!(matches!(
            store.update_json(&json!({"score": -1})),
            Err(StateError::InvalidPatch { .. })
        ));
        assert_eq!(store.score(), 0);
    }

    #[test]
    fn update_json_applies_valid_patch() {
        let (store, _) = store_with_log();
        let changes = store
            .update_json(&json!({"currentWord": "fox", "availableWords": ["owl"]}))
            .unwrap();

        assert_eq!(changes.len(), 2);
        assert_eq!(store.current_word(), "fox");
        assert_eq!(
            store.get_by_name("availableWords").unwrap(),
            FieldValue::Words(vec!["owl".to_string()])
        );
    }

    #[test]
    fn reset_restores_zero_values_and_reports_prior_state() {
        let (store, log) = store_with_log();
        store.update(
            StatePatch::new()
                .current_word("cat")
                .score(25)
                .available_words(vec!["dog".to_string()]),
        );
        store.update(StatePatch::new().score(35));
        log.borrow_mut().clear();

        store.reset_state();

        assert_eq!(store.score(), 0);
        assert_eq!(store.current_word(), "");
        assert!(store.available_words().is_empty());

        let log = log.borrow();
        assert_eq!(log.len(), 1);
        let EventPayload::StateReset {
            old_state,
            new_state,
        } = &log[0]
        else {
            panic!("expected stateReset, got {:?}", log[0]);
        };
        assert_eq!(old_state.score, 35);
        assert_eq!(old_state.current_word, "cat");
        assert_eq!(*new_state, GameState::default());
    }

    #[test]
    fn reset_publishes_even_when_already_zeroed() {
        let (store, log) = store_with_log();
        store.reset_state();
        assert_eq!(log.borrow().len(), 1);
    }
}
