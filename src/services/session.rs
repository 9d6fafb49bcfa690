//! Session: the binding engine wired together.
//!
//! A [`Session`] owns the keybind-set registry, the active set's actions and
//! bindings, the modifier tracker and the persistence gateway. Every mutation
//! runs as one step: change the active view, rebuild the per-action
//! projections, write the view back into the registry, save, then notify
//! observers. A reader between two calls never sees a half-applied change.

use crate::models::input::device_type_for;
use crate::models::{
    Action, ActionUpdate, BindingEntry, ColorGroup, DeviceType, InputEvent, ModifierCombination,
    RgbColor,
};
use crate::services::{
    ActionRegistry, BindingStore, KeybindSet, KeybindSetRegistry, MemoryStore, ModifierTracker,
    ModifierPhysicalState, Observable, PersistenceGateway,
};
use tracing::debug;

/// Observable state published by a [`Session`].
#[derive(Debug, Default)]
pub struct SessionObservers {
    /// Physical left/right modifier key state (only published on change)
    pub modifier_state: Observable<ModifierPhysicalState>,
    /// Combination of the held modifier keys (only published on change)
    pub raw_modifiers: Observable<ModifierCombination>,
    /// Effective modifier combination (only published on change)
    pub effective_modifiers: Observable<ModifierCombination>,
    /// Currently selected action
    pub selected_action: Observable<Option<Action>>,
    /// Device tab the user is assigning to
    pub selected_device: Observable<DeviceType>,
    /// Every binding of the active set, sorted by key
    pub bindings: Observable<Vec<BindingEntry>>,
    /// Actions of the active set
    pub actions: Observable<Vec<Action>>,
    /// Color groups of the active set
    pub color_groups: Observable<Vec<ColorGroup>>,
    /// All keybind sets
    pub keybind_sets: Observable<Vec<KeybindSet>>,
    /// Id of the active keybind set
    pub selected_set_id: Observable<Option<String>>,
}

/// The binding resolution engine for one user.
#[derive(Debug)]
pub struct Session {
    registry: KeybindSetRegistry,
    actions: ActionRegistry,
    bindings: BindingStore,
    tracker: ModifierTracker,
    selected_action_id: Option<String>,
    selected_device: DeviceType,
    gateway: PersistenceGateway,
    observers: SessionObservers,
}

impl Session {
    /// Loads stored state through `gateway`, creating the default set on a
    /// fresh install or after unreadable data.
    pub fn open(mut gateway: PersistenceGateway) -> Self {
        let outcome = gateway.load();
        let needs_save = outcome.needs_save();
        let registry = outcome.into_registry();
        if needs_save {
            gateway.save(&registry);
        }

        let mut session = Self {
            registry,
            actions: ActionRegistry::default(),
            bindings: BindingStore::new(),
            tracker: ModifierTracker::new(),
            selected_action_id: None,
            selected_device: DeviceType::Keyboard,
            gateway,
            observers: SessionObservers::default(),
        };
        session.load_active_set();
        session.publish();
        session
    }

    /// Session backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::open(PersistenceGateway::new(MemoryStore::new()))
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    /// Observables for subscribing to state changes.
    pub fn observers_mut(&mut self) -> &mut SessionObservers {
        &mut self.observers
    }

    /// Observables for reading the latest published values.
    pub const fn observers(&self) -> &SessionObservers {
        &self.observers
    }

    /// Actions of the active set.
    pub fn actions(&self) -> &[Action] {
        self.actions.actions()
    }

    /// Color groups of the active set.
    pub fn color_groups(&self) -> &[ColorGroup] {
        self.actions.color_groups()
    }

    /// Bindings of the active set.
    pub const fn bindings(&self) -> &BindingStore {
        &self.bindings
    }

    /// All keybind sets and the selection.
    pub const fn keybind_sets(&self) -> &KeybindSetRegistry {
        &self.registry
    }

    /// Looks up an action of the active set.
    pub fn get_action(&self, id: &str) -> Option<&Action> {
        self.actions.get_action(id)
    }

    /// The selected action, if any.
    pub fn selected_action(&self) -> Option<&Action> {
        self.selected_action_id
            .as_deref()
            .and_then(|id| self.actions.get_action(id))
    }

    /// The selected device tab.
    pub const fn selected_device(&self) -> DeviceType {
        self.selected_device
    }

    /// Color of an action, falling back to neutral gray for a deleted group.
    pub fn action_color(&self, action: &Action) -> RgbColor {
        self.actions.action_color(action)
    }

    // ------------------------------------------------------------------
    // Modifier state and resolution
    // ------------------------------------------------------------------

    /// Feeds a raw input event to the modifier tracker and returns the
    /// effective combination afterwards.
    pub fn handle_event(&mut self, event: &InputEvent) -> ModifierCombination {
        self.tracker.handle_event(event);
        self.publish_modifiers();
        self.effective_combination()
    }

    /// Raw combination of the held modifier keys.
    pub const fn raw_combination(&self) -> ModifierCombination {
        self.tracker.combination()
    }

    /// Held modifiers minus those whose own key is bound in the active set.
    pub fn effective_combination(&self) -> ModifierCombination {
        self.tracker
            .effective_combination(|modifier| self.bindings.is_modifier_key_bound(modifier))
    }

    /// Entry bound at `(input_code, modifiers)`.
    pub fn lookup(&self, input_code: &str, modifiers: ModifierCombination) -> Option<&BindingEntry> {
        self.bindings.lookup(input_code, modifiers)
    }

    /// Entry that fires for `input_code` under the current effective
    /// combination.
    pub fn resolve(&self, input_code: &str) -> Option<&BindingEntry> {
        self.lookup(input_code, self.slot_combination(input_code))
    }

    /// Action that fires for `input_code` right now, with its color.
    pub fn action_for(&self, input_code: &str) -> Option<(&Action, RgbColor)> {
        let entry = self.resolve(input_code)?;
        let action = self.actions.get_action(&entry.action_id)?;
        Some((action, self.actions.action_color(action)))
    }

    /// Mouse inputs are always resolved and assigned without modifiers.
    fn slot_combination(&self, input_code: &str) -> ModifierCombination {
        match device_type_for(input_code) {
            DeviceType::Mouse => ModifierCombination::None,
            DeviceType::Keyboard => self.effective_combination(),
        }
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Selects an action, or clears the selection with `None`. An unknown id
    /// is rejected.
    pub fn select_action(&mut self, id: Option<&str>) -> bool {
        match id {
            Some(id) if self.actions.get_action(id).is_none() => return false,
            Some(id) => self.selected_action_id = Some(id.to_string()),
            None => self.selected_action_id = None,
        }
        let selected = self.selected_action().cloned();
        self.observers.selected_action.set(selected);
        true
    }

    /// Switches the device tab used for assignment.
    pub fn select_device(&mut self, device: DeviceType) {
        self.selected_device = device;
        self.observers.selected_device.set_if_changed(device);
    }

    // ------------------------------------------------------------------
    // Actions and color groups
    // ------------------------------------------------------------------

    /// Adds an unmapped action to the active set.
    pub fn add_action(&mut self, name: &str, color_group_id: &str) -> Action {
        let action = self.actions.add_action(name, color_group_id);
        self.commit();
        action
    }

    /// Renames or regroups an action.
    pub fn update_action(&mut self, id: &str, update: ActionUpdate) -> bool {
        self.actions.update_action(id, update) && self.commit()
    }

    /// Deletes an action with all its bindings; clears the selection if it
    /// pointed at the deleted action.
    pub fn delete_action(&mut self, id: &str) -> bool {
        if !self.actions.delete_action(id, &mut self.bindings) {
            return false;
        }
        if self.selected_action_id.as_deref() == Some(id) {
            self.selected_action_id = None;
        }
        self.commit()
    }

    /// Removes every binding of an action but keeps the action.
    pub fn clear_action_mappings(&mut self, id: &str) -> bool {
        if self.actions.get_action(id).is_none() {
            return false;
        }
        let removed = self.bindings.unbind_action(id);
        debug!("Cleared {removed} binding(s) of action {id}");
        self.commit()
    }

    /// Adds a color group to the active set.
    pub fn add_color_group(&mut self, name: &str, color: RgbColor) -> ColorGroup {
        let group = self.actions.add_color_group(name, color);
        self.commit();
        group
    }

    /// Renames and/or recolors a color group.
    pub fn update_color_group(
        &mut self,
        id: &str,
        name: Option<&str>,
        color: Option<RgbColor>,
    ) -> bool {
        self.actions.update_color_group(id, name, color) && self.commit()
    }

    /// Deletes a color group; referencing actions keep the dangling id.
    pub fn delete_color_group(&mut self, id: &str) -> bool {
        self.actions.delete_color_group(id) && self.commit()
    }

    // ------------------------------------------------------------------
    // Bindings
    // ------------------------------------------------------------------

    /// Binds `input_code` under `modifiers` to `action_id`, evicting whatever
    /// held that slot. Returns every entry now owned by the action; empty
    /// (and nothing changes) if the action does not exist.
    pub fn bind(
        &mut self,
        input_code: &str,
        device_type: DeviceType,
        display_name: &str,
        modifiers: ModifierCombination,
        action_id: &str,
    ) -> Vec<BindingEntry> {
        if self.actions.get_action(action_id).is_none() {
            debug!("Ignoring bind to unknown action {action_id}");
            return Vec::new();
        }
        let owned = self
            .bindings
            .bind(input_code, device_type, display_name, modifiers, action_id);
        self.commit();
        owned
    }

    /// Click-to-assign: binds the selected action at the current slot of
    /// `input_code`, or clears that slot when nothing is selected.
    ///
    /// Returns the new entry, or `None` when the slot was cleared.
    pub fn assign_input(
        &mut self,
        input_code: &str,
        device_type: DeviceType,
        display_name: &str,
    ) -> Option<BindingEntry> {
        let modifiers = match device_type {
            DeviceType::Mouse => ModifierCombination::None,
            DeviceType::Keyboard => self.effective_combination(),
        };

        match self.selected_action_id.clone() {
            Some(action_id) => {
                self.bind(input_code, device_type, display_name, modifiers, &action_id);
                self.lookup(input_code, modifiers).cloned()
            }
            None => {
                self.unbind(input_code, modifiers);
                None
            }
        }
    }

    /// Clears one slot. Returns the action that lost the binding.
    pub fn unbind(&mut self, input_code: &str, modifiers: ModifierCombination) -> Option<String> {
        let action_id = self.bindings.unbind(input_code, modifiers)?;
        self.commit();
        Some(action_id)
    }

    // ------------------------------------------------------------------
    // Keybind sets
    // ------------------------------------------------------------------

    /// Creates a set and switches to it.
    pub fn create_set(&mut self, name: &str) -> KeybindSet {
        let set = self.registry.create_set(name);
        self.switch_active_set();
        set
    }

    /// Renames a set.
    pub fn rename_set(&mut self, id: &str, name: &str) -> bool {
        if !self.registry.rename_set(id, name) {
            return false;
        }
        self.gateway.save(&self.registry);
        self.publish_sets();
        true
    }

    /// Deletes a set; the last remaining set is kept.
    pub fn delete_set(&mut self, id: &str) -> bool {
        let was_active = self.registry.selected_id() == Some(id);
        if !self.registry.delete_set(id) {
            return false;
        }
        if was_active {
            self.switch_active_set();
        } else {
            self.gateway.save(&self.registry);
            self.publish_sets();
        }
        true
    }

    /// Makes another set active. Its content replaces the active view
    /// entirely.
    pub fn select_set(&mut self, id: &str) -> bool {
        if self.registry.selected_id() == Some(id) {
            return self.registry.get(id).is_some();
        }
        if !self.registry.select_set(id) {
            return false;
        }
        self.switch_active_set();
        true
    }

    /// Wipes stored data and starts over with a single default set.
    pub fn reset(&mut self) {
        self.gateway.clear();
        self.registry = KeybindSetRegistry::default();
        self.switch_active_set();
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn load_active_set(&mut self) {
        let (actions, bindings, color_groups) = match self.registry.selected() {
            Some(set) => (
                set.actions.clone(),
                set.bindings.clone(),
                set.color_groups.clone(),
            ),
            None => (Vec::new(), BindingStore::new(), Vec::new()),
        };
        self.actions = ActionRegistry::new(actions, color_groups);
        self.bindings = bindings;
        self.actions.sync_key_mappings(&self.bindings);

        if let Some(id) = self.selected_action_id.as_deref() {
            if self.actions.get_action(id).is_none() {
                self.selected_action_id = None;
            }
        }
    }

    fn switch_active_set(&mut self) {
        self.load_active_set();
        self.gateway.save(&self.registry);
        self.publish();
    }

    /// Finishes a mutation of the active view. Always returns `true` so
    /// callers can chain it after a successful precondition.
    fn commit(&mut self) -> bool {
        self.actions.sync_key_mappings(&self.bindings);
        self.registry.update_active_set(
            self.actions.actions().to_vec(),
            self.bindings.clone(),
            self.actions.color_groups().to_vec(),
        );
        self.gateway.save(&self.registry);
        self.publish();
        true
    }

    fn publish(&mut self) {
        self.observers
            .actions
            .set(self.actions.actions().to_vec());
        self.observers
            .color_groups
            .set(self.actions.color_groups().to_vec());
        self.observers
            .bindings
            .set(self.bindings.entries().into_iter().cloned().collect());
        let selected = self.selected_action().cloned();
        self.observers.selected_action.set(selected);
        self.publish_modifiers();
        self.publish_sets();
    }

    fn publish_modifiers(&mut self) {
        self.observers
            .modifier_state
            .set_if_changed(self.tracker.state());
        self.observers
            .raw_modifiers
            .set_if_changed(self.tracker.combination());
        let effective = self.effective_combination();
        self.observers.effective_modifiers.set_if_changed(effective);
    }

    fn publish_sets(&mut self) {
        self.observers
            .keybind_sets
            .set(self.registry.sets().to_vec());
        self.observers
            .selected_set_id
            .set(self.registry.selected_id().map(str::to_string));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session_with_action() -> (Session, String) {
        let mut session = Session::in_memory();
        let group = session.color_groups()[0].id.clone();
        let id = session.add_action("Jump", &group).id;
        (session, id)
    }

    #[test]
    fn test_fresh_session_has_default_set() {
        let session = Session::in_memory();
        assert_eq!(session.keybind_sets().sets().len(), 1);
        assert_eq!(session.color_groups().len(), 1);
        assert!(session.actions().is_empty());
    }

    #[test]
    fn test_bind_updates_projection() {
        let (mut session, id) = session_with_action();
        let owned = session.bind("KeyA", DeviceType::Keyboard, "A", ModifierCombination::None, &id);

        assert_eq!(owned.len(), 1);
        assert_eq!(session.get_action(&id).unwrap().key_mappings.len(), 1);
        let stored = session.keybind_sets().selected().unwrap();
        assert_eq!(stored.bindings.len(), 1);
        assert_eq!(stored.actions[0].key_mappings.len(), 1);
    }

    #[test]
    fn test_bind_unknown_action_is_noop() {
        let mut session = Session::in_memory();
        let owned = session.bind("KeyA", DeviceType::Keyboard, "A", ModifierCombination::None, "x");
        assert!(owned.is_empty());
        assert!(session.bindings().is_empty());
    }

    #[test]
    fn test_eviction_updates_both_actions() {
        let (mut session, first) = session_with_action();
        let group = session.color_groups()[0].id.clone();
        let second = session.add_action("Crouch", &group).id;

        session.bind("KeyA", DeviceType::Keyboard, "A", ModifierCombination::None, &first);
        session.bind("KeyB", DeviceType::Keyboard, "B", ModifierCombination::None, &first);
        session.bind("KeyA", DeviceType::Keyboard, "A", ModifierCombination::None, &second);

        assert_eq!(session.get_action(&first).unwrap().key_mappings.len(), 1);
        assert_eq!(session.get_action(&second).unwrap().key_mappings.len(), 1);
        assert_eq!(session.lookup("KeyB", ModifierCombination::None).unwrap().action_id, first);
    }

    #[test]
    fn test_bound_modifier_is_suppressed() {
        let (mut session, id) = session_with_action();
        session.bind("ControlLeft", DeviceType::Keyboard, "Ctrl", ModifierCombination::None, &id);
        session.bind("KeyX", DeviceType::Keyboard, "X", ModifierCombination::None, &id);

        session.handle_event(&InputEvent::press("ControlRight"));
        assert_eq!(session.raw_combination(), ModifierCombination::Ctrl);
        assert_eq!(session.effective_combination(), ModifierCombination::None);
        assert!(session.resolve("KeyX").is_some());
    }

    #[test]
    fn test_assign_input_uses_effective_combination() {
        let (mut session, id) = session_with_action();
        assert!(session.select_action(Some(&id)));

        session.handle_event(&InputEvent::press("ShiftLeft"));
        let entry = session.assign_input("KeyA", DeviceType::Keyboard, "A").unwrap();
        assert_eq!(entry.modifier_combination, ModifierCombination::Shift);

        let entry = session.assign_input("MouseLeft", DeviceType::Mouse, "Left Click").unwrap();
        assert_eq!(entry.modifier_combination, ModifierCombination::None);
    }

    #[test]
    fn test_assign_input_without_selection_clears_slot() {
        let (mut session, id) = session_with_action();
        session.bind("KeyA", DeviceType::Keyboard, "A", ModifierCombination::None, &id);

        assert!(session.assign_input("KeyA", DeviceType::Keyboard, "A").is_none());
        assert!(session.lookup("KeyA", ModifierCombination::None).is_none());
        assert!(session.get_action(&id).unwrap().is_unmapped());
    }

    #[test]
    fn test_delete_selected_action_clears_selection() {
        let (mut session, id) = session_with_action();
        session.select_action(Some(&id));
        session.bind("KeyA", DeviceType::Keyboard, "A", ModifierCombination::None, &id);

        assert!(session.delete_action(&id));
        assert!(session.selected_action().is_none());
        assert!(session.bindings().is_empty());
        assert!(!session.delete_action(&id));
    }

    #[test]
    fn test_select_action_rejects_unknown() {
        let (mut session, id) = session_with_action();
        session.select_action(Some(&id));
        assert!(!session.select_action(Some("missing")));
        assert_eq!(session.selected_action().unwrap().id, id);
        assert!(session.select_action(None));
        assert!(session.selected_action().is_none());
    }

    #[test]
    fn test_clear_action_mappings_keeps_action() {
        let (mut session, id) = session_with_action();
        session.bind("KeyA", DeviceType::Keyboard, "A", ModifierCombination::None, &id);
        session.bind("KeyA", DeviceType::Keyboard, "A", ModifierCombination::Alt, &id);

        assert!(session.clear_action_mappings(&id));
        assert!(session.get_action(&id).unwrap().is_unmapped());
        assert!(session.bindings().is_empty());
        assert!(!session.clear_action_mappings("missing"));
    }

    #[test]
    fn test_action_for_uses_fallback_color() {
        let (mut session, id) = session_with_action();
        session.bind("KeyA", DeviceType::Keyboard, "A", ModifierCombination::None, &id);
        let (_, color) = session.action_for("KeyA").unwrap();
        assert_eq!(color, RgbColor::DEFAULT_GROUP);

        let group = session.color_groups()[0].id.clone();
        assert!(session.delete_color_group(&group));
        let (action, color) = session.action_for("KeyA").unwrap();
        assert_eq!(action.id, id);
        assert_eq!(color, RgbColor::FALLBACK);
    }

    #[test]
    fn test_observers_receive_updates() {
        let (mut session, id) = session_with_action();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session
            .observers_mut()
            .bindings
            .subscribe(move |entries| sink.borrow_mut().push(entries.len()));

        session.bind("KeyA", DeviceType::Keyboard, "A", ModifierCombination::None, &id);
        session.unbind("KeyA", ModifierCombination::None);
        assert_eq!(*seen.borrow(), vec![0, 1, 0]);
    }

    #[test]
    fn test_modifier_observer_only_fires_on_change() {
        let mut session = Session::in_memory();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session
            .observers_mut()
            .effective_modifiers
            .subscribe(move |combo| sink.borrow_mut().push(*combo));

        session.handle_event(&InputEvent::press("ShiftLeft"));
        session.handle_event(&InputEvent::press("ShiftRight"));
        session.handle_event(&InputEvent::FocusChanged { focused: false });
        assert_eq!(
            *seen.borrow(),
            vec![
                ModifierCombination::None,
                ModifierCombination::Shift,
                ModifierCombination::None
            ]
        );
    }

    #[test]
    fn test_switching_sets_swaps_content() {
        let (mut session, id) = session_with_action();
        let group = session.add_color_group("Combat", RgbColor::new(0xFF, 0x44, 0x44));
        let fire = session.add_action("Fire", &group.id).id;
        session.bind("KeyA", DeviceType::Keyboard, "A", ModifierCombination::None, &id);
        session.bind("KeyA", DeviceType::Keyboard, "A", ModifierCombination::Shift, &fire);
        session.bind("MouseLeft", DeviceType::Mouse, "Left Click", ModifierCombination::None, &fire);
        let first = session.keybind_sets().selected_id().unwrap().to_string();

        let actions = session.actions().to_vec();
        let bindings = session.bindings().clone();
        let color_groups = session.color_groups().to_vec();

        let second = session.create_set("Second").id;
        assert!(session.actions().is_empty());
        assert!(session.bindings().is_empty());
        assert_eq!(session.color_groups().len(), 1);
        assert!(session.lookup("KeyA", ModifierCombination::None).is_none());

        let default_group = session.color_groups()[0].id.clone();
        let other = session.add_action("Accelerate", &default_group).id;
        session.bind("KeyA", DeviceType::Keyboard, "A", ModifierCombination::None, &other);

        assert!(session.select_set(&first));
        assert_eq!(session.actions(), actions.as_slice());
        assert_eq!(*session.bindings(), bindings);
        assert_eq!(session.color_groups(), color_groups.as_slice());

        assert!(session.delete_set(&second));
        assert!(!session.delete_set(&first));
    }

    #[test]
    fn test_create_operations_accept_any_name() {
        let mut session = Session::in_memory();
        let group = session.color_groups()[0].id.clone();
        let long = "x".repeat(51);

        let action = session.add_action(&long, &group);
        assert_eq!(action.name, long);
        assert_eq!(session.get_action(&action.id).unwrap().name, long);
        assert!(session.update_action(&action.id, ActionUpdate::name(long.clone() + "y")));

        let color_group = session.add_color_group(&long, RgbColor::new(1, 2, 3));
        assert!(session.update_color_group(&color_group.id, Some(""), None));

        let set = session.create_set(&long);
        assert_eq!(session.keybind_sets().selected_id(), Some(set.id.as_str()));
        assert!(session.rename_set(&set.id, &long));
    }

    #[test]
    fn test_raw_modifier_observers_track_held_keys() {
        let (mut session, id) = session_with_action();
        session.bind("ShiftLeft", DeviceType::Keyboard, "Shift", ModifierCombination::None, &id);

        let raw = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&raw);
        session
            .observers_mut()
            .raw_modifiers
            .subscribe(move |combo| sink.borrow_mut().push(*combo));

        session.handle_event(&InputEvent::press("ShiftRight"));
        session.handle_event(&InputEvent::press("ControlLeft"));
        session.handle_event(&InputEvent::release("ShiftRight"));

        assert_eq!(
            *raw.borrow(),
            vec![
                ModifierCombination::None,
                ModifierCombination::Shift,
                ModifierCombination::CtrlShift,
                ModifierCombination::Ctrl
            ]
        );
        assert_eq!(*session.observers().effective_modifiers.get(), ModifierCombination::Ctrl);

        let state = session.observers().modifier_state.get();
        assert!(state.ctrl_left);
        assert!(!state.shift_right);

        session.handle_event(&InputEvent::FocusChanged { focused: false });
        assert_eq!(
            *session.observers().modifier_state.get(),
            ModifierPhysicalState::default()
        );
        assert_eq!(*session.observers().raw_modifiers.get(), ModifierCombination::None);
    }

    #[test]
    fn test_select_device_publishes_changes_only() {
        let mut session = Session::in_memory();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session
            .observers_mut()
            .selected_device
            .subscribe(move |device| sink.borrow_mut().push(*device));

        session.select_device(DeviceType::Mouse);
        session.select_device(DeviceType::Mouse);
        assert_eq!(session.selected_device(), DeviceType::Mouse);
        assert_eq!(*seen.borrow(), vec![DeviceType::Keyboard, DeviceType::Mouse]);
    }

    #[test]
    fn test_reset_returns_to_default() {
        let (mut session, _) = session_with_action();
        session.create_set("Other");
        session.reset();
        assert_eq!(session.keybind_sets().sets().len(), 1);
        assert!(session.actions().is_empty());
    }
}
