//! Actions and color groups of the active keybind set.

use crate::models::{Action, ActionUpdate, BindingEntry, ColorGroup, RgbColor};
use crate::services::BindingStore;
use tracing::debug;

/// Owns the ordered actions and color groups of the active set.
///
/// Unknown ids are rejected as a no-op; the boolean results tell the caller
/// whether anything changed. Names are stored as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionRegistry {
    actions: Vec<Action>,
    color_groups: Vec<ColorGroup>,
}

impl ActionRegistry {
    /// Creates a registry over existing content.
    pub const fn new(actions: Vec<Action>, color_groups: Vec<ColorGroup>) -> Self {
        Self {
            actions,
            color_groups,
        }
    }

    /// Actions in display order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Color groups in display order.
    pub fn color_groups(&self) -> &[ColorGroup] {
        &self.color_groups
    }

    /// Looks up an action by id.
    pub fn get_action(&self, id: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Looks up a color group by id.
    pub fn get_color_group(&self, id: &str) -> Option<&ColorGroup> {
        self.color_groups.iter().find(|g| g.id == id)
    }

    /// Appends a new unmapped action and returns it. Always succeeds.
    ///
    /// Names need not be unique. The group id is not checked: a dangling
    /// reference just renders with the fallback color.
    pub fn add_action(&mut self, name: &str, color_group_id: &str) -> Action {
        let action = Action::new(name, color_group_id);
        debug!("Added action '{}' ({})", action.name, action.id);
        self.actions.push(action.clone());
        action
    }

    /// Applies `update` to the action with `id`. Returns `false` if the id is
    /// unknown; nothing changes in that case.
    pub fn update_action(&mut self, id: &str, update: ActionUpdate) -> bool {
        let Some(action) = self.actions.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        if let Some(name) = update.name {
            action.name = name;
        }
        if let Some(group_id) = update.color_group_id {
            action.color_group_id = group_id;
        }
        true
    }

    /// Removes the action and every binding that references it.
    ///
    /// Deleting an unknown id is a no-op returning `false`.
    pub fn delete_action(&mut self, id: &str, bindings: &mut BindingStore) -> bool {
        let Some(index) = self.actions.iter().position(|a| a.id == id) else {
            return false;
        };
        let removed = self.actions.remove(index);
        let unbound = bindings.unbind_action(id);
        debug!(
            "Deleted action '{}' and {} binding(s)",
            removed.name, unbound
        );
        true
    }

    /// Color of the action's group, or [`RgbColor::FALLBACK`] if the group
    /// no longer exists.
    pub fn action_color(&self, action: &Action) -> RgbColor {
        self.get_color_group(&action.color_group_id)
            .map_or(RgbColor::FALLBACK, |group| group.color)
    }

    /// Appends a new color group and returns it.
    pub fn add_color_group(&mut self, name: &str, color: RgbColor) -> ColorGroup {
        let group = ColorGroup::new(name, color);
        debug!("Added color group '{}' ({})", group.name, group.color);
        self.color_groups.push(group.clone());
        group
    }

    /// Renames and/or recolors a group. Returns `false` on an unknown id.
    pub fn update_color_group(
        &mut self,
        id: &str,
        name: Option<&str>,
        color: Option<RgbColor>,
    ) -> bool {
        let Some(group) = self.color_groups.iter_mut().find(|g| g.id == id) else {
            return false;
        };

        if let Some(name) = name {
            group.set_name(name);
        }
        if let Some(color) = color {
            group.set_color(color);
        }
        true
    }

    /// Removes a color group. Actions keep their reference to it.
    pub fn delete_color_group(&mut self, id: &str) -> bool {
        let before = self.color_groups.len();
        self.color_groups.retain(|g| g.id != id);
        before != self.color_groups.len()
    }

    /// Replaces the `key_mappings` projection of one action.
    pub fn sync_action(&mut self, action_id: &str, entries: Vec<BindingEntry>) {
        if let Some(action) = self.actions.iter_mut().find(|a| a.id == action_id) {
            action.set_key_mappings(entries);
        }
    }

    /// Rebuilds every action's `key_mappings` from `bindings`.
    pub fn sync_key_mappings(&mut self, bindings: &BindingStore) {
        for action in &mut self.actions {
            action.set_key_mappings(bindings.entries_for_action(&action.id));
        }
    }
}
