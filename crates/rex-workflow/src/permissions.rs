//! Per-module, per-action authorization.
//!
//! Backed by a per-user mapping of module to allowed actions, populated
//! once per session (typically deserialized from the session payload).
//! Absence of a module or action entry denies by default.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use rex_model::{Action, ModuleType};

/// Fail-closed authorization check consulted before workflow entry points
/// are enabled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionGate {
    grants: HashMap<ModuleType, HashSet<Action>>,
}

impl PermissionGate {
    /// An empty gate: everything denied.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A gate granting every action on every module.
    #[must_use]
    pub fn allow_all() -> Self {
        let actions: HashSet<Action> = [Action::Import, Action::Export, Action::Template]
            .into_iter()
            .collect();
        let grants = ModuleType::ALL
            .into_iter()
            .map(|module| (module, actions.clone()))
            .collect();
        Self { grants }
    }

    /// Grant one action on one module.
    pub fn allow(&mut self, module: ModuleType, action: Action) -> &mut Self {
        self.grants.entry(module).or_default().insert(action);
        self
    }

    /// True when the session grants `action` on `module`. Missing entries
    /// deny.
    #[must_use]
    pub fn has_permission(&self, module: ModuleType, action: Action) -> bool {
        self.grants
            .get(&module)
            .is_some_and(|actions| actions.contains(&action))
    }

    #[must_use]
    pub fn can_import(&self, module: ModuleType) -> bool {
        self.has_permission(module, Action::Import)
    }

    #[must_use]
    pub fn can_export(&self, module: ModuleType) -> bool {
        self.has_permission(module, Action::Export)
    }

    #[must_use]
    pub fn can_download_template(&self, module: ModuleType) -> bool {
        self.has_permission(module, Action::Template)
    }

    /// Actions granted on a module, in stable order.
    #[must_use]
    pub fn actions_for(&self, module: ModuleType) -> Vec<Action> {
        let mut actions: Vec<Action> = self
            .grants
            .get(&module)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        actions.sort_by_key(|action| action.as_str());
        actions
    }

    /// The full grant map, in module display order. Modules with no
    /// grants are omitted.
    #[must_use]
    pub fn all_grants(&self) -> Vec<(ModuleType, Vec<Action>)> {
        ModuleType::ALL
            .into_iter()
            .filter(|module| self.grants.contains_key(module))
            .map(|module| (module, self.actions_for(module)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_gate() -> PermissionGate {
        let mut gate = PermissionGate::new();
        for module in ModuleType::ALL {
            gate.allow(module, Action::Import);
            gate.allow(module, Action::Template);
            if module != ModuleType::User {
                gate.allow(module, Action::Export);
            }
        }
        gate
    }

    #[test]
    fn missing_action_denies_even_when_module_is_present() {
        let gate = demo_gate();
        assert!(gate.can_import(ModuleType::User));
        assert!(!gate.can_export(ModuleType::User));
        assert!(gate.can_export(ModuleType::Camera));
    }

    #[test]
    fn empty_gate_denies_everything() {
        let gate = PermissionGate::new();
        for module in ModuleType::ALL {
            assert!(!gate.can_import(module));
            assert!(!gate.can_export(module));
            assert!(!gate.can_download_template(module));
        }
    }

    #[test]
    fn allow_all_grants_everything() {
        let gate = PermissionGate::allow_all();
        for module in ModuleType::ALL {
            assert!(gate.can_import(module));
            assert!(gate.can_export(module));
            assert!(gate.can_download_template(module));
        }
    }

    #[test]
    fn actions_for_lists_grants_in_stable_order() {
        let gate = demo_gate();
        assert_eq!(
            gate.actions_for(ModuleType::Camera),
            vec![Action::Export, Action::Import, Action::Template]
        );
        assert_eq!(
            gate.actions_for(ModuleType::User),
            vec![Action::Import, Action::Template]
        );
    }

    #[test]
    fn all_grants_exposes_the_full_map_in_module_order() {
        let gate = demo_gate();
        let grants = gate.all_grants();
        let modules: Vec<ModuleType> = grants.iter().map(|(module, _)| *module).collect();
        assert_eq!(modules, ModuleType::ALL);
        for (module, actions) in &grants {
            assert_eq!(*actions, gate.actions_for(*module));
        }

        let mut sparse = PermissionGate::new();
        sparse.allow(ModuleType::Map, Action::Export);
        assert_eq!(
            sparse.all_grants(),
            vec![(ModuleType::Map, vec![Action::Export])]
        );
        assert!(PermissionGate::new().all_grants().is_empty());
    }

    #[test]
    fn deserializes_from_session_payload() {
        let json = r#"{
            "camera": ["import", "export", "template"],
            "user": ["import", "template"]
        }"#;
        let gate: PermissionGate = serde_json::from_str(json).unwrap();
        assert!(gate.can_export(ModuleType::Camera));
        assert!(!gate.can_export(ModuleType::User));
        assert!(!gate.can_import(ModuleType::Robot));
    }
}
