//! Snapshot edits. Each function takes the current document by reference
//! and returns the next one; nothing is mutated in place.

use uuid::Uuid;

use crate::model::{Adt, Axiom, Implementation, Profile, Variant};

/// Partial update for a profile. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub signature: Option<String>,
    pub description: Option<String>,
    pub preconditions: Option<Vec<String>>,
}

/// Partial update for an axiom. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct AxiomUpdate {
    pub expression: Option<String>,
    pub description: Option<String>,
    pub related_profile_ids: Option<Vec<String>>,
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

impl Adt {
    pub fn with_name(&self, name: impl Into<String>) -> Adt {
        Adt {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn with_domain(&self, domain: impl Into<String>) -> Adt {
        Adt {
            domain: domain.into(),
            ..self.clone()
        }
    }

    pub fn with_uses(&self, uses: impl Into<String>) -> Adt {
        Adt {
            uses: uses.into(),
            ..self.clone()
        }
    }

    /// Append a placeholder profile. Returns the new snapshot and the new
    /// profile's id.
    pub fn add_profile(&self) -> (Adt, String) {
        let id = fresh_id();
        let mut next = self.clone();
        next.profiles.push(Profile {
            id: id.clone(),
            name: "New Function".to_string(),
            signature: "op() -> void".to_string(),
            description: Some("Description of the function".to_string()),
            preconditions: Vec::new(),
        });
        (next, id)
    }

    /// Apply `update` to the profile with `id`. Unknown ids leave the
    /// document unchanged.
    pub fn update_profile(&self, id: &str, update: ProfileUpdate) -> Adt {
        let mut next = self.clone();
        if let Some(profile) = next.profiles.iter_mut().find(|p| p.id == id) {
            if let Some(name) = update.name {
                profile.name = name;
            }
            if let Some(signature) = update.signature {
                profile.signature = signature;
            }
            if let Some(description) = update.description {
                profile.description = Some(description);
            }
            if let Some(preconditions) = update.preconditions {
                profile.preconditions = preconditions;
            }
        }
        next
    }

    /// Replace a profile's preconditions from editor text, one per line.
    pub fn set_preconditions_text(&self, id: &str, text: &str) -> Adt {
        self.update_profile(
            id,
            ProfileUpdate {
                preconditions: Some(text.split('\n').map(str::to_string).collect()),
                ..ProfileUpdate::default()
            },
        )
    }

    pub fn remove_profile(&self, id: &str) -> Adt {
        let mut next = self.clone();
        next.profiles.retain(|p| p.id != id);
        next
    }

    /// Append a placeholder axiom. Returns the new snapshot and the new
    /// axiom's id.
    pub fn add_axiom(&self) -> (Adt, String) {
        let id = fresh_id();
        let mut next = self.clone();
        next.axioms.push(Axiom {
            id: id.clone(),
            expression: "new_axiom() = true".to_string(),
            description: None,
            related_profile_ids: Vec::new(),
        });
        (next, id)
    }

    pub fn update_axiom(&self, id: &str, update: AxiomUpdate) -> Adt {
        let mut next = self.clone();
        if let Some(axiom) = next.axioms.iter_mut().find(|a| a.id == id) {
            if let Some(expression) = update.expression {
                axiom.expression = expression;
            }
            if let Some(description) = update.description {
                axiom.description = Some(description);
            }
            if let Some(related) = update.related_profile_ids {
                axiom.related_profile_ids = related;
            }
        }
        next
    }

    pub fn remove_axiom(&self, id: &str) -> Adt {
        let mut next = self.clone();
        next.axioms.retain(|a| a.id != id);
        next
    }

    /// Link the axiom to the profile, or unlink it if already linked.
    pub fn toggle_axiom_link(&self, axiom_id: &str, profile_id: &str) -> Adt {
        let Some(axiom) = self.axiom(axiom_id) else {
            return self.clone();
        };

        let mut related = axiom.related_profile_ids.clone();
        if related.iter().any(|id| id == profile_id) {
            related.retain(|id| id != profile_id);
        } else {
            related.push(profile_id.to_string());
        }

        self.update_axiom(
            axiom_id,
            AxiomUpdate {
                related_profile_ids: Some(related),
                ..AxiomUpdate::default()
            },
        )
    }

    pub fn with_implementation(&self, variant: Variant, implementation: Implementation) -> Adt {
        let mut next = self.clone();
        *next.implementations.get_mut(variant) = implementation;
        next
    }

    pub fn with_domain_space(&self, variant: Variant, text: impl Into<String>) -> Adt {
        let mut next = self.clone();
        next.implementations.get_mut(variant).domain_space = text.into();
        next
    }

    /// Set the method body for `profile_id` in one variant.
    pub fn with_method(&self, variant: Variant, profile_id: &str, code: impl Into<String>) -> Adt {
        let mut next = self.clone();
        next.implementations
            .get_mut(variant)
            .methods
            .insert(profile_id.to_string(), code.into());
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_leave_the_old_snapshot_alone() {
        let old = Adt::default().with_name("Stack");
        let new = old.with_name("Queue").with_uses("buffering");
        assert_eq!(old.name, "Stack");
        assert_eq!(old.uses, "");
        assert_eq!(new.name, "Queue");
        assert_eq!(new.uses, "buffering");
    }

    #[test]
    fn added_profiles_get_distinct_ids() {
        let (one, a) = Adt::default().add_profile();
        let (two, b) = one.add_profile();
        assert_ne!(a, b);
        assert_eq!(one.profiles.len(), 1);
        assert_eq!(two.profiles.len(), 2);
        assert_eq!(two.profile(&a).map(|p| p.name.as_str()), Some("New Function"));
        assert_eq!(two.profile(&b).map(|p| p.signature.as_str()), Some("op() -> void"));
    }

    #[test]
    fn profile_updates_are_partial() {
        let (adt, id) = Adt::default().add_profile();
        let adt = adt.update_profile(
            &id,
            ProfileUpdate {
                name: Some("push".to_string()),
                ..ProfileUpdate::default()
            },
        );
        let profile = adt.profile(&id).unwrap();
        assert_eq!(profile.name, "push");
        assert_eq!(profile.signature, "op() -> void");
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let (adt, _) = Adt::default().add_profile();
        let same = adt.update_profile("missing", ProfileUpdate {
            name: Some("x".to_string()),
            ..ProfileUpdate::default()
        });
        assert_eq!(adt, same);
        assert_eq!(adt.toggle_axiom_link("missing", "p"), adt);
    }

    #[test]
    fn preconditions_split_per_line() {
        let (adt, id) = Adt::default().add_profile();
        let adt = adt.set_preconditions_text(&id, "!empty(s)\n!full(s)");
        assert_eq!(adt.profile(&id).unwrap().preconditions, vec!["!empty(s)", "!full(s)"]);
    }

    #[test]
    fn toggling_links_adds_then_removes() {
        let (adt, ax) = Adt::default().add_axiom();
        let adt = adt.toggle_axiom_link(&ax, "op-push");
        let adt = adt.toggle_axiom_link(&ax, "op-pop");
        assert_eq!(adt.axiom(&ax).unwrap().related_profile_ids, vec!["op-push", "op-pop"]);
        let adt = adt.toggle_axiom_link(&ax, "op-push");
        assert_eq!(adt.axiom(&ax).unwrap().related_profile_ids, vec!["op-pop"]);
    }

    #[test]
    fn removal_drops_only_the_target() {
        let (adt, a) = Adt::default().add_axiom();
        let (adt, b) = adt.add_axiom();
        let adt = adt.remove_axiom(&a);
        assert!(adt.axiom(&a).is_none());
        assert!(adt.axiom(&b).is_some());
    }

    #[test]
    fn method_edits_touch_one_variant() {
        let adt = Adt::default()
            .with_method(Variant::Chained, "op-push", "procedure push(s, x)")
            .with_domain_space(Variant::Chained, "struct Node");
        assert_eq!(
            adt.implementation(Variant::Chained).method("op-push"),
            Some("procedure push(s, x)")
        );
        assert!(adt.implementation(Variant::Contiguous).methods.is_empty());
        assert_eq!(adt.implementation(Variant::Chained).domain_space, "struct Node");
    }
}
