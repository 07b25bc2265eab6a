//! `StepRegistry`: lista ordenada e inmutable de pasos de un flujo.
//!
//! El registro se valida una sola vez al construirse (`register`). Después
//! sólo ofrece lookups puros: por índice, por id, sucesor y predecesor
//! lineal (sin wraparound).
use std::collections::{HashMap, HashSet};

use log::warn;
use serde_json::json;

use crate::constants::CONTROLLER_VERSION;
use crate::errors::FlowError;
use crate::hashing::hash_value;
use crate::step::StepSpec;

#[derive(Debug, Clone)]
pub struct StepRegistry {
    steps: Vec<StepSpec>,
    index: HashMap<String, usize>,
    registry_hash: String,
}

impl StepRegistry {
    /// Valida y registra los pasos en el orden dado.
    ///
    /// # Errores
    /// `FlowError::Configuration` si el registro está vacío, hay ids vacíos o
    /// duplicados, o un paso exige un campo que ningún paso (él mismo o uno
    /// anterior) produce.
    pub fn register(steps: Vec<StepSpec>) -> Result<Self, FlowError> {
        if steps.is_empty() {
            return Err(config_error("registry must declare at least one step".to_string()));
        }
        let mut index = HashMap::with_capacity(steps.len());
        let mut produced: HashSet<&str> = HashSet::new();
        for (i, step) in steps.iter().enumerate() {
            if step.id.trim().is_empty() {
                return Err(config_error(format!("step at index {i} has an empty id")));
            }
            if index.insert(step.id.clone(), i).is_some() {
                return Err(config_error(format!("duplicated step id '{}'", step.id)));
            }
            produced.extend(step.produces.iter().map(String::as_str));
            if let Some(missing) = step.required_fields.iter().find(|f| !produced.contains(f.as_str())) {
                return Err(config_error(format!("step '{}' requires '{}' but no step up to it produces that field",
                                                step.id, missing)));
            }
        }
        let registry_hash = compute_registry_hash(&steps);
        Ok(Self { steps,
                  index,
                  registry_hash })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepSpec> {
        self.steps.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn first(&self) -> &StepSpec {
        &self.steps[0]
    }

    pub fn last(&self) -> &StepSpec {
        &self.steps[self.steps.len() - 1]
    }

    pub fn is_last(&self, id: &str) -> bool {
        self.last().id == id
    }

    pub fn step_at(&self, index: usize) -> Result<&StepSpec, FlowError> {
        self.steps
            .get(index)
            .ok_or_else(|| FlowError::NotFound(format!("index {index} (registry has {} steps)", self.steps.len())))
    }

    pub fn step_by_id(&self, id: &str) -> Result<&StepSpec, FlowError> {
        let i = self.index_of(id)?;
        Ok(&self.steps[i])
    }

    pub fn index_of(&self, id: &str) -> Result<usize, FlowError> {
        self.index.get(id).copied().ok_or_else(|| FlowError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Sucesor lineal; `None` en el último paso o si el id no existe.
    pub fn next_id(&self, current: &str) -> Option<&str> {
        let i = *self.index.get(current)?;
        self.steps.get(i + 1).map(|s| s.id.as_str())
    }

    /// Predecesor lineal; `None` en el primer paso o si el id no existe.
    pub fn prev_id(&self, current: &str) -> Option<&str> {
        let i = *self.index.get(current)?;
        i.checked_sub(1).map(|p| self.steps[p].id.as_str())
    }

    /// Hash estable de la forma del registro (ids, campos, allow_back).
    pub fn registry_hash(&self) -> &str {
        &self.registry_hash
    }
}

fn config_error(msg: String) -> FlowError {
    warn!("step registry rejected: {msg}");
    FlowError::Configuration(msg)
}

fn compute_registry_hash(steps: &[StepSpec]) -> String {
    let shape: Vec<serde_json::Value> = steps.iter()
                                             .map(|s| {
                                                 json!({
                                                     "id": s.id,
                                                     "required": s.required_fields,
                                                     "produces": s.produces,
                                                     "allow_back": s.allow_back,
                                                 })
                                             })
                                             .collect();
    hash_value(&json!({ "controller_version": CONTROLLER_VERSION, "steps": shape }))
}

/// Atajo: registra los pasos en orden.
pub fn build_registry<I>(steps: I) -> Result<StepRegistry, FlowError>
    where I: IntoIterator<Item = StepSpec>
{
    StepRegistry::register(steps.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;

    fn onboarding() -> Vec<StepSpec> {
        vec![StepSpec::new("welcome").no_back(),
             StepSpec::new("goal").kind(StepKind::Form).collects(["goal"]),
             StepSpec::new("signup").kind(StepKind::Form)
                                    .collects(["email", "firstName", "password"])]
    }

    #[test]
    fn lookups_follow_declaration_order() {
        let reg = StepRegistry::register(onboarding()).expect("valid registry");
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.step_at(0).unwrap().id, "welcome");
        assert_eq!(reg.step_by_id("signup").unwrap().id, "signup");
        assert_eq!(reg.index_of("goal").unwrap(), 1);
        assert_eq!(reg.next_id("welcome"), Some("goal"));
        assert_eq!(reg.next_id("signup"), None);
        assert_eq!(reg.prev_id("goal"), Some("welcome"));
        assert_eq!(reg.prev_id("welcome"), None);
        assert!(reg.is_last("signup"));
        assert_eq!(reg.ids(), vec!["welcome", "goal", "signup"]);
    }

    #[test]
    fn unknown_lookups_fail_with_not_found() {
        let reg = StepRegistry::register(onboarding()).unwrap();
        assert!(matches!(reg.step_at(3), Err(FlowError::NotFound(_))));
        assert!(matches!(reg.step_by_id("nope"), Err(FlowError::NotFound(_))));
        assert_eq!(reg.next_id("nope"), None);
        assert_eq!(reg.prev_id("nope"), None);
    }

    #[test]
    fn duplicated_ids_are_rejected() {
        let err = StepRegistry::register(vec![StepSpec::new("a"), StepSpec::new("a")]).unwrap_err();
        assert!(matches!(err, FlowError::Configuration(ref m) if m.contains("duplicated")), "{err}");
    }

    #[test]
    fn empty_and_blank_ids_are_rejected() {
        assert!(matches!(StepRegistry::register(vec![]), Err(FlowError::Configuration(_))));
        assert!(matches!(StepRegistry::register(vec![StepSpec::new("  ")]),
                         Err(FlowError::Configuration(_))));
    }

    #[test]
    fn required_field_produced_later_is_rejected() {
        let steps = vec![StepSpec::new("summary").requires(["email"]),
                         StepSpec::new("signup").collects(["email"])];
        let err = StepRegistry::register(steps).unwrap_err();
        assert!(matches!(err, FlowError::Configuration(ref m) if m.contains("email")), "{err}");
    }

    #[test]
    fn required_field_produced_earlier_is_accepted() {
        let steps = vec![StepSpec::new("signup").collects(["email"]),
                         StepSpec::new("confirm").requires(["email"])];
        assert!(StepRegistry::register(steps).is_ok());
    }

    #[test]
    fn hash_depends_on_shape() {
        let a = StepRegistry::register(onboarding()).unwrap();
        let b = StepRegistry::register(onboarding()).unwrap();
        assert_eq!(a.registry_hash(), b.registry_hash());

        let mut changed = onboarding();
        changed[0].allow_back = true;
        let c = StepRegistry::register(changed).unwrap();
        assert_ne!(a.registry_hash(), c.registry_hash());
    }
}
