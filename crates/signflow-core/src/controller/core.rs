//! Implementación de `FlowController`.

use std::fmt;

use log::{debug, info, warn};
use uuid::Uuid;

use super::builder::FlowBuilder;
use super::Transition;
use crate::errors::FlowError;
use crate::event::{EntryKind, EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
use crate::hashing::hash_value;
use crate::intent::NavigationIntent;
use crate::registry::StepRegistry;
use crate::sink::CompletionSink;
use crate::state::{Answers, FlowSnapshot, FlowState};
use crate::step::StepSpec;

/// Controlador de una instancia de flujo.
///
/// Máquina de estados: los estados son los ids del registro más el
/// pseudo-estado terminal `completed`. Cada `apply` corre completo y de forma
/// síncrona; el controlador es dueño exclusivo de su `FlowState` y de su
/// journal.
pub struct FlowController<E: EventStore = InMemoryEventStore> {
    flow_id: Uuid,
    registry: StepRegistry,
    state: FlowState,
    sink: Option<Box<dyn CompletionSink>>,
    event_store: E,
}

impl FlowController<InMemoryEventStore> {
    /// Builder con journal en memoria.
    pub fn builder(registry: StepRegistry) -> FlowBuilder<InMemoryEventStore> {
        FlowBuilder::new(registry)
    }

    /// Atajo: journal en memoria y el sink dado.
    pub fn new<S>(registry: StepRegistry, sink: S) -> Self
        where S: CompletionSink + 'static
    {
        FlowBuilder::new(registry).on_complete(sink).build()
    }
}

impl<E: EventStore> FlowController<E> {
    pub(crate) fn from_parts(flow_id: Uuid,
                             registry: StepRegistry,
                             sink: Option<Box<dyn CompletionSink>>,
                             mut event_store: E)
                             -> Self {
        let first = registry.first().id.clone();
        event_store.append_kind(flow_id,
                                FlowEventKind::FlowInitialized { registry_hash: registry.registry_hash().to_string(),
                                                                 step_count: registry.len(),
                                                                 first_step: first.clone() });
        debug!("flow {flow_id} initialized at '{first}' ({} steps)", registry.len());
        Self { flow_id,
               registry,
               state: FlowState::initial(&first),
               sink,
               event_store }
    }

    /// Aplica una intención de navegación.
    ///
    /// 1. Si el flujo ya terminó: `FlowCompleted` (no hay merge).
    /// 2. Mergea el payload (si hay) sobre `answers`; el merge se conserva
    ///    aunque la transición falle.
    /// 3. Calcula y valida el destino según la intención.
    pub fn apply(&mut self, intent: NavigationIntent) -> Result<Transition, FlowError> {
        if self.state.is_completed() {
            debug!("flow {} ignoring '{}': already completed", self.flow_id, intent.name());
            return Err(FlowError::FlowCompleted);
        }
        if let Some(payload) = intent.payload() {
            self.merge(payload);
        }
        let result = match &intent {
            NavigationIntent::Next { .. } => self.advance(),
            NavigationIntent::Back => self.revert(),
            NavigationIntent::JumpTo { step_id } => self.jump(step_id),
            NavigationIntent::Complete { .. } => self.complete(),
        };
        match &result {
            Ok(t) => debug!("flow {} {} -> {:?}", self.flow_id, intent.name(), t),
            Err(FlowError::Sink(_)) => {}
            Err(e) => self.reject(e),
        }
        result
    }

    /// Vuelve al estado inicial borrando respuestas e historial.
    pub fn reset(&mut self) -> Result<(), FlowError> {
        if self.state.is_completed() {
            return Err(FlowError::FlowCompleted);
        }
        let first = self.registry.first().id.clone();
        self.state.reset(&first);
        self.event_store.append_kind(self.flow_id, FlowEventKind::FlowReset);
        debug!("flow {} reset to '{first}'", self.flow_id);
        Ok(())
    }

    fn merge(&mut self, payload: &Answers) {
        if payload.is_empty() {
            return;
        }
        self.state.merge(payload);
        self.event_store.append_kind(self.flow_id,
                                     FlowEventKind::AnswersMerged { step_id: self.state.current_step_id().to_string(),
                                                                    values: payload.clone() });
    }

    fn advance(&mut self) -> Result<Transition, FlowError> {
        let current = self.state.current_step_id().to_string();
        self.validate_required(&current)?;
        match self.registry.next_id(&current).map(str::to_string) {
            Some(next) => {
                self.enter(&next, EntryKind::Next)?;
                Ok(Transition::Advanced { from: current, to: next })
            }
            // `next` en el último paso se promueve a `complete`
            None => self.finish(),
        }
    }

    fn revert(&mut self) -> Result<Transition, FlowError> {
        let current = self.state.current_step_id().to_string();
        if !self.registry.step_by_id(&current)?.allow_back {
            return Err(FlowError::illegal(&current, "back", "back is disabled on this step"));
        }
        let to = match self.state.pop() {
            Some(tail) => tail.to_string(),
            None => return Err(FlowError::illegal(&current, "back", "no previous step in history")),
        };
        self.event_store.append_kind(self.flow_id,
                                     FlowEventKind::StepReverted { from_step_id: current.clone(),
                                                                   to_step_id: to.clone() });
        Ok(Transition::Reverted { from: current, to })
    }

    fn jump(&mut self, target: &str) -> Result<Transition, FlowError> {
        let current = self.state.current_step_id().to_string();
        self.registry.index_of(target)?;
        if target == current {
            return Ok(Transition::Stayed { step_id: current });
        }
        let revisit = self.state.history().iter().any(|h| h == target);
        if !revisit {
            if self.registry.next_id(&current) != Some(target) {
                return Err(FlowError::illegal(&current,
                                              "jumpTo",
                                              format!("'{target}' is neither a visited step nor the next step")));
            }
            self.validate_required(&current)?;
        }
        self.enter(target, EntryKind::Jump)?;
        Ok(Transition::Jumped { from: current,
                                to: target.to_string() })
    }

    fn complete(&mut self) -> Result<Transition, FlowError> {
        let current = self.state.current_step_id().to_string();
        if !self.registry.is_last(&current) {
            let last = &self.registry.last().id;
            return Err(FlowError::illegal(&current,
                                          "complete",
                                          format!("only the last step '{last}' can complete the flow")));
        }
        self.validate_required(&current)?;
        self.finish()
    }

    /// Marca el flujo como completado y entrega las respuestas al sink (una
    /// sola vez: el sink se consume aquí).
    fn finish(&mut self) -> Result<Transition, FlowError> {
        self.state.mark_completed();
        let answers = self.state.answers().clone();
        let answers_fingerprint = hash_value(&answers.to_json());
        self.event_store
            .append_kind(self.flow_id, FlowEventKind::FlowCompleted { answers_fingerprint });
        info!("flow {} completed with {} answers", self.flow_id, answers.len());
        if let Some(mut sink) = self.sink.take() {
            sink.on_complete(answers).map_err(|e| {
                                         warn!("flow {} completion sink failed: {e}", self.flow_id);
                                         FlowError::Sink(e.to_string())
                                     })?;
        }
        Ok(Transition::Completed)
    }

    fn enter(&mut self, step_id: &str, via: EntryKind) -> Result<(), FlowError> {
        let step_index = self.registry.index_of(step_id)?;
        self.state.enter(step_id);
        self.event_store.append_kind(self.flow_id,
                                     FlowEventKind::StepEntered { step_index,
                                                                  step_id: step_id.to_string(),
                                                                  via });
        Ok(())
    }

    fn validate_required(&self, step_id: &str) -> Result<(), FlowError> {
        let step = self.registry.step_by_id(step_id)?;
        match step.required_fields.iter().find(|f| !self.state.answers().is_filled(f)) {
            Some(field) => Err(FlowError::Validation { step_id: step_id.to_string(),
                                                       field: field.clone() }),
            None => Ok(()),
        }
    }

    fn reject(&mut self, error: &FlowError) {
        let step_id = self.state.current_step_id().to_string();
        if error.is_user_facing() {
            debug!("flow {} rejected at '{step_id}': {error}", self.flow_id);
        } else {
            warn!("flow {} rejected at '{step_id}': {error}", self.flow_id);
        }
        self.event_store.append_kind(self.flow_id,
                                     FlowEventKind::TransitionRejected { step_id,
                                                                         error: error.clone() });
    }

    pub fn flow_id(&self) -> Uuid {
        self.flow_id
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn current_step_id(&self) -> &str {
        self.state.current_step_id()
    }

    pub fn current_step(&self) -> Result<&StepSpec, FlowError> {
        self.registry.step_by_id(self.state.current_step_id())
    }

    pub fn current_index(&self) -> Result<usize, FlowError> {
        self.registry.index_of(self.state.current_step_id())
    }

    pub fn answers(&self) -> &Answers {
        self.state.answers()
    }

    pub fn history(&self) -> &[String] {
        self.state.history()
    }

    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }

    /// Campos requeridos del paso actual que aún no están llenos.
    pub fn missing_fields(&self) -> Vec<&str> {
        match self.current_step() {
            Ok(step) => step.required_fields
                            .iter()
                            .filter(|f| !self.state.answers().is_filled(f))
                            .map(String::as_str)
                            .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Si un `back` ahora mismo sería aceptado (para deshabilitar el control).
    pub fn can_go_back(&self) -> bool {
        !self.is_completed()
        && self.current_step().is_ok_and(|s| s.allow_back)
        && self.state.history().len() >= 2
    }

    /// Si un `jumpTo(step_id)` ahora mismo sería aceptado.
    pub fn can_jump_to(&self, step_id: &str) -> bool {
        if self.is_completed() || !self.registry.contains(step_id) {
            return false;
        }
        let current = self.state.current_step_id();
        step_id == current
        || self.state.history().iter().any(|h| h == step_id)
        || (self.registry.next_id(current) == Some(step_id) && self.missing_fields().is_empty())
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot { flow_id: self.flow_id,
                       current_step_id: self.state.current_step_id().to_string(),
                       current_index: self.current_index().unwrap_or_default(),
                       answers: self.state.answers().clone(),
                       history: self.state.history().to_vec(),
                       completed: self.state.is_completed() }
    }

    /// Eventos del journal de esta instancia.
    pub fn events(&self) -> Vec<FlowEvent> {
        self.event_store.list(self.flow_id)
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }
}

impl<E: EventStore> fmt::Debug for FlowController<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowController")
         .field("flow_id", &self.flow_id)
         .field("current_step_id", &self.state.current_step_id())
         .field("history", &self.state.history())
         .field("completed", &self.state.is_completed())
         .field("sink_pending", &self.sink.is_some())
         .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::build_registry;
    use crate::sink::CollectingSink;
    use crate::step::{StepKind, StepSpec};

    fn onboarding() -> StepRegistry {
        build_registry([StepSpec::new("welcome").no_back(),
                        StepSpec::new("goal").kind(StepKind::Form).collects(["goal"]),
                        StepSpec::new("signup").kind(StepKind::Form)
                                               .collects(["email", "firstName", "password"])]).expect("registry")
    }

    #[test]
    fn starts_at_first_step_with_initialized_event() {
        let flow = FlowController::builder(onboarding()).build();
        assert_eq!(flow.current_step_id(), "welcome");
        assert_eq!(flow.history(), ["welcome"]);
        let events = flow.events();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0].kind, FlowEventKind::FlowInitialized { step_count: 3, first_step, .. } if first_step == "welcome"));
    }

    #[test]
    fn failed_next_keeps_merged_answers() {
        let mut flow = FlowController::builder(onboarding()).build();
        flow.apply(NavigationIntent::next()).unwrap();
        flow.apply(NavigationIntent::next()).unwrap();
        let err = flow.apply(NavigationIntent::next_with(Answers::new().with("email", "a@b.com")))
                      .unwrap_err();
        assert_eq!(err,
                   FlowError::Validation { step_id: "signup".into(),
                                           field: "firstName".into() });
        assert_eq!(flow.current_step_id(), "signup");
        assert_eq!(flow.answers().text("email"), Some("a@b.com"));
        assert_eq!(flow.missing_fields(), vec!["firstName", "password"]);
    }

    #[test]
    fn back_is_refused_on_no_back_step() {
        let reg = build_registry([StepSpec::new("a"), StepSpec::new("b").no_back()]).unwrap();
        let mut flow = FlowController::builder(reg).build();
        flow.apply(NavigationIntent::next()).unwrap();
        assert!(!flow.can_go_back());
        let err = flow.apply(NavigationIntent::back()).unwrap_err();
        assert!(matches!(err, FlowError::IllegalTransition { ref from, .. } if from == "b"));
        assert_eq!(flow.history(), ["a", "b"]);
    }

    #[test]
    fn jump_rules() {
        let mut flow = FlowController::builder(onboarding()).build();
        // signup no es el siguiente ni fue visitado
        assert!(!flow.can_jump_to("signup"));
        assert!(matches!(flow.apply(NavigationIntent::jump_to("signup")),
                         Err(FlowError::IllegalTransition { .. })));
        assert!(matches!(flow.apply(NavigationIntent::jump_to("missing")), Err(FlowError::NotFound(_))));

        // salto hacia adelante al siguiente paso
        assert!(flow.can_jump_to("goal"));
        assert_eq!(flow.apply(NavigationIntent::jump_to("goal")).unwrap(),
                   Transition::Jumped { from: "welcome".into(),
                                        to: "goal".into() });

        // el salto hacia adelante también valida los requeridos
        assert!(!flow.can_jump_to("signup"));
        assert!(matches!(flow.apply(NavigationIntent::jump_to("signup")), Err(FlowError::Validation { .. })));

        // revisitar un paso del historial agrega una entrada
        assert_eq!(flow.apply(NavigationIntent::jump_to("welcome")).unwrap(),
                   Transition::Jumped { from: "goal".into(),
                                        to: "welcome".into() });
        assert_eq!(flow.history(), ["welcome", "goal", "welcome"]);

        // saltar al paso actual no cambia nada
        assert_eq!(flow.apply(NavigationIntent::jump_to("welcome")).unwrap(),
                   Transition::Stayed { step_id: "welcome".into() });
        assert_eq!(flow.history().len(), 3);
    }

    #[test]
    fn complete_only_from_last_step() {
        let sink = CollectingSink::new();
        let mut flow = FlowController::new(onboarding(), sink.clone());
        let err = flow.apply(NavigationIntent::complete()).unwrap_err();
        assert!(matches!(err, FlowError::IllegalTransition { ref intent, .. } if intent == "complete"));
        assert_eq!(sink.calls(), 0);
        assert!(!flow.is_completed());
    }

    #[test]
    fn sink_error_is_propagated_and_flow_stays_completed() {
        let reg = build_registry([StepSpec::new("only")]).unwrap();
        let mut calls = 0u32;
        let mut flow = FlowController::new(reg, move |_a: Answers| -> Result<(), crate::sink::SinkError> {
            calls += 1;
            Err(format!("sink call #{calls} failed").into())
        });
        let err = flow.apply(NavigationIntent::complete()).unwrap_err();
        assert_eq!(err, FlowError::Sink("sink call #1 failed".into()));
        assert!(flow.is_completed());
        assert_eq!(flow.apply(NavigationIntent::complete()).unwrap_err(), FlowError::FlowCompleted);
    }

    #[test]
    fn reset_clears_answers_and_history() {
        let mut flow = FlowController::builder(onboarding()).build();
        flow.apply(NavigationIntent::next()).unwrap();
        flow.apply(NavigationIntent::next_with(Answers::new().with("goal", "5min"))).unwrap();
        flow.reset().unwrap();
        assert_eq!(flow.current_step_id(), "welcome");
        assert!(flow.answers().is_empty());
        assert_eq!(flow.history(), ["welcome"]);
        assert!(flow.events().iter().any(|e| e.kind == FlowEventKind::FlowReset));
    }

    #[test]
    fn rejections_are_journaled() {
        let mut flow = FlowController::builder(onboarding()).build();
        let _ = flow.apply(NavigationIntent::back());
        let last = flow.events().pop().unwrap();
        assert!(matches!(last.kind, FlowEventKind::TransitionRejected { ref step_id, error: FlowError::IllegalTransition { .. } } if step_id == "welcome"));
    }
}
