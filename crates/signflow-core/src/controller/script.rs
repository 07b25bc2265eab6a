//! Aplicación de secuencias de intenciones (scripts de UI, replays de tests).

use super::{FlowController, Transition};
use crate::errors::FlowError;
use crate::event::EventStore;
use crate::intent::NavigationIntent;

impl<E: EventStore> FlowController<E> {
    /// Aplica las intenciones en orden y se detiene en el primer error.
    /// Las transiciones previas al error ya quedaron aplicadas.
    pub fn apply_all<I>(&mut self, intents: I) -> Result<Vec<Transition>, FlowError>
        where I: IntoIterator<Item = NavigationIntent>
    {
        let mut done = Vec::new();
        for intent in intents {
            done.push(self.apply(intent)?);
        }
        Ok(done)
    }

    /// Aplica `next` hasta completar o hasta que un paso pida datos.
    /// Útil para flujos sin campos requeridos (visor de historias).
    pub fn run_to_completion(&mut self) -> Result<usize, FlowError> {
        let mut steps = 0;
        while !self.is_completed() {
            self.apply(NavigationIntent::next())?;
            steps += 1;
        }
        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use crate::registry::build_registry;
    use crate::sink::CollectingSink;
    use crate::step::StepSpec;
    use crate::{Answers, FlowController, FlowError, NavigationIntent, Transition};

    #[test]
    fn apply_all_stops_at_first_error() {
        let reg = build_registry([StepSpec::new("a"), StepSpec::new("b").collects(["x"]), StepSpec::new("c")]).unwrap();
        let mut flow = FlowController::builder(reg).build();
        let err = flow.apply_all([NavigationIntent::next(), NavigationIntent::next(), NavigationIntent::back()])
                      .unwrap_err();
        assert!(matches!(err, FlowError::Validation { ref field, .. } if field == "x"));
        assert_eq!(flow.current_step_id(), "b");

        let done = flow.apply_all([NavigationIntent::next_with(Answers::new().with("x", "1"))]).unwrap();
        assert_eq!(done,
                   vec![Transition::Advanced { from: "b".into(),
                                               to: "c".into() }]);
    }

    #[test]
    fn run_to_completion_walks_open_flows() {
        let reg = build_registry([StepSpec::new("s1"), StepSpec::new("s2"), StepSpec::new("s3")]).unwrap();
        let sink = CollectingSink::new();
        let mut flow = FlowController::new(reg, sink.clone());
        assert_eq!(flow.run_to_completion().unwrap(), 3);
        assert!(flow.is_completed());
        assert_eq!(sink.calls(), 1);
    }
}
