//! Flujo de lección: intro, una slide por seña, quiz y resultados.
//!
//! `results` rechaza `back`, pero un `jumpTo` a una pregunta ya visitada
//! sigue abierto: el alumno puede cambiar una respuesta y la nota se calcula
//! con lo último respondido al completar.

use serde::Serialize;
use signflow_core::{build_registry, Answers, StepKind, StepRegistry, StepSpec};

use crate::content::Lesson;
use crate::error::DomainError;

/// Id del paso de la pregunta `n` (1-based).
pub fn question_step_id(n: usize) -> String {
    format!("quiz-{n}")
}

/// Campo donde se guarda la respuesta a la pregunta `n` (1-based).
pub fn question_field(n: usize) -> String {
    format!("q{n}")
}

pub fn registry(lesson: &Lesson) -> Result<StepRegistry, DomainError> {
    let mut steps = Vec::with_capacity(lesson.signs.len() + lesson.quiz.len() + 2);
    steps.push(StepSpec::new("intro").title(lesson.title).no_back());
    steps.extend(lesson.signs
                       .iter()
                       .map(|sign| StepSpec::new(format!("learn-{}", sign.slug)).title(sign.word).kind(StepKind::Slide)));
    for (i, q) in lesson.quiz.iter().enumerate() {
        steps.push(StepSpec::new(question_step_id(i + 1)).title(q.prompt)
                                                         .kind(StepKind::Question)
                                                         .collects([question_field(i + 1)]));
    }
    steps.push(StepSpec::new("results").title("Results").kind(StepKind::Summary).no_back());
    Ok(build_registry(steps)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
    pub percent: u8,
    pub passed: bool,
}

/// Corrige el quiz contra las respuestas acumuladas.
///
/// La comparación ignora mayúsculas y espacios; una pregunta sin responder
/// cuenta como fallada. Un quiz vacío puntúa 0.
pub fn grade(lesson: &Lesson, answers: &Answers, pass_threshold: u8) -> QuizScore {
    let total = lesson.quiz.len();
    let correct = lesson.quiz
                        .iter()
                        .enumerate()
                        .filter(|(i, q)| {
                            answers.text(&question_field(i + 1))
                                   .map(|given| given.trim().eq_ignore_ascii_case(q.answer))
                                   .unwrap_or(false)
                        })
                        .count();
    let percent = if total == 0 {
        0
    } else {
        // redondeo half-up en enteros
        ((200 * correct + total) / (2 * total)) as u8
    };
    let passed = total > 0 && percent >= pass_threshold;
    log::debug!("lesson '{}' graded {correct}/{total} ({percent}%)", lesson.id);
    QuizScore { correct,
                total,
                percent,
                passed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{lesson, Sign};

    fn greetings() -> &'static Lesson {
        lesson("greetings").unwrap()
    }

    #[test]
    fn registry_layout() {
        let reg = registry(greetings()).unwrap();
        assert_eq!(reg.ids(),
                   vec!["intro",
                        "learn-hello",
                        "learn-thank-you",
                        "learn-please",
                        "learn-sorry",
                        "quiz-1",
                        "quiz-2",
                        "quiz-3",
                        "results"]);
        assert_eq!(reg.step_by_id("quiz-2").unwrap().required_fields, vec!["q2".to_string()]);
        assert!(!reg.last().allow_back);
        assert!(!reg.first().allow_back);
    }

    #[test]
    fn grading_rounds_and_applies_threshold() {
        let l = greetings();
        let all = Answers::new().with("q1", "Hello").with("q2", " thank you ").with("q3", "Sorry");
        assert_eq!(grade(l, &all, 70),
                   QuizScore { correct: 3,
                               total: 3,
                               percent: 100,
                               passed: true });

        let two = Answers::new().with("q1", "Hello").with("q2", "Thank you").with("q3", "Please");
        let s = grade(l, &two, 70);
        assert_eq!((s.correct, s.percent, s.passed), (2, 67, false));
        assert!(grade(l, &two, 65).passed);
    }

    #[test]
    fn unanswered_counts_as_wrong() {
        let s = grade(greetings(), &Answers::new().with("q1", "Hello"), 0);
        assert_eq!((s.correct, s.total, s.percent), (1, 3, 33));
        assert!(s.passed);
    }

    #[test]
    fn empty_quiz_scores_zero() {
        let empty = Lesson { id: "empty",
                             title: "Empty",
                             signs: vec![Sign { slug: "x",
                                                word: "X",
                                                how_to: "" }],
                             quiz: vec![] };
        let s = grade(&empty, &Answers::new(), 0);
        assert_eq!((s.percent, s.passed), (0, false));
    }
}
