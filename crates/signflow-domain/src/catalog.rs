//! Catálogo de flujos disponibles y su resumen al completarse.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use signflow_core::{Answers, StepRegistry};

use crate::config::LearningConfig;
use crate::content::{self, Lesson, Story};
use crate::error::DomainError;
use crate::lesson::{self, QuizScore};
use crate::onboarding::{self, OnboardingProfile};
use crate::story::{self, StoryReceipt};

/// Identificador de flujo tal como lo escribe el usuario:
/// `onboarding`, `lesson:<id>` o `story:<id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowKind {
    Onboarding,
    Lesson(String),
    Story(String),
}

impl FromStr for FlowKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "onboarding" {
            return Ok(FlowKind::Onboarding);
        }
        match s.split_once(':') {
            Some(("lesson", id)) => {
                content::lesson(id).ok_or_else(|| DomainError::UnknownLesson(id.to_string()))?;
                Ok(FlowKind::Lesson(id.to_string()))
            }
            Some(("story", id)) => {
                content::story(id).ok_or_else(|| DomainError::UnknownStory(id.to_string()))?;
                Ok(FlowKind::Story(id.to_string()))
            }
            _ => Err(DomainError::UnknownFlow(s.to_string())),
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowKind::Onboarding => f.write_str("onboarding"),
            FlowKind::Lesson(id) => write!(f, "lesson:{id}"),
            FlowKind::Story(id) => write!(f, "story:{id}"),
        }
    }
}

/// Resultado tipado de un flujo completado.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "flow", rename_all = "camelCase")]
pub enum FlowOutcome {
    Onboarding { profile: OnboardingProfile },
    Lesson { lesson_id: String, score: QuizScore },
    Story { receipt: StoryReceipt },
}

impl FlowKind {
    /// Todos los flujos del catálogo, en orden de presentación.
    pub fn all() -> Vec<FlowKind> {
        let mut kinds = vec![FlowKind::Onboarding];
        kinds.extend(content::lessons().iter().map(|l| FlowKind::Lesson(l.id.to_string())));
        kinds.extend(content::stories().iter().map(|s| FlowKind::Story(s.id.to_string())));
        kinds
    }

    pub fn title(&self) -> Result<&'static str, DomainError> {
        Ok(match self {
            FlowKind::Onboarding => "Onboarding",
            FlowKind::Lesson(id) => lesson_by_id(id)?.title,
            FlowKind::Story(id) => story_by_id(id)?.title,
        })
    }

    pub fn registry(&self) -> Result<StepRegistry, DomainError> {
        match self {
            FlowKind::Onboarding => onboarding::registry(),
            FlowKind::Lesson(id) => lesson::registry(lesson_by_id(id)?),
            FlowKind::Story(id) => story::registry(story_by_id(id)?),
        }
    }

    /// Interpreta las respuestas finales (y el historial, para historias).
    pub fn outcome(&self,
                   answers: &Answers,
                   history: &[String],
                   config: &LearningConfig)
                   -> Result<FlowOutcome, DomainError> {
        match self {
            FlowKind::Onboarding => Ok(FlowOutcome::Onboarding { profile: OnboardingProfile::from_answers(answers)? }),
            FlowKind::Lesson(id) => {
                let score = lesson::grade(lesson_by_id(id)?, answers, config.pass_threshold);
                Ok(FlowOutcome::Lesson { lesson_id: id.clone(),
                                         score })
            }
            FlowKind::Story(id) => Ok(FlowOutcome::Story { receipt: StoryReceipt::from_history(story_by_id(id)?,
                                                                                               history) }),
        }
    }
}

fn lesson_by_id(id: &str) -> Result<&'static Lesson, DomainError> {
    content::lesson(id).ok_or_else(|| DomainError::UnknownLesson(id.to_string()))
}

fn story_by_id(id: &str) -> Result<&'static Story, DomainError> {
    content::story(id).ok_or_else(|| DomainError::UnknownStory(id.to_string()))
}

impl fmt::Display for FlowOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowOutcome::Onboarding { profile } => write!(f, "welcome aboard, {profile}"),
            FlowOutcome::Lesson { lesson_id, score } => {
                write!(f,
                       "{lesson_id}: {}/{} correct ({}%), {}",
                       score.correct,
                       score.total,
                       score.percent,
                       if score.passed { "passed" } else { "try again" })
            }
            FlowOutcome::Story { receipt } => {
                write!(f,
                       "story {} viewed ({}/{} slides)",
                       receipt.story_id, receipt.slides_seen, receipt.slides_total)
            }
        }
    }
}
