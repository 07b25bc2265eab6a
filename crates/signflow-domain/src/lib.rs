//! signflow-domain: flujos concretos de la app de aprendizaje de lengua de
//! señas (onboarding, lecciones con quiz, historias) construidos sobre
//! `signflow-core`.
pub mod catalog;
pub mod config;
pub mod content;
pub mod error;
pub mod lesson;
pub mod onboarding;
pub mod story;

pub use catalog::{FlowKind, FlowOutcome};
pub use config::LearningConfig;
pub use error::DomainError;
pub use lesson::{grade, QuizScore};
pub use onboarding::{DailyGoal, OnboardingProfile};
pub use story::StoryReceipt;
