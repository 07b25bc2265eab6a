//! Visor de historias: una slide por página, navegación libre hacia atrás.

use serde::Serialize;
use signflow_core::{build_registry, StepKind, StepRegistry, StepSpec};

use crate::content::Story;
use crate::error::DomainError;

pub fn registry(story: &Story) -> Result<StepRegistry, DomainError> {
    let steps = story.slides
                     .iter()
                     .enumerate()
                     .map(|(i, slide)| StepSpec::new(format!("slide-{}", i + 1)).title(slide.title).kind(StepKind::Slide));
    Ok(build_registry(steps)?)
}

/// Constancia de que una historia se vio hasta el final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryReceipt {
    pub story_id: String,
    pub slides_total: usize,
    /// Slides distintas visitadas según el historial.
    pub slides_seen: usize,
}

impl StoryReceipt {
    pub fn from_history(story: &Story, history: &[String]) -> Self {
        let mut seen: Vec<&str> = history.iter().map(String::as_str).collect();
        seen.sort_unstable();
        seen.dedup();
        Self { story_id: story.id.to_string(),
               slides_total: story.slides.len(),
               slides_seen: seen.len() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::story;

    #[test]
    fn slides_allow_back() {
        let s = story("sign-of-the-day").unwrap();
        let reg = registry(s).unwrap();
        assert_eq!(reg.ids(), vec!["slide-1", "slide-2", "slide-3"]);
        assert!(reg.iter().all(|step| step.allow_back && step.required_fields.is_empty()));
    }

    #[test]
    fn receipt_counts_distinct_slides() {
        let s = story("sign-of-the-day").unwrap();
        let history: Vec<String> = ["slide-1", "slide-2", "slide-1", "slide-2", "slide-3"].iter()
                                                                                         .map(|x| x.to_string())
                                                                                         .collect();
        let r = StoryReceipt::from_history(s, &history);
        assert_eq!((r.slides_total, r.slides_seen), (3, 3));
    }
}
