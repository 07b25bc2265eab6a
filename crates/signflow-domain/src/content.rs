//! Contenido estático: lecciones (señas + quiz) e historias del dashboard.
//!
//! Es configuración, no lógica: los flujos se generan a partir de estos
//! datos en `lesson` y `story`.

use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Sign {
    pub slug: &'static str,
    pub word: &'static str,
    /// Cómo se forma la seña.
    pub how_to: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestion {
    pub prompt: &'static str,
    pub options: Vec<&'static str>,
    pub answer: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Lesson {
    pub id: &'static str,
    pub title: &'static str,
    pub signs: Vec<Sign>,
    pub quiz: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StorySlide {
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Story {
    pub id: &'static str,
    pub title: &'static str,
    pub slides: Vec<StorySlide>,
}

static LESSONS: Lazy<Vec<Lesson>> = Lazy::new(|| {
    vec![Lesson { id: "greetings",
                  title: "Greetings",
                  signs: vec![Sign { slug: "hello",
                                     word: "Hello",
                                     how_to: "Flat hand at the forehead, move it outward like a salute." },
                              Sign { slug: "thank-you",
                                     word: "Thank you",
                                     how_to: "Fingertips at the chin, move the hand forward and down." },
                              Sign { slug: "please",
                                     word: "Please",
                                     how_to: "Flat hand on the chest, move it in a circle." },
                              Sign { slug: "sorry",
                                     word: "Sorry",
                                     how_to: "Closed fist on the chest, move it in a circle." }],
                  quiz: vec![QuizQuestion { prompt: "A flat hand starts at the forehead and moves outward. Which sign is it?",
                                            options: vec!["Hello", "Please", "Sorry"],
                                            answer: "Hello" },
                             QuizQuestion { prompt: "Fingertips touch the chin and move forward. Which sign is it?",
                                            options: vec!["Sorry", "Thank you", "Hello"],
                                            answer: "Thank you" },
                             QuizQuestion { prompt: "A closed fist circles over the chest. Which sign is it?",
                                            options: vec!["Please", "Sorry", "Thank you"],
                                            answer: "Sorry" }] },
         Lesson { id: "alphabet-a-e",
                  title: "Alphabet A to E",
                  signs: vec![Sign { slug: "a",
                                     word: "A",
                                     how_to: "Closed fist, thumb resting along the side of the index finger." },
                              Sign { slug: "b",
                                     word: "B",
                                     how_to: "Flat hand, fingers together and pointing up, thumb across the palm." },
                              Sign { slug: "c",
                                     word: "C",
                                     how_to: "Curve the fingers and thumb into the shape of the letter." },
                              Sign { slug: "d",
                                     word: "D",
                                     how_to: "Index finger up, the other fingertips touch the thumb." },
                              Sign { slug: "e",
                                     word: "E",
                                     how_to: "Fingertips curled down to rest on the thumb." }],
                  quiz: vec![QuizQuestion { prompt: "Fingers curved like holding a cup. Which letter?",
                                            options: vec!["A", "C", "E"],
                                            answer: "C" },
                             QuizQuestion { prompt: "Index finger up, other fingers touching the thumb. Which letter?",
                                            options: vec!["B", "D", "A"],
                                            answer: "D" }] }]
});

static STORIES: Lazy<Vec<Story>> = Lazy::new(|| {
    vec![Story { id: "sign-of-the-day",
                 title: "Sign of the day: LEARN",
                 slides: vec![StorySlide { title: "Today's sign",
                                           body: "LEARN: take knowledge from a book and put it in your head." },
                              StorySlide { title: "How to make it",
                                           body: "Flat palm up, grab from the palm with the other hand and bring it to the forehead." },
                              StorySlide { title: "Use it",
                                           body: "I LEARN SIGN EVERY DAY." }] },
         Story { id: "weekly-streak",
                 title: "Your weekly streak",
                 slides: vec![StorySlide { title: "Nice work",
                                           body: "You practiced five days this week." },
                              StorySlide { title: "Keep going",
                                           body: "Two more lessons unlock the next unit." }] }]
});

pub fn lessons() -> &'static [Lesson] {
    &LESSONS
}

pub fn stories() -> &'static [Story] {
    &STORIES
}

pub fn lesson(id: &str) -> Option<&'static Lesson> {
    LESSONS.iter().find(|l| l.id == id)
}

pub fn story(id: &str) -> Option<&'static Story> {
    STORIES.iter().find(|s| s.id == id)
}
