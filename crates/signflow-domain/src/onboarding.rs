//! Flujo de onboarding: bienvenida, objetivo diario y alta de cuenta.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use signflow_core::{build_registry, Answers, StepKind, StepRegistry, StepSpec};

use crate::error::DomainError;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Campos que no deben mostrarse tal cual fuera del perfil.
pub const SECRET_FIELDS: &[&str] = &["password"];

pub fn registry() -> Result<StepRegistry, DomainError> {
    let steps = [StepSpec::new("welcome").title("Welcome to SignFlow").no_back(),
                 StepSpec::new("goal").title("Pick a daily goal")
                                      .kind(StepKind::Form)
                                      .collects(["goal"]),
                 StepSpec::new("signup").title("Create your account")
                                        .kind(StepKind::Form)
                                        .collects(["email", "firstName", "password"])];
    Ok(build_registry(steps)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DailyGoal {
    #[serde(rename = "5min")]
    Casual,
    #[serde(rename = "10min")]
    Regular,
    #[serde(rename = "15min")]
    Serious,
    #[serde(rename = "20min")]
    Intense,
}

impl DailyGoal {
    pub const ALL: [DailyGoal; 4] = [DailyGoal::Casual, DailyGoal::Regular, DailyGoal::Serious, DailyGoal::Intense];

    pub fn minutes(self) -> u32 {
        match self {
            DailyGoal::Casual => 5,
            DailyGoal::Regular => 10,
            DailyGoal::Serious => 15,
            DailyGoal::Intense => 20,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DailyGoal::Casual => "5min",
            DailyGoal::Regular => "10min",
            DailyGoal::Serious => "15min",
            DailyGoal::Intense => "20min",
        }
    }
}

impl fmt::Display for DailyGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DailyGoal {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        DailyGoal::ALL.into_iter()
                      .find(|g| g.as_str() == s)
                      .ok_or_else(|| DomainError::InvalidAnswer { field: "goal".into(),
                                                                  reason: format!("'{s}' is not one of 5min, 10min, 15min, 20min") })
    }
}

/// Perfil tipado extraído de las respuestas del onboarding.
/// La contraseña no se serializa ni aparece en `Debug`/`Display`.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingProfile {
    pub goal: DailyGoal,
    pub email: String,
    pub first_name: String,
    #[serde(skip)]
    password: String,
}

impl OnboardingProfile {
    pub fn from_answers(answers: &Answers) -> Result<Self, DomainError> {
        let goal: DailyGoal = required_text(answers, "goal")?.parse()?;
        let email = required_text(answers, "email")?.to_string();
        check_email(&email)?;
        let first_name = required_text(answers, "firstName")?.to_string();
        let password = required_text(answers, "password")?.to_string();
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::InvalidAnswer { field: "password".into(),
                                                    reason: format!("must be at least {MIN_PASSWORD_LEN} characters") });
        }
        Ok(Self { goal,
                  email,
                  first_name,
                  password })
    }

    pub fn password_len(&self) -> usize {
        self.password.chars().count()
    }

    /// Compara sin exponer el valor.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

impl fmt::Debug for OnboardingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnboardingProfile")
         .field("goal", &self.goal)
         .field("email", &self.email)
         .field("first_name", &self.first_name)
         .field("password", &"<redacted>")
         .finish()
    }
}

impl fmt::Display for OnboardingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>, daily goal {}", self.first_name, self.email, self.goal)
    }
}

fn required_text<'a>(answers: &'a Answers, field: &str) -> Result<&'a str, DomainError> {
    match answers.get(field) {
        None => Err(DomainError::MissingAnswer(field.to_string())),
        Some(v) => match v.as_text().map(str::trim) {
            Some(t) if !t.is_empty() => Ok(t),
            Some(_) => Err(DomainError::MissingAnswer(field.to_string())),
            None => Err(DomainError::InvalidAnswer { field: field.to_string(),
                                                     reason: "expected text".into() }),
        },
    }
}

fn check_email(email: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidAnswer { field: "email".into(),
                                                              reason: reason.to_string() };
    let (local, domain) = email.split_once('@').ok_or_else(|| invalid("must contain '@'"))?;
    if local.is_empty() {
        return Err(invalid("missing name before '@'"));
    }
    match domain.find('.') {
        Some(i) if i > 0 && i + 1 < domain.len() => Ok(()),
        _ => Err(invalid("domain must contain a dot")),
    }
}
