use serde::{Deserialize, Serialize};

/// Tipo de pantalla; sólo una pista para el renderer, no afecta la navegación.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    #[default]
    Info,
    Form,
    Question,
    Slide,
    Summary,
}

/// Declaración de un paso.
///
/// Se construye con el builder:
///
/// ```
/// use signflow_core::step::{StepKind, StepSpec};
///
/// let signup = StepSpec::new("signup").kind(StepKind::Form)
///                                      .collects(["email", "firstName", "password"]);
/// assert!(signup.allow_back);
/// assert_eq!(signup.required_fields.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSpec {
    /// Identificador estable y único dentro del registro.
    pub id: String,
    pub title: String,
    pub kind: StepKind,
    /// Claves que deben estar presentes y no vacías antes de avanzar.
    pub required_fields: Vec<String>,
    /// Claves que la pantalla de este paso puede escribir.
    pub produces: Vec<String>,
    pub allow_back: bool,
}

impl StepSpec {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self { title: id.clone(),
               id,
               kind: StepKind::default(),
               required_fields: Vec::new(),
               produces: Vec::new(),
               allow_back: true }
    }

    pub fn kind(mut self, kind: StepKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Campos que este paso recoge y exige (produce + required).
    pub fn collects<I, S>(self, fields: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        self.produces(fields.clone()).requires(fields)
    }

    /// Campos opcionales que la pantalla puede escribir.
    pub fn produces<I, S>(mut self, fields: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        for f in fields {
            push_unique(&mut self.produces, f.into());
        }
        self
    }

    /// Exige campos producidos por este paso o por uno anterior.
    pub fn requires<I, S>(mut self, fields: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        for f in fields {
            push_unique(&mut self.required_fields, f.into());
        }
        self
    }

    /// Deshabilita `back` desde este paso.
    pub fn no_back(mut self) -> Self {
        self.allow_back = false;
        self
    }
}

fn push_unique(into: &mut Vec<String>, field: String) {
    if !into.contains(&field) {
        into.push(field);
    }
}
