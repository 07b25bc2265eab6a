//! Respuestas acumuladas entre pasos.
//!
//! El merge es shallow y total: las claves del payload reemplazan a las
//! existentes y nunca se borran claves a mitad de flujo.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Valor de un campo: texto, lista de textos o booleano.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

impl AnswerValue {
    /// Texto con contenido, lista con al menos un elemento; un booleano cuenta
    /// siempre como lleno.
    pub fn is_filled(&self) -> bool {
        match self {
            AnswerValue::Text(s) => !s.trim().is_empty(),
            AnswerValue::List(items) => !items.is_empty(),
            AnswerValue::Flag(_) => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AnswerValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AnswerValue::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        AnswerValue::Flag(b)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(items: Vec<String>) -> Self {
        AnswerValue::List(items)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(items: Vec<&str>) -> Self {
        AnswerValue::List(items.into_iter().map(str::to_string).collect())
    }
}

/// Mapa campo -> valor. El orden de inserción sólo se conserva para que la
/// salida sea determinista.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(IndexMap<String, AnswerValue>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder para payloads: `Answers::new().with("goal", "10min")`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserta o sobreescribe; devuelve el valor anterior.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AnswerValue>) -> Option<AnswerValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Merge last-write-wins. Devuelve las claves escritas, en orden.
    pub fn merge(&mut self, payload: &Answers) -> Vec<String> {
        let mut written = Vec::with_capacity(payload.len());
        for (k, v) in payload.iter() {
            self.0.insert(k.clone(), v.clone());
            written.push(k.clone());
        }
        written
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.0.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AnswerValue::as_text)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Presente y no vacío.
    pub fn is_filled(&self, key: &str) -> bool {
        self.get(key).is_some_and(AnswerValue::is_filled)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl<K: Into<String>, V: Into<AnswerValue>> FromIterator<(K, V)> for Answers {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filled_semantics() {
        assert!(AnswerValue::from("10min").is_filled());
        assert!(!AnswerValue::from("   ").is_filled());
        assert!(!AnswerValue::List(vec![]).is_filled());
        assert!(AnswerValue::from(vec!["a"]).is_filled());
        assert!(AnswerValue::Flag(false).is_filled());
    }

    #[test]
    fn merge_is_last_write_wins_and_never_deletes() {
        let mut acc = Answers::new().with("goal", "5min").with("keep", true);
        let written = acc.merge(&Answers::new().with("goal", "10min").with("email", "a@b.com"));
        assert_eq!(written, vec!["goal", "email"]);
        assert_eq!(acc.text("goal"), Some("10min"));
        assert_eq!(acc.get("keep"), Some(&AnswerValue::Flag(true)));
        assert_eq!(acc.len(), 3);
        assert_eq!(acc.keys().collect::<Vec<_>>(), vec!["goal", "keep", "email"]);
        assert!(acc.contains_key("email"));
        assert!(!acc.contains_key("password"));
    }

    #[test]
    fn json_shape_is_untagged() {
        let a: Answers = serde_json::from_value(json!({
            "goal": "10min",
            "signs": ["hello", "thanks"],
            "terms": true
        })).unwrap();
        assert_eq!(a.text("goal"), Some("10min"));
        assert_eq!(a.get("signs").and_then(AnswerValue::as_list).map(|l| l.len()), Some(2));
        assert_eq!(a.get("terms").and_then(AnswerValue::as_flag), Some(true));
        assert_eq!(a.to_json()["goal"], json!("10min"));
    }

    #[test]
    fn numbers_are_not_answers() {
        let r: Result<Answers, _> = serde_json::from_value(json!({"age": 3}));
        assert!(r.is_err());
    }
}
