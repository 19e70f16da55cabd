use serde::{Deserialize, Serialize};

/// Maximum number of characters accepted for a person's name.
pub const MAX_NAME_CHARS: usize = 250;

/// A federative unit, as listed by `/api/estados`.
///
/// The `documentId` is only present when the state is populated inside a
/// person record; the list endpoint returns it too but the form ignores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: u64,
    #[serde(rename = "documentId", default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(rename = "Nome")]
    pub name: String,
}

/// A city, as listed by `/api/cidades?estado={id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: u64,
    #[serde(rename = "documentId", default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(rename = "Nome")]
    pub name: String,
}

/// A person record with its city and state populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "Nome")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Cidade", default)]
    pub city: Option<City>,
    #[serde(rename = "Estado", default)]
    pub state: Option<State>,
}

impl Person {
    pub fn state_name(&self) -> &str {
        self.state.as_ref().map(|s| s.name.as_str()).unwrap_or("-")
    }

    pub fn city_name(&self) -> &str {
        self.city.as_ref().map(|c| c.name.as_str()).unwrap_or("-")
    }
}

/// Reference to an existing record by numeric id, as the backend expects
/// relations to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    pub id: u64,
}

/// A validated person ready to be submitted for creation.
///
/// # Examples
///
/// ```
/// use cadastro::domain::NewPerson;
///
/// let person = NewPerson::new("Ana Silva", "ana@example.com", 10, 1);
/// let json = serde_json::to_value(&person).unwrap();
/// assert_eq!(json["Cidade"]["id"], 10);
/// assert_eq!(json["Estado"]["id"], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPerson {
    #[serde(rename = "Nome")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Cidade")]
    pub city: RecordRef,
    #[serde(rename = "Estado")]
    pub state: RecordRef,
}

impl NewPerson {
    pub fn new(name: &str, email: &str, city_id: u64, state_id: u64) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            city: RecordRef { id: city_id },
            state: RecordRef { id: state_id },
        }
    }
}
