use crate::domain::{City, NewPerson, Person, State};
use crate::infrastructure::{ApiError, ApiResult, PersonApi};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListStates,
    ListCities(u64),
    CountEmail(String),
    Create(NewPerson),
    GetPerson(String),
}

/// In-memory backend that records every call made to it.
pub struct FakeApi {
    pub states: Vec<State>,
    pub cities: HashMap<u64, Vec<City>>,
    pub existing_emails: Vec<String>,
    pub people: HashMap<String, Person>,
    pub created_id: Option<String>,
    pub states_status: Option<u16>,
    pub create_status: Option<u16>,
    calls: Mutex<Vec<Call>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        let mut cities = HashMap::new();
        cities.insert(1, vec![city(10, "Salvador"), city(11, "Feira de Santana")]);
        cities.insert(2, vec![city(20, "Fortaleza")]);

        Self {
            states: vec![state(1, "Bahia"), state(2, "Ceará")],
            cities,
            existing_emails: Vec::new(),
            people: HashMap::new(),
            created_id: Some("abc123".to_string()),
            states_status: None,
            create_status: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn with_existing_email(mut self, email: &str) -> Self {
        self.existing_emails.push(email.to_string());
        self
    }

    pub fn with_person(mut self, document_id: &str, person: Person) -> Self {
        self.people.insert(document_id.to_string(), person);
        self
    }

    pub fn with_states_status(mut self, status: u16) -> Self {
        self.states_status = Some(status);
        self
    }

    pub fn with_create_status(mut self, status: u16) -> Self {
        self.create_status = Some(status);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn status(status: u16) -> ApiError {
        ApiError::Status {
            status,
            body: r#"{"error":{"status":400}}"#.to_string(),
        }
    }
}

impl PersonApi for FakeApi {
    fn list_states(&self) -> ApiResult<Vec<State>> {
        self.record(Call::ListStates);
        match self.states_status {
            Some(status) => Err(Self::status(status)),
            None => Ok(self.states.clone()),
        }
    }

    fn list_cities(&self, state_id: u64) -> ApiResult<Vec<City>> {
        self.record(Call::ListCities(state_id));
        Ok(self.cities.get(&state_id).cloned().unwrap_or_default())
    }

    fn count_people_with_email(&self, email: &str) -> ApiResult<usize> {
        self.record(Call::CountEmail(email.to_string()));
        Ok(self.existing_emails.iter().filter(|e| *e == email).count())
    }

    fn create_person(&self, person: &NewPerson) -> ApiResult<String> {
        self.record(Call::Create(person.clone()));
        if let Some(status) = self.create_status {
            return Err(Self::status(status));
        }
        self.created_id.clone().ok_or(ApiError::MissingDocumentId)
    }

    fn get_person(&self, document_id: &str) -> ApiResult<Person> {
        self.record(Call::GetPerson(document_id.to_string()));
        self.people
            .get(document_id)
            .cloned()
            .ok_or_else(|| Self::status(404))
    }
}

pub fn state(id: u64, name: &str) -> State {
    State {
        id,
        document_id: None,
        name: name.to_string(),
    }
}

pub fn city(id: u64, name: &str) -> City {
    City {
        id,
        document_id: None,
        name: name.to_string(),
    }
}

pub fn person(name: &str, email: &str) -> Person {
    Person {
        name: name.to_string(),
        email: email.to_string(),
        city: Some(city(10, "Salvador")),
        state: Some(state(1, "Bahia")),
    }
}
