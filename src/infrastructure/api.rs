//! Access to the content backend's person, state and city collections.
//!
//! [`PersonApi`] is the seam the application talks to; [`HttpPersonApi`]
//! implements it over blocking HTTP so it can run on worker threads.

use crate::domain::{City, FailureClass, NewPerson, Person, State};
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response did not include a document identifier")]
    MissingDocumentId,
}

impl ApiError {
    pub fn class(&self) -> FailureClass {
        match self {
            ApiError::Status { .. } | ApiError::MissingDocumentId => FailureClass::Backend,
            ApiError::Transport(_) | ApiError::Decode(_) => FailureClass::Network,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Operations the client needs from the backend.
pub trait PersonApi: Send + Sync {
    /// All states, in the order the backend lists them.
    fn list_states(&self) -> ApiResult<Vec<State>>;

    /// Cities belonging to the state with this numeric id.
    fn list_cities(&self, state_id: u64) -> ApiResult<Vec<City>>;

    /// Number of people registered with exactly this email.
    fn count_people_with_email(&self, email: &str) -> ApiResult<usize>;

    /// Creates a person and returns the new record's document identifier.
    fn create_person(&self, person: &NewPerson) -> ApiResult<String>;

    /// Person record with its city and state populated.
    fn get_person(&self, document_id: &str) -> ApiResult<Person>;
}

/// Every response body is wrapped in `{ "data": ... }`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct Payload<'a, T> {
    pub data: &'a T,
}

#[derive(Debug, Deserialize)]
struct CreatedRecord {
    #[serde(rename = "documentId")]
    document_id: Option<String>,
}

/// [`PersonApi`] over the backend's REST endpoints under `{base}/api/`.
///
/// Every call blocks, so it is meant to run on a [`Worker`] thread.
///
/// [`Worker`]: crate::application::Worker
pub struct HttpPersonApi {
    client: Client,
    base_url: Url,
}

impl HttpPersonApi {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Full URL of a collection path such as `estados` or `pessoas/abc`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    fn read<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.data)
    }
}

impl PersonApi for HttpPersonApi {
    fn list_states(&self) -> ApiResult<Vec<State>> {
        let response = self.client.get(self.endpoint("estados")).send()?;
        Self::read(response)
    }

    fn list_cities(&self, state_id: u64) -> ApiResult<Vec<City>> {
        let response = self
            .client
            .get(self.endpoint("cidades"))
            .query(&[("estado", state_id)])
            .send()?;
        Self::read(response)
    }

    fn count_people_with_email(&self, email: &str) -> ApiResult<usize> {
        let response = self
            .client
            .get(self.endpoint("pessoas"))
            .query(&[("filters[Email][$eq]", email)])
            .send()?;
        let matches: Vec<IgnoredAny> = Self::read(response)?;
        Ok(matches.len())
    }

    fn create_person(&self, person: &NewPerson) -> ApiResult<String> {
        let response = self
            .client
            .post(self.endpoint("pessoas"))
            .json(&Payload { data: person })
            .send()?;
        let created: Option<CreatedRecord> = Self::read(response)?;

        created
            .and_then(|record| record.document_id)
            .filter(|id| !id.is_empty())
            .ok_or(ApiError::MissingDocumentId)
    }

    fn get_person(&self, document_id: &str) -> ApiResult<Person> {
        let response = self
            .client
            .get(self.endpoint(&format!("pessoas/{}", document_id)))
            .query(&[("populate", "Cidade,Estado")])
            .send()?;
        Self::read(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    fn api(base: &str) -> HttpPersonApi {
        HttpPersonApi::new(Url::parse(base).unwrap())
    }

    /// Request line and body of a request received by [`serve_once`].
    struct Received {
        request_line: String,
        body: String,
    }

    /// Answers a single request on a loopback port with `status` and `body`,
    /// returning a client for that port and the request it received.
    fn serve_once(status: &str, body: &str) -> (HttpPersonApi, mpsc::Receiver<Received>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            let mut content_length = 0;
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                let header = header.trim_end();
                if header.is_empty() {
                    break;
                }
                if let Some((name, value)) = header.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }

            let mut body = vec![0; content_length];
            reader.read_exact(&mut body).unwrap();

            let mut stream = stream;
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();

            tx.send(Received {
                request_line: request_line.trim_end().to_string(),
                body: String::from_utf8(body).unwrap(),
            })
            .unwrap();
        });

        let client = Client::builder().no_proxy().build().unwrap();
        let base = Url::parse(&format!("http://{}", addr)).unwrap();
        (HttpPersonApi::with_client(client, base), rx)
    }

    #[test]
    fn test_list_states_over_http() {
        let (api, rx) = serve_once("200 OK", r#"{"data": [{"id": 1, "Nome": "Bahia"}], "meta": {}}"#);

        let states = api.list_states().unwrap();

        assert_eq!(states[0].name, "Bahia");
        assert_eq!(rx.recv().unwrap().request_line, "GET /api/estados HTTP/1.1");
    }

    #[test]
    fn test_list_cities_filters_by_state() {
        let (api, rx) = serve_once("200 OK", r#"{"data": [{"id": 10, "Nome": "Salvador"}]}"#);

        let cities = api.list_cities(3).unwrap();

        assert_eq!(cities.len(), 1);
        assert_eq!(rx.recv().unwrap().request_line, "GET /api/cidades?estado=3 HTTP/1.1");
    }

    #[test]
    fn test_email_filter_is_query_encoded() {
        let (api, rx) = serve_once("200 OK", r#"{"data": [{"id": 1}, {"id": 2}]}"#);

        let count = api.count_people_with_email("a+b@x.com").unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            rx.recv().unwrap().request_line,
            "GET /api/pessoas?filters%5BEmail%5D%5B%24eq%5D=a%2Bb%40x.com HTTP/1.1"
        );
    }

    #[test]
    fn test_create_person_posts_wrapped_record() {
        let (api, rx) = serve_once("201 Created", r#"{"data": {"id": 4, "documentId": "abc123"}}"#);

        let id = api
            .create_person(&NewPerson::new("Ana Silva", "ana@example.com", 10, 1))
            .unwrap();

        assert_eq!(id, "abc123");
        let received = rx.recv().unwrap();
        assert_eq!(received.request_line, "POST /api/pessoas HTTP/1.1");
        let body: serde_json::Value = serde_json::from_str(&received.body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "data": {"Nome": "Ana Silva", "Email": "ana@example.com", "Cidade": {"id": 10}, "Estado": {"id": 1}}
            })
        );
    }

    #[test]
    fn test_create_person_without_document_id_fails() {
        let (api, _rx) = serve_once("200 OK", r#"{"data": {"id": 4}}"#);

        let error = api
            .create_person(&NewPerson::new("Ana Silva", "ana@example.com", 10, 1))
            .unwrap_err();

        assert!(matches!(error, ApiError::MissingDocumentId));
    }

    #[test]
    fn test_get_person_requests_populated_relations() {
        let (api, rx) = serve_once(
            "200 OK",
            r#"{"data": {"Nome": "Ana Silva", "Email": "ana@example.com", "Cidade": {"id": 10, "Nome": "Salvador"}, "Estado": {"id": 1, "Nome": "Bahia"}}}"#,
        );

        let person = api.get_person("abc123").unwrap();

        assert_eq!(person.city_name(), "Salvador");
        assert_eq!(person.state_name(), "Bahia");
        assert_eq!(
            rx.recv().unwrap().request_line,
            "GET /api/pessoas/abc123?populate=Cidade%2CEstado HTTP/1.1"
        );
    }

    #[test]
    fn test_not_found_keeps_status_and_body() {
        let (api, _rx) = serve_once("404 Not Found", r#"{"error": {"status": 404}}"#);

        let error = api.get_person("missing").unwrap_err();

        assert!(matches!(error, ApiError::Status { status: 404, .. }));
        assert!(error.to_string().starts_with("backend answered 404: "));
        assert_eq!(error.class(), FailureClass::Backend);
    }

    #[test]
    fn test_endpoint_joins_base_without_double_slash() {
        assert_eq!(api("http://localhost:1337").endpoint("estados"), "http://localhost:1337/api/estados");
        assert_eq!(api("http://localhost:1337/").endpoint("estados"), "http://localhost:1337/api/estados");
        assert_eq!(
            api("https://cms.example.com/v1/").endpoint("pessoas/abc"),
            "https://cms.example.com/v1/api/pessoas/abc"
        );
    }

    #[test]
    fn test_create_payload_shape() {
        let person = NewPerson::new("Ana Silva", "ana@example.com", 10, 1);
        let body = serde_json::to_value(Payload { data: &person }).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "data": {
                    "Nome": "Ana Silva",
                    "Email": "ana@example.com",
                    "Cidade": {"id": 10},
                    "Estado": {"id": 1}
                }
            })
        );
    }

    #[test]
    fn test_state_list_envelope() {
        let body = r#"{"data": [{"id": 1, "Nome": "Bahia"}, {"id": 2, "Nome": "Ceará"}], "meta": {}}"#;
        let envelope: Envelope<Vec<State>> = serde_json::from_str(body).unwrap();
        let names: Vec<&str> = envelope.data.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Bahia", "Ceará"]);
    }

    #[test]
    fn test_envelope_without_data_is_a_decode_error() {
        let result: Result<Envelope<Vec<State>>, _> = serde_json::from_str(r#"{"error": "nope"}"#);
        let error = ApiError::from(result.unwrap_err());
        assert_eq!(error.class(), FailureClass::Network);
    }

    #[test]
    fn test_created_record_without_document_id() {
        let envelope: Envelope<Option<CreatedRecord>> =
            serde_json::from_str(r#"{"data": {"id": 4}}"#).unwrap();
        assert!(envelope.data.unwrap().document_id.is_none());

        let envelope: Envelope<Option<CreatedRecord>> = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_status_errors_are_backend_failures() {
        let error = ApiError::Status {
            status: 404,
            body: "{}".to_string(),
        };
        assert_eq!(error.class(), FailureClass::Backend);
        assert_eq!(ApiError::MissingDocumentId.class(), FailureClass::Backend);
    }
}
