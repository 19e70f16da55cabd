use super::errors::RouteError;

/// The screens reachable in the client, addressed by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/person`
    NewPerson,
    /// `/person/{documentId}`; the identifier is kept raw and checked on entry
    PersonDetail(String),
}

impl Route {
    /// Parses a path such as `/person` or `/person/abc123`.
    ///
    /// Returns `None` for paths outside the `/person` tree. Anything after
    /// `/person/` is taken as the identifier, even when it is empty or has
    /// more segments; [`Route::document_id`] rejects those.
    ///
    /// # Examples
    ///
    /// ```
    /// use cadastro::domain::Route;
    ///
    /// assert_eq!(Route::parse("/person"), Some(Route::NewPerson));
    /// assert_eq!(Route::parse("/person/abc123"), Some(Route::PersonDetail("abc123".into())));
    /// assert_eq!(Route::parse("/people"), None);
    /// ```
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim().trim_start_matches('/');
        let rest = trimmed.strip_prefix("person")?;

        if rest.is_empty() {
            Some(Route::NewPerson)
        } else {
            rest.strip_prefix('/').map(|id| Route::PersonDetail(id.to_string()))
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::NewPerson => "/person".to_string(),
            Route::PersonDetail(id) => format!("/person/{}", id),
        }
    }

    /// The identifier of a detail route, if it is a single well-formed segment.
    pub fn document_id(&self) -> Result<&str, RouteError> {
        match self {
            Route::NewPerson => Err(RouteError::MissingId),
            Route::PersonDetail(id) => validate_document_id(id),
        }
    }
}

pub fn validate_document_id(raw: &str) -> Result<&str, RouteError> {
    if raw.is_empty() {
        return Err(RouteError::MissingId);
    }
    if raw
        .chars()
        .any(|c| c == '/' || c == '?' || c == '#' || c.is_whitespace() || c.is_control())
    {
        return Err(RouteError::MalformedId(raw.to_string()));
    }
    Ok(raw)
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}
