//! Typed view over the catalog's untyped JSON responses.

use {serde::Serialize, serde_json::Value};

use crate::{Error, Result};

/// How a single catalog response should be interpreted.
///
/// Matching is substring containment on the raw fields, which is what the
/// service has always been checked against (`"404 - Not Found"`,
/// `"302 - Found"`, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogResponse {
    /// `errors[0].error_message` mentions 404.
    ErrorList { message: String },
    /// `status` mentions 302; `location` is the next hop.
    Redirect { location: String },
    /// Anything else is the descriptor itself.
    Success(Value),
}

impl CatalogResponse {
    pub fn classify(value: Value) -> Result<Self> {
        if let Some(message) = first_error_message(&value)
            && message.contains("404")
        {
            return Ok(Self::ErrorList {
                message: message.to_string(),
            });
        }

        let redirected = value
            .get("status")
            .and_then(Value::as_str)
            .is_some_and(|s| s.contains("302"));
        if redirected {
            let location = value
                .get("location")
                .and_then(Value::as_str)
                .filter(|l| !l.is_empty())
                .ok_or(Error::MissingLocation)?;
            return Ok(Self::Redirect {
                location: location.to_string(),
            });
        }

        Ok(Self::Success(value))
    }
}

fn first_error_message(value: &Value) -> Option<&str> {
    value
        .get("errors")?
        .as_array()?
        .first()?
        .get("error_message")?
        .as_str()
}

/// Resolved catalog metadata, passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Descriptor(Value);

impl Descriptor {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn id(&self) -> Option<u64> {
        self.0.get("id").and_then(Value::as_u64)
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    /// `track`, `playlist`, `user`, ... as reported by the catalog.
    pub fn kind(&self) -> Option<&str> {
        self.str_field("kind")
    }

    pub fn permalink_url(&self) -> Option<&str> {
        self.str_field("permalink_url")
    }

    /// Reference handed to the library on placement: the API `uri` when
    /// present, else the public permalink.
    pub fn media_reference(&self) -> Option<&str> {
        self.str_field("uri").or_else(|| self.permalink_url())
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Value> for Descriptor {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Outcome of resolving one input URL.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(Descriptor),
    NotFound,
}

impl Resolution {
    pub fn descriptor(&self) -> Option<&Descriptor> {
        match self {
            Self::Resolved(d) => Some(d),
            Self::NotFound => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
