//! post::errors
//!
//! Error taxonomy reported to the endpoint layer.

use thiserror::Error;

use crate::core::config::ConfigError;
use crate::date::DateError;
use crate::jf2::NormaliseError;
use crate::permalink::PermalinkError;
use crate::store::StoreError;
use crate::update::UpdateError;

/// Errors from post data operations.
///
/// Every lower-level error is folded into one of these kinds so callers
/// only need to match on [`ErrorKind`].
#[derive(Debug, Error)]
pub enum PostDataError {
    /// Publication configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Request input is missing or has the wrong shape.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The post type has no configuration.
    #[error("no configuration found for {0} post type")]
    UnsupportedType(String),

    /// No stored post has this URL.
    #[error("no post record available for {0}")]
    NotFound(String),

    /// A date could not be parsed.
    #[error("invalid date: {0}")]
    Parse(String),

    /// The post store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Coarse classification of a [`PostDataError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    Validation,
    UnsupportedType,
    NotFound,
    Parse,
    Store,
}

impl PostDataError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PostDataError::Config(_) => ErrorKind::Config,
            PostDataError::Validation(_) => ErrorKind::Validation,
            PostDataError::UnsupportedType(_) => ErrorKind::UnsupportedType,
            PostDataError::NotFound(_) => ErrorKind::NotFound,
            PostDataError::Parse(_) => ErrorKind::Parse,
            PostDataError::Store(_) => ErrorKind::Store,
        }
    }

    /// HTTP status for the error.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Config => 500,
            ErrorKind::Validation | ErrorKind::Parse => 400,
            ErrorKind::UnsupportedType => 501,
            ErrorKind::NotFound => 404,
            ErrorKind::Store => 502,
        }
    }
}

impl From<DateError> for PostDataError {
    fn from(e: DateError) -> Self {
        match e {
            DateError::Parse(input) => PostDataError::Parse(input),
            DateError::InvalidTimeZone(_) => PostDataError::Config(e.to_string()),
        }
    }
}

impl From<ConfigError> for PostDataError {
    fn from(e: ConfigError) -> Self {
        PostDataError::Config(e.to_string())
    }
}

impl From<PermalinkError> for PostDataError {
    fn from(e: PermalinkError) -> Self {
        PostDataError::Config(e.to_string())
    }
}

impl From<UpdateError> for PostDataError {
    fn from(e: UpdateError) -> Self {
        PostDataError::Validation(e.to_string())
    }
}

impl From<NormaliseError> for PostDataError {
    fn from(e: NormaliseError) -> Self {
        match e {
            NormaliseError::Date(e) => e.into(),
            NormaliseError::InvalidProperty { .. } => PostDataError::Validation(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        let cases = [
            (PostDataError::Config("x".into()), 500),
            (PostDataError::Validation("x".into()), 400),
            (PostDataError::UnsupportedType("note".into()), 501),
            (PostDataError::NotFound("https://a.example".into()), 404),
            (PostDataError::Parse("x".into()), 400),
            (PostDataError::Store(StoreError::Backend("x".into())), 502),
        ];
        for (error, status) in cases {
            assert_eq!(error.status_code(), status, "{error}");
        }
    }

    #[test]
    fn date_errors_map_by_cause() {
        let parse: PostDataError = DateError::Parse("soon".into()).into();
        assert_eq!(parse.kind(), ErrorKind::Parse);

        let zone: PostDataError = DateError::InvalidTimeZone("Mars/Base".into()).into();
        assert_eq!(zone.kind(), ErrorKind::Config);
    }

    #[test]
    fn update_errors_are_validation() {
        let error: PostDataError = UpdateError::NotAnArray {
            property: "name".into(),
        }
        .into();
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[test]
    fn normalise_errors_unwrap_dates() {
        let error: PostDataError = NormaliseError::Date(DateError::Parse("x".into())).into();
        assert_eq!(error.kind(), ErrorKind::Parse);

        let error: PostDataError = NormaliseError::InvalidProperty {
            property: "published".into(),
            message: "expected a date string".into(),
        }
        .into();
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[test]
    fn display() {
        assert_eq!(
            PostDataError::UnsupportedType("note".into()).to_string(),
            "no configuration found for note post type"
        );
        assert_eq!(
            PostDataError::NotFound("https://a.example/1".into()).to_string(),
            "no post record available for https://a.example/1"
        );
    }
}
