//! Error type shared by the record repositories.

use serde_json::json;

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Failures raised by student, course and user repository adapters.
    pub enum RecordStoreError {
        /// The store could not be reached.
        Connection { message: String } => "record store connection failed: {message}",
        /// A query or mutation failed while executing.
        Query { message: String } => "record store query failed: {message}",
        /// A unique constraint rejected the write.
        Duplicate { field: String } => "a record with this {field} already exists",
    }
}

impl From<RecordStoreError> for Error {
    fn from(value: RecordStoreError) -> Self {
        match value {
            RecordStoreError::Connection { message } => {
                tracing::warn!(%message, "record store unavailable");
                Error::service_unavailable("record store unavailable")
            }
            RecordStoreError::Query { message } => {
                tracing::error!(%message, "record store query failed");
                Error::internal(format!("record store error: {message}"))
            }
            RecordStoreError::Duplicate { field } => {
                Error::invalid_request(format!("a record with this {field} already exists"))
                    .with_details(json!({ "field": field, "code": "duplicate" }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(RecordStoreError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(RecordStoreError::query("syntax"), ErrorCode::InternalError)]
    #[case(RecordStoreError::duplicate("email"), ErrorCode::InvalidRequest)]
    fn maps_to_domain_codes(#[case] error: RecordStoreError, #[case] expected: ErrorCode) {
        let mapped: Error = error.into();
        assert_eq!(mapped.code(), expected);
    }

    #[rstest]
    fn duplicate_names_the_field() {
        let mapped: Error = RecordStoreError::duplicate("email").into();
        assert_eq!(mapped.message(), "a record with this email already exists");
        assert_eq!(mapped.details().expect("details")["field"], "email");
    }
}
