//! # Route Modules
//!
//! Each module defines an Axum Router for one API surface area.
//! Routers are assembled in [`crate::app`].

pub mod certificates;
pub mod roles;
pub mod uploads;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::services::RegistryError;

/// Acknowledgement body for mutating endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Log a registry failure under `operation` and convert it for the response.
fn rejected(operation: &'static str) -> impl FnOnce(RegistryError) -> AppError {
    move |e| {
        e.log(operation);
        AppError::from(e)
    }
}

/// Log a request that failed before reaching a service under `operation`.
fn logged<E: Into<AppError>>(operation: &'static str) -> impl FnOnce(E) -> AppError {
    move |e| {
        let e = e.into();
        e.log(operation);
        e
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use certreg_core::ValidationError;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = out.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn rejected_requests_are_logged_with_operation() {
        let logs = capture(|| {
            let err = logged("save_role")(AppError::BadRequest("expected value".into()));
            assert!(matches!(err, AppError::BadRequest(_)));
        });
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("save_role"), "{logs}");
        assert!(logs.contains("expected value"), "{logs}");
    }

    #[test]
    fn validation_errors_convert_and_log() {
        let logs = capture(|| {
            let err = logged("delete_certificate")(ValidationError::InvalidCertificateId("abc".into()));
            assert!(matches!(err, AppError::Validation(_)));
        });
        assert!(logs.contains("delete_certificate"), "{logs}");
    }

    #[test]
    fn internal_failures_are_logged_at_error() {
        let logs = capture(|| {
            logged("upload_certificate")(AppError::Internal("writing spool file: disk full".into()));
        });
        assert!(logs.contains("ERROR"), "{logs}");
        assert!(logs.contains("upload_certificate"), "{logs}");
        assert!(logs.contains("disk full"), "{logs}");
    }

    #[test]
    fn registry_failures_are_logged_with_operation() {
        let logs = capture(|| {
            let err = rejected("get_role")(RegistryError::NotFound("no role assigned to wallet 0xZZ".into()));
            assert!(matches!(err, AppError::NotFound(_)));
        });
        assert!(logs.contains("get_role"), "{logs}");
        assert!(logs.contains("0xZZ"), "{logs}");
    }
}
