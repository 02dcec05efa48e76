//! Observability for the Pronouns API: tracing subscriber setup with optional
//! OpenTelemetry export.

pub mod tracing_setup;
