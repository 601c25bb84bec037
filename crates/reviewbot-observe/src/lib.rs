//! Observability setup for the review chatbot: structured logging with an
//! optional OpenTelemetry bridge.

pub mod tracing_setup;
