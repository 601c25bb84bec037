//! Business logic and repository trait definitions for the review chatbot.
//!
//! This crate defines the "ports" (repository, provider and transport traits)
//! that the infrastructure and API layers implement. It depends only on
//! `reviewbot-types` -- never on `reviewbot-infra` or any database/IO crate.

pub mod chatbot;
pub mod llm;
pub mod relay;
pub mod repository;
pub mod service;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
