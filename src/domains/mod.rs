//! Domains module containing business logic.
//!
//! The server exposes a single domain, `tools`: the generic registry and
//! invocation machinery plus the weather and event tool definitions.

pub mod tools;
