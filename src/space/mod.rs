// Integrations with the JetBrains Space HTTP API.

pub mod api;
