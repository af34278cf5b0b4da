// Module layout (Clean Architecture style)
// - bootstrap: configuration and service wiring
// - domain: votes and tallies
// - application: ports, use cases and counters
// - infrastructure: Postgres and search api adapters
// - presentation: HTTP handlers and routing

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
