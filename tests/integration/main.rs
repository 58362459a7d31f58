//! Workspace-level integration tests.

mod cli_test;
mod helpers;
mod resolve_test;
