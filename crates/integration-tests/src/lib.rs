//! End-to-end tests for the management client against a mock API
//!
//! All tests live under `tests/`; this library target is intentionally empty.
