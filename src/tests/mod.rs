//! Integration testing module
//!
//! End-to-end tests for the playlist library:
//! - Decode, mutate and re-encode lifecycles
//! - Round-trip stability of re-encoded output
//! - Master playlist handling and sniffing
//! - Error reporting for malformed input
