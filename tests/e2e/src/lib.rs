//! End-to-end scenarios: a real HTTPS server on an ephemeral port driven by
//! the client library.

pub mod scenarios;
pub mod test_utils;
