//! Integration test modules.

mod health_sync_test;
mod record_store_test;
mod session_flow_test;
