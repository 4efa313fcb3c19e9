//! Integration test harness.

mod mock_gateway;
mod scan_cycle;
