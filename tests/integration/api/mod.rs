//! API integration tests
//!
//! Integration tests for all API endpoints

mod auth_test;
mod component_test;
mod page_test;
mod section_test;
mod template_test;
mod website_test;
