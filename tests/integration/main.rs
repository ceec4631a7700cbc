//! Integration tests for Wiki-Mapper

mod crawl_tests;
mod pipeline_tests;
