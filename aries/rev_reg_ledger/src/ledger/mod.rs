pub mod delta_fetcher;
pub mod genesis;
pub mod registry_scanner;
pub mod request_submitter;
pub mod transaction;
