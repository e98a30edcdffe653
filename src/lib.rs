// Library for tests to access modules

pub mod config;
pub mod format;
pub mod interface_repo;
pub mod models;
pub mod presenter;
pub mod query;
pub mod sampler;
pub mod selector;
pub mod worker;
