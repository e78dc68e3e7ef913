pub mod advice;
pub mod analytics;
pub mod backup;
pub mod clock;
pub mod config;
pub mod domain;
pub mod engine;
pub mod logging;
pub mod mvi;
pub mod session;
pub mod store;
