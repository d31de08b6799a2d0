pub mod access;
pub mod blank;
pub mod call;
pub mod config;
pub mod dictionary;
pub mod directory;
pub mod environment;
pub mod errors;
pub mod export;
pub mod query;
pub mod routes;
pub mod store;
pub mod timestamp;
pub mod urls;
