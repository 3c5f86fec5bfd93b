//! Record validation and persistence

pub mod service;

pub use service::RecordService;
