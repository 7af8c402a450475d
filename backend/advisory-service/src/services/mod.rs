pub mod advisory;

pub use advisory::AdvisoryService;
