pub mod context;
pub mod display;
pub mod measurement;
pub mod patient;
pub mod template;
