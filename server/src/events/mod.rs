//! Monthly Event Lifecycle

pub mod materializer;
pub mod scheduler;

pub use materializer::EventMaterializer;
pub use scheduler::EventScheduler;
