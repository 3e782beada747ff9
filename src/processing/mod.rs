pub mod aggregate;
pub mod ranges;
pub mod statistics;
pub mod trend;
