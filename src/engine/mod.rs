//! Core engine — quotation resolution, trade simulation, triangle
//! evaluation, and the scan loop that ties them together.

pub mod quotation;
pub mod simulator;
pub mod evaluator;
pub mod scanner;

pub use evaluator::{evaluate, PairQuotes};
pub use scanner::TriangleScanner;
