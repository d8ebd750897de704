//! Core pipeline: scan, parse, classify, plan, execute.

pub mod analyzer;
pub mod executor;
pub mod parser;
pub mod planner;
pub mod scanner;
pub mod versions;
