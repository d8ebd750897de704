pub mod execute;
pub mod plan;
