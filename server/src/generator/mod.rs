pub mod regions;
pub mod samples;
