//! Library side of `csv2fhir`: logging setup and the concurrent pipeline.

pub mod logging;
pub mod pipeline;
