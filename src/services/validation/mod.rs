mod pipeline;
mod step;

pub use pipeline::{ValidationPipeline, ValidationPipelineBuilder};
pub use step::{ensure_unique_owner, FnStep, ValidatorStep};
