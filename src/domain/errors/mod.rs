mod service_errors;
mod validation_errors;

pub use service_errors::*;
pub use validation_errors::*;
