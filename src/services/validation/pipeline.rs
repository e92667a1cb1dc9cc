use std::sync::Arc;

use tracing::debug;

use super::ValidatorStep;
use crate::domain::errors::ServiceResult;

/// An ordered, immutable sequence of validator steps.
///
/// Steps run in declaration order and the first failure aborts the run, so
/// when several rules would reject a candidate the earliest one is reported.
pub struct ValidationPipeline<E> {
    steps: Vec<Arc<dyn ValidatorStep<E>>>,
}

impl<E> ValidationPipeline<E>
where
    E: Send + Sync,
{
    pub fn new(steps: Vec<Arc<dyn ValidatorStep<E>>>) -> Self {
        Self { steps }
    }

    /// A pipeline that accepts every candidate
    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn builder() -> ValidationPipelineBuilder<E> {
        ValidationPipelineBuilder { steps: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    pub async fn run_all(&self, candidate: &E) -> ServiceResult<()> {
        for step in &self.steps {
            debug!(step = step.name(), "running validation step");
            if let Err(err) = step.check(candidate).await {
                debug!(step = step.name(), error = %err, "validation step rejected candidate");
                return Err(err);
            }
        }
        Ok(())
    }
}

impl<E> Clone for ValidationPipeline<E> {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
        }
    }
}

impl<E> std::fmt::Debug for ValidationPipeline<E>
where
    E: Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationPipeline")
            .field("steps", &self.step_names())
            .finish()
    }
}

/// Builder for ValidationPipeline
pub struct ValidationPipelineBuilder<E> {
    steps: Vec<Arc<dyn ValidatorStep<E>>>,
}

impl<E> ValidationPipelineBuilder<E>
where
    E: Send + Sync,
{
    pub fn step<S>(mut self, step: S) -> Self
    where
        S: ValidatorStep<E> + 'static,
    {
        self.steps.push(Arc::new(step));
        self
    }

    /// Add a step that is shared with another pipeline
    pub fn shared_step(mut self, step: Arc<dyn ValidatorStep<E>>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn build(self) -> ValidationPipeline<E> {
        ValidationPipeline::new(self.steps)
    }
}
