//! Pipeline runner that executes steps in sequence.

use super::errors::{PipelineError, PipelineResult};
use super::step::PipelineStep;
use super::types::{Context, JobState, StepOutcome};

/// Pipeline that runs a sequence of steps.
///
/// The pipeline executes steps in order, running validation before
/// and after each step, and stops at the first failure.
pub struct Pipeline {
    /// Steps to execute in order.
    steps: Vec<Box<dyn PipelineStep>>,
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add a step to the pipeline.
    pub fn add_step<S: PipelineStep + 'static>(&mut self, step: S) -> &mut Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Add a step (builder pattern).
    pub fn with_step<S: PipelineStep + 'static>(mut self, step: S) -> Self {
        self.add_step(step);
        self
    }

    /// Run the pipeline with the given context and state.
    ///
    /// Executes each step in order:
    /// 1. Run `validate_input`
    /// 2. Run `execute`
    /// 3. Run `validate_output` (if execute returned Success)
    pub fn run(&self, ctx: &Context, state: &mut JobState) -> PipelineResult<PipelineRunResult> {
        let mut result = PipelineRunResult {
            steps_completed: Vec::new(),
            steps_skipped: Vec::new(),
        };

        for step in &self.steps {
            let step_name = step.name();
            tracing::debug!("Starting step '{}': {}", step_name, step.description());

            if let Err(e) = step.validate_input(ctx) {
                ctx.logger.error(&format!("Step '{}' failed: {}", step_name, e));
                return Err(PipelineError::step_failed(&ctx.job_name, step_name, e));
            }

            let outcome = step.execute(ctx, state).map_err(|e| {
                ctx.logger.error(&format!("Step '{}' failed: {}", step_name, e));
                PipelineError::step_failed(&ctx.job_name, step_name, e)
            })?;

            match outcome {
                StepOutcome::Success => {
                    if let Err(e) = step.validate_output(ctx, state) {
                        ctx.logger.error(&format!("Step '{}' failed: {}", step_name, e));
                        return Err(PipelineError::step_failed(&ctx.job_name, step_name, e));
                    }

                    tracing::debug!("Step '{}' completed", step_name);
                    result.steps_completed.push(step_name.to_string());
                }
                StepOutcome::Skipped(reason) => {
                    tracing::debug!("Step '{}' skipped: {}", step_name, reason);
                    result.steps_skipped.push(step_name.to_string());
                }
            }
        }

        Ok(result)
    }

    /// Get the number of steps in the pipeline.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Get step names in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineRunResult {
    /// Steps that completed successfully.
    pub steps_completed: Vec<String>,
    /// Steps that were skipped.
    pub steps_skipped: Vec<String>,
}

impl PipelineRunResult {
    /// Total number of steps that ran.
    pub fn total_steps(&self) -> usize {
        self.steps_completed.len() + self.steps_skipped.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::errors::StepError;
    use crate::orchestrator::test_support::test_context;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingStep {
        name: &'static str,
        execute_count: Arc<AtomicUsize>,
        fail: bool,
    }

    impl PipelineStep for CountingStep {
        fn name(&self) -> &str {
            self.name
        }

        fn validate_input(&self, _ctx: &Context) -> Result<(), StepError> {
            Ok(())
        }

        fn execute(&self, _ctx: &Context, _state: &mut JobState) -> Result<StepOutcome, StepError> {
            self.execute_count.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(StepError::command_failed("tool", 1, "boom"))
            } else {
                Ok(StepOutcome::Success)
            }
        }

        fn validate_output(&self, _ctx: &Context, _state: &JobState) -> Result<(), StepError> {
            Ok(())
        }
    }

    fn counting(name: &'static str, count: &Arc<AtomicUsize>, fail: bool) -> CountingStep {
        CountingStep {
            name,
            execute_count: Arc::clone(count),
            fail,
        }
    }

    #[test]
    fn pipeline_builds_correctly() {
        let count = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new()
            .with_step(counting("Step1", &count, false))
            .with_step(counting("Step2", &count, false));

        assert_eq!(pipeline.step_count(), 2);
        assert_eq!(pipeline.step_names(), vec!["Step1", "Step2"]);
    }

    #[test]
    fn runs_all_steps_in_order() {
        let (ctx, _dir) = test_context(&[]);
        let count = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new()
            .with_step(counting("Step1", &count, false))
            .with_step(counting("Step2", &count, false));

        let result = pipeline.run(&ctx, &mut JobState::new("t")).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(result.steps_completed, vec!["Step1", "Step2"]);
        assert_eq!(result.total_steps(), 2);
    }

    #[test]
    fn stops_at_first_failure() {
        let (ctx, _dir) = test_context(&[]);
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new()
            .with_step(counting("Broken", &first, true))
            .with_step(counting("Never", &second, false));

        let err = pipeline.run(&ctx, &mut JobState::new("t")).unwrap_err();

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
        match err {
            PipelineError::StepFailed { step_name, .. } => assert_eq!(step_name, "Broken"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
