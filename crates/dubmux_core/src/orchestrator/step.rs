//! Pipeline step trait definition.
//!
//! All pipeline steps implement this trait, providing a consistent
//! interface for validation and execution.

use super::errors::StepResult;
use super::types::{Context, JobState, StepOutcome};

/// Trait for pipeline steps.
///
/// Each step in the pipeline implements this trait. The pipeline runner
/// calls these methods in order:
///
/// 1. `validate_input` - Check preconditions before execution
/// 2. `execute` - Perform the step's work
/// 3. `validate_output` - Verify the step produced valid output
///
/// # Example
///
/// ```ignore
/// struct ProbeStep;
///
/// impl PipelineStep for ProbeStep {
///     fn name(&self) -> &str { "Probe" }
///
///     fn validate_input(&self, ctx: &Context) -> StepResult<()> {
///         if !ctx.paths.work_dir.is_dir() {
///             return Err(StepError::invalid_input("No work directory"));
///         }
///         Ok(())
///     }
///
///     fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
///         // Run a tool...
///         Ok(StepOutcome::Success)
///     }
///
///     fn validate_output(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait PipelineStep: Send + Sync {
    /// Get the step name (for logging and error context).
    fn name(&self) -> &str;

    /// Validate inputs before execution.
    ///
    /// Called before `execute`. Should check that all required
    /// preconditions are met (files exist, previous steps completed, etc.).
    fn validate_input(&self, ctx: &Context) -> StepResult<()>;

    /// Execute the step's main work.
    ///
    /// Should perform the step's processing and record results in `state`.
    /// Returns `StepOutcome::Skipped` if there is nothing to do (not an error).
    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome>;

    /// Validate outputs after execution.
    ///
    /// Called after `execute` returns `Success`.
    fn validate_output(&self, ctx: &Context, state: &JobState) -> StepResult<()>;

    /// Human-readable description of what this step does.
    fn description(&self) -> &str {
        self.name()
    }
}
