#![allow(dead_code)]

//! Wizard state machine for the four-step optimization flow.
//!
//! The client walks upload → job → optimize → results. Modeled here as an
//! explicit immutable transition record so the forward/backward rules are
//! testable on their own: transitions move forward only on a step's
//! completion signal, backward only via explicit navigation, and the
//! optimize step triggers at most one run until the wizard is reset.

use crate::models::resume::{OptimizationResult, ResumeData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Upload,
    Job,
    Optimize,
    Results,
}

/// Signals that drive the wizard. Completion signals come from the handlers;
/// `Back` and `Reset` are explicit user navigation.
#[derive(Debug, Clone)]
pub enum WizardEvent {
    ResumeUploaded(ResumeData),
    JobSubmitted(String),
    OptimizationStarted,
    OptimizationCompleted(OptimizationResult),
    OptimizationFailed,
    Back,
    Reset,
}

/// One immutable snapshot of the wizard. `apply` consumes a state and returns
/// the next one; events that don't apply to the current step leave the state
/// unchanged.
#[derive(Debug, Clone)]
pub struct WizardState {
    pub step: Step,
    pub resume: Option<ResumeData>,
    pub job_description: Option<String>,
    pub result: Option<OptimizationResult>,
    pub optimizing: bool,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        WizardState {
            step: Step::Upload,
            resume: None,
            job_description: None,
            result: None,
            optimizing: false,
        }
    }

    /// True exactly when entering the optimize step should start a run:
    /// both artifacts present, nothing in flight, and no completed result.
    /// Re-entering after a completed run does not re-trigger.
    pub fn should_trigger_optimization(&self) -> bool {
        self.step == Step::Optimize
            && self.resume.is_some()
            && self.job_description.is_some()
            && !self.optimizing
            && self.result.is_none()
    }

    pub fn apply(self, event: WizardEvent) -> Self {
        match (self.step, event) {
            (Step::Upload, WizardEvent::ResumeUploaded(resume)) => WizardState {
                step: Step::Job,
                resume: Some(resume),
                ..self
            },
            (Step::Job, WizardEvent::JobSubmitted(description)) => WizardState {
                step: Step::Optimize,
                job_description: Some(description),
                ..self
            },
            (Step::Optimize, WizardEvent::OptimizationStarted)
                if self.should_trigger_optimization() =>
            {
                WizardState {
                    optimizing: true,
                    ..self
                }
            }
            (Step::Optimize, WizardEvent::OptimizationCompleted(result)) if self.optimizing => {
                WizardState {
                    step: Step::Results,
                    result: Some(result),
                    optimizing: false,
                    ..self
                }
            }
            (Step::Optimize, WizardEvent::OptimizationFailed) => WizardState {
                optimizing: false,
                ..self
            },
            (_, WizardEvent::Back) => WizardState {
                step: previous_step(self.step),
                ..self
            },
            (_, WizardEvent::Reset) => WizardState::new(),
            // Out-of-step completion signals are ignored.
            (_, _) => self,
        }
    }
}

fn previous_step(step: Step) -> Step {
    match step {
        Step::Upload | Step::Job => Step::Upload,
        Step::Optimize => Step::Job,
        Step::Results => Step::Optimize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::parser::fallback_result;

    fn resume() -> ResumeData {
        ResumeData::default()
    }

    fn job_description() -> String {
        "A sufficiently detailed job description for the optimizer.".to_string()
    }

    fn walk_to_optimize() -> WizardState {
        WizardState::new()
            .apply(WizardEvent::ResumeUploaded(resume()))
            .apply(WizardEvent::JobSubmitted(job_description()))
    }

    #[test]
    fn test_happy_path_walks_all_four_steps() {
        let state = WizardState::new();
        assert_eq!(state.step, Step::Upload);

        let state = state.apply(WizardEvent::ResumeUploaded(resume()));
        assert_eq!(state.step, Step::Job);

        let state = state.apply(WizardEvent::JobSubmitted(job_description()));
        assert_eq!(state.step, Step::Optimize);
        assert!(state.should_trigger_optimization());

        let state = state.apply(WizardEvent::OptimizationStarted);
        assert!(state.optimizing);
        assert!(!state.should_trigger_optimization());

        let state = state.apply(WizardEvent::OptimizationCompleted(fallback_result()));
        assert_eq!(state.step, Step::Results);
        assert!(state.result.is_some());
        assert!(!state.optimizing);
    }

    #[test]
    fn test_job_submission_before_upload_is_ignored() {
        let state = WizardState::new().apply(WizardEvent::JobSubmitted(job_description()));
        assert_eq!(state.step, Step::Upload);
        assert!(state.job_description.is_none());
    }

    #[test]
    fn test_optimize_does_not_trigger_without_artifacts() {
        let state = WizardState {
            step: Step::Optimize,
            ..WizardState::new()
        };
        assert!(!state.should_trigger_optimization());
    }

    #[test]
    fn test_in_flight_run_is_not_retriggered() {
        let state = walk_to_optimize().apply(WizardEvent::OptimizationStarted);
        assert!(!state.should_trigger_optimization());
        // A second start signal changes nothing.
        let state = state.apply(WizardEvent::OptimizationStarted);
        assert!(state.optimizing);
    }

    #[test]
    fn test_reentering_optimize_after_completed_run_does_not_retrigger() {
        let state = walk_to_optimize()
            .apply(WizardEvent::OptimizationStarted)
            .apply(WizardEvent::OptimizationCompleted(fallback_result()))
            .apply(WizardEvent::Back);
        assert_eq!(state.step, Step::Optimize);
        assert!(!state.should_trigger_optimization());
    }

    #[test]
    fn test_failed_run_allows_retrigger() {
        let state = walk_to_optimize()
            .apply(WizardEvent::OptimizationStarted)
            .apply(WizardEvent::OptimizationFailed);
        assert_eq!(state.step, Step::Optimize);
        assert!(state.should_trigger_optimization());
    }

    #[test]
    fn test_back_navigation_steps_backward_only() {
        let state = walk_to_optimize().apply(WizardEvent::Back);
        assert_eq!(state.step, Step::Job);
        // Collected artifacts survive backward navigation.
        assert!(state.resume.is_some());
        assert!(state.job_description.is_some());

        let state = state.apply(WizardEvent::Back).apply(WizardEvent::Back);
        assert_eq!(state.step, Step::Upload);
    }

    #[test]
    fn test_reset_clears_everything() {
        let state = walk_to_optimize()
            .apply(WizardEvent::OptimizationStarted)
            .apply(WizardEvent::OptimizationCompleted(fallback_result()))
            .apply(WizardEvent::Reset);
        assert_eq!(state.step, Step::Upload);
        assert!(state.resume.is_none());
        assert!(state.job_description.is_none());
        assert!(state.result.is_none());
        // A fresh walk can trigger again.
        let state = state
            .apply(WizardEvent::ResumeUploaded(resume()))
            .apply(WizardEvent::JobSubmitted(job_description()));
        assert!(state.should_trigger_optimization());
    }
}
