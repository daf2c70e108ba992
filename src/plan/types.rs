//! ActionPlan and Step types
//!
//! A plan is fully transient: it exists for one HTTP exchange and is never
//! mutated after creation. A new plan fully replaces the old one.

use serde::{Deserialize, Serialize};

use super::PlanError;

/// Minimum number of steps in a usable plan
pub const MIN_STEPS: usize = 3;

/// Maximum number of steps in a usable plan
pub const MAX_STEPS: usize = 8;

/// A generated action plan, echoing the input it was generated for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPlan {
    pub goal: String,
    pub barrier: String,
    /// Ordered execution sequence, length MIN_STEPS..=MAX_STEPS
    pub steps: Vec<Step>,
}

/// One step of an action plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Short title, a few words
    pub title: String,
    /// 1-3 sentences of free text
    pub description: String,
    /// Loose timeframe label ("Today", "Week 1", "Ongoing", ...)
    pub timeframe: String,
}

impl ActionPlan {
    /// Check the invariants a successfully produced plan must satisfy
    ///
    /// Step count within bounds and every field non-empty. Out-of-range step
    /// counts are rejected outright, never truncated or padded.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.steps.len() < MIN_STEPS || self.steps.len() > MAX_STEPS {
            return Err(PlanError::format(format!(
                "expected {}-{} steps, got {}",
                MIN_STEPS,
                MAX_STEPS,
                self.steps.len()
            )));
        }

        for (idx, step) in self.steps.iter().enumerate() {
            if step.title.trim().is_empty()
                || step.description.trim().is_empty()
                || step.timeframe.trim().is_empty()
            {
                return Err(PlanError::format(format!("step {} has an empty field", idx + 1)));
            }
        }

        Ok(())
    }
}

/// Incoming request body for plan generation
///
/// Absent fields deserialize as empty strings so that "missing" and "empty"
/// collapse into the same client error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlanRequest {
    pub goal: String,
    pub barrier: String,
}

impl PlanRequest {
    /// Trim both fields and refuse to proceed if either is empty
    ///
    /// Returns the trimmed pair; no provider call may be issued before this
    /// succeeds.
    pub fn validate(&self) -> Result<(String, String), PlanError> {
        let goal = self.goal.trim();
        let barrier = self.barrier.trim();

        if goal.is_empty() || barrier.is_empty() {
            return Err(PlanError::InvalidInput("Missing goal or barrier".to_string()));
        }

        Ok((goal.to_string(), barrier.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(n: usize) -> Step {
        Step {
            title: format!("Step {n}"),
            description: format!("Do the thing number {n}."),
            timeframe: "Week 1".to_string(),
        }
    }

    fn plan_with_steps(count: usize) -> ActionPlan {
        ActionPlan {
            goal: "Learn piano".to_string(),
            barrier: "No time".to_string(),
            steps: (1..=count).map(step).collect(),
        }
    }

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(plan_with_steps(MIN_STEPS).validate().is_ok());
        assert!(plan_with_steps(MAX_STEPS).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_too_few_steps() {
        let err = plan_with_steps(2).validate().unwrap_err();
        assert!(matches!(err, PlanError::Format { .. }));
    }

    #[test]
    fn test_validate_rejects_too_many_steps() {
        let err = plan_with_steps(9).validate().unwrap_err();
        assert!(matches!(err, PlanError::Format { .. }));
    }

    #[test]
    fn test_validate_rejects_empty_step_field() {
        let mut plan = plan_with_steps(4);
        plan.steps[2].timeframe = "   ".to_string();
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_request_validate_trims() {
        let req = PlanRequest {
            goal: "  Learn piano  ".to_string(),
            barrier: "\nNo time\n".to_string(),
        };

        let (goal, barrier) = req.validate().unwrap();
        assert_eq!(goal, "Learn piano");
        assert_eq!(barrier, "No time");
    }

    #[test]
    fn test_request_validate_rejects_empty() {
        let req = PlanRequest {
            goal: "".to_string(),
            barrier: "Fear".to_string(),
        };
        assert!(matches!(req.validate(), Err(PlanError::InvalidInput(_))));

        let req = PlanRequest {
            goal: "Learn piano".to_string(),
            barrier: "   ".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_request_missing_fields_deserialize_empty() {
        let req: PlanRequest = serde_json::from_str(r#"{"goal": "Learn piano"}"#).unwrap();
        assert_eq!(req.barrier, "");
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_plan_serializes_expected_shape() {
        let plan = plan_with_steps(3);
        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json["goal"], "Learn piano");
        assert_eq!(json["barrier"], "No time");
        assert_eq!(json["steps"].as_array().unwrap().len(), 3);
        assert!(json["steps"][0]["title"].is_string());
        assert!(json["steps"][0]["description"].is_string());
        assert!(json["steps"][0]["timeframe"].is_string());
    }
}
