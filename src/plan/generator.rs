//! PlanGenerator - LLM-driven generation of action plans
//!
//! Takes a validated (goal, barrier) pair, asks the model for a coaching
//! plan via a `submit_plan` tool, and validates the result before anyone
//! else sees it.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::PlanError;
use super::types::{ActionPlan, MAX_STEPS, MIN_STEPS, Step};
use crate::config::LlmConfig;
use crate::llm::{CompletionRequest, CompletionResponse, LlmClient, Message, ToolDefinition};

/// Tool name the model calls to submit a structured plan
const SUBMIT_PLAN_TOOL: &str = "submit_plan";

/// Structured output the model submits
///
/// Unknown sibling fields (the model sometimes echoes goal/barrier) are
/// ignored; only `steps` matters.
#[derive(Debug, Clone, Deserialize)]
struct PlanOutput {
    steps: Vec<Step>,
}

/// PlanGenerator turns a goal/barrier pair into a validated ActionPlan
///
/// One outbound provider call per invocation. No retries - a failure is
/// terminal for the request and the caller may resubmit.
pub struct PlanGenerator {
    llm: Arc<dyn LlmClient>,
    max_tokens: u32,
    temperature: f64,
}

impl PlanGenerator {
    /// Create a new generator
    pub fn new(llm: Arc<dyn LlmClient>, config: &LlmConfig) -> Self {
        Self {
            llm,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    /// Generate an action plan for a trimmed, non-empty goal and barrier
    ///
    /// The returned plan always satisfies [`ActionPlan::validate`]; any
    /// failure along the way yields an error, never a partial plan.
    pub async fn generate(&self, goal: &str, barrier: &str) -> Result<ActionPlan, PlanError> {
        info!(goal_len = goal.len(), barrier_len = barrier.len(), "Generating action plan");

        let request = CompletionRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            messages: vec![Message::user(build_prompt(goal, barrier))],
            tools: vec![build_plan_tool()],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self.llm.complete(request).await?;

        debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            ?response.stop_reason,
            "generate: completion received"
        );

        let steps = self.parse_steps(response)?;

        let plan = ActionPlan {
            goal: goal.to_string(),
            barrier: barrier.to_string(),
            steps,
        };
        plan.validate()?;

        info!(step_count = plan.steps.len(), "Action plan generated");
        Ok(plan)
    }

    /// Extract steps from the completion response
    ///
    /// Primary path is the `submit_plan` tool call; when the model answers
    /// with plain text instead, fall back to parsing that text as a JSON
    /// object carrying a `steps` array.
    fn parse_steps(&self, response: CompletionResponse) -> Result<Vec<Step>, PlanError> {
        for tool_call in &response.tool_calls {
            if tool_call.name == SUBMIT_PLAN_TOOL {
                debug!("parse_steps: using submit_plan tool call");
                return self.parse_plan_input(&tool_call.input);
            }
        }

        if let Some(content) = &response.content {
            debug!("parse_steps: no tool call, parsing text content");
            let stripped = strip_code_fences(content);
            match serde_json::from_str::<PlanOutput>(stripped) {
                Ok(output) => return Ok(output.steps),
                Err(e) => {
                    // Raw payload stays in the log, never in the response
                    debug!(raw = %content, "parse_steps: unparseable content");
                    warn!(error = %e, "parse_steps: model text was not a plan object");
                    return Err(PlanError::format(format!("content was not a plan object: {e}")));
                }
            }
        }

        warn!("parse_steps: response had neither tool call nor text content");
        Err(PlanError::format("model produced no usable output"))
    }

    /// Parse the tool input into steps
    fn parse_plan_input(&self, input: &serde_json::Value) -> Result<Vec<Step>, PlanError> {
        let steps_json = input
            .get("steps")
            .ok_or_else(|| PlanError::format("missing 'steps' in submit_plan input"))?;

        let steps: Vec<Step> = serde_json::from_value(steps_json.clone())
            .map_err(|e| PlanError::format(format!("unparseable steps in submit_plan input: {e}")))?;

        Ok(steps)
    }
}

/// Strip a surrounding markdown code fence, if any
fn strip_code_fences(s: &str) -> &str {
    let s = s.trim();
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    // Opening fence may carry a language tag ("```json")
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Build the user prompt embedding goal and barrier verbatim
fn build_prompt(goal: &str, barrier: &str) -> String {
    format!(
        "User goal: {goal}\n\
         Main barrier: {barrier}\n\n\
         Generate {MIN_STEPS}-{MAX_STEPS} steps. Each step:\n\
         - title: 2-6 words\n\
         - description: 1-3 sentences, specific and kind\n\
         - timeframe: one of {timeframes}",
        timeframes = SUGGESTED_TIMEFRAMES.join(", "),
    )
}

/// Build the submit_plan tool definition
fn build_plan_tool() -> ToolDefinition {
    ToolDefinition::new(
        SUBMIT_PLAN_TOOL,
        "Submit the finished action plan. Call this once with all steps in execution order.",
        serde_json::json!({
            "type": "object",
            "properties": {
                "steps": {
                    "type": "array",
                    "minItems": MIN_STEPS,
                    "maxItems": MAX_STEPS,
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": {
                                "type": "string",
                                "description": "Short step title, 2-6 words"
                            },
                            "description": {
                                "type": "string",
                                "description": "1-3 sentences, specific and kind"
                            },
                            "timeframe": {
                                "type": "string",
                                "description": "Loose timeframe label, e.g. Today, Week 1, Ongoing"
                            }
                        },
                        "required": ["title", "description", "timeframe"]
                    }
                }
            },
            "required": ["steps"]
        }),
    )
}

/// Suggested timeframe vocabulary - offered to the model, not enforced
const SUGGESTED_TIMEFRAMES: &[&str] = &[
    "Today",
    "Tomorrow",
    "This Week",
    "Next 7 Days",
    "Week 1",
    "Week 2",
    "Ongoing",
];

/// System prompt: the coach persona
const SYSTEM_PROMPT: &str = "You are Goal Unblocker, a practical, warm coach. \
Given a user's goal and the main barrier blocking it, produce an action plan \
as steps: [{title, description, timeframe}]. \
Steps must be concrete, small, and doable. Vary suggestions each time. \
Submit the plan with the submit_plan tool.";
