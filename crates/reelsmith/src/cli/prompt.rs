//! Prompt command handler.

use reelsmith_core::{Operation, OperationParams, build_prompt};
use reelsmith_error::ReelsmithResult;

/// Validate `input` for `operation` and return the prompt it produces.
#[tracing::instrument(skip(input), fields(operation = %operation))]
pub fn handle_prompt_command(operation: Operation, input: &str) -> ReelsmithResult<String> {
    let params = OperationParams::parse(operation, input.as_bytes())?;
    let prompt = build_prompt(&params);
    tracing::debug!(prompt_len = prompt.len(), "Built prompt");
    Ok(prompt)
}
