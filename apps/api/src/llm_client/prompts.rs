// Cross-cutting prompt fragments shared by every task agent.
// Task-specific prompts live in tickets/prompts.rs.

/// Appended to every task's role instruction.
pub const JSON_ONLY_SUFFIX: &str = "Always respond with valid JSON.";

/// Joins a role instruction with the JSON-only suffix.
pub fn system_instruction(role: &str) -> String {
    format!("{} {JSON_ONLY_SUFFIX}", role.trim_end())
}
