/// System instructions sent with every report request. The putter name is the
/// only variable content and travels separately as the user message.
pub const PUTTER_EXPERT_PROMPT: &str = include_str!("../prompts/putter_expert.md");
