//! Step-by-step instructions prompt for a single dish.

pub const STEPS_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

pub fn render_steps_prompt(item_name: &str) -> String {
    format!(
        "Using the ingredients {item_name}, provide short step-by-step instructions for a healthy recipe. Only provide text instructions, not JSON.",
        item_name = item_name
    )
}
