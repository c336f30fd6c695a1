//! Recipe suggestion prompt built from a user's items and preferences.

pub const RECIPES_SYSTEM_PROMPT: &str = "You are a helpful assistant returning JSON.";

/// Render the recipe suggestion prompt.
///
/// Preferences are only mentioned when the user has set some.
pub fn render_recipes_prompt(preferences: &[String], items: &[String]) -> String {
    let items = items.join(", ");

    if preferences.is_empty() {
        format!(
            r#"Using items ({items}), list 5-10 healthy recipes in JSON under key "recipes"."#,
            items = items
        )
    } else {
        format!(
            r#"Using preferences ({preferences}) and items ({items}), list 5-10 healthy recipes in JSON under key "recipes", each with a name and calories."#,
            preferences = preferences.join(", "),
            items = items
        )
    }
}
