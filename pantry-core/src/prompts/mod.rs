//! Prompt templates.

pub mod classify_image;
pub mod recipes;
pub mod steps;

pub use classify_image::CLASSIFY_IMAGE_PROMPT;
pub use recipes::{render_recipes_prompt, RECIPES_SYSTEM_PROMPT};
pub use steps::{render_steps_prompt, STEPS_SYSTEM_PROMPT};
