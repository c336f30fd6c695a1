//! Food recognition prompt sent alongside an uploaded image.

pub const CLASSIFY_IMAGE_PROMPT: &str =
    "Name the food item and how many days it lasts in the fridge.";
