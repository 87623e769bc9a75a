//! Application-level configuration constants.

// UI behavior
/// Delay between a recognized URL paste and the automatic preview.
pub const URL_DEBOUNCE_MS: u32 = 500;
/// Grace period for a preview to settle before the gated form submit.
pub const SUBMIT_SETTLE_MS: u32 = 1_500;

// Form wiring
pub const CONVERT_ACTION: &str = "/convert";

// User prompts
pub const URL_PROCESSING_PROMPT: &str = "Please wait while the URL is processed";
