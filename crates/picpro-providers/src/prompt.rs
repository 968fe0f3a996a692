//! Fixed request content sent with every photo.

/// Model used when no other is configured
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// Base URL of the Google generative language API
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// The transformation instruction. Not user-editable.
pub const HEADSHOT_INSTRUCTION: &str = "Transform this photo into a professional LinkedIn profile picture. \
Keep the person's facial features and identity exactly the same - this is critical. \
Improve the lighting to be soft, flattering studio lighting. \
Change the background to a professional dark gray studio background. \
Ensure the clothing looks professional and neat (business casual). \
The style should be high-quality, photorealistic, and trustworthy.";
