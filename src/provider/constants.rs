pub mod gemini {
    pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-05-20";
    pub const API_BASE: &str = "https://generativelanguage.googleapis.com";
    pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";
    pub const MODEL_ENV_VAR: &str = "GEMINI_MODEL";
    pub const API_BASE_ENV_VAR: &str = "GEMINI_API_BASE";
}
