#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid destination: {0}")]
    InvalidDestination(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Value {value} for '{id}' is out of range [{min}, {max}]")]
    OutOfRange {
        id: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Invalid colour type {0}. Use 16 (xy), 32 (Tc), 64 (primary N) or 128 (RGBWAF)")]
    InvalidColourType(i64),

    #[error("Invalid colour value: {0}")]
    InvalidColourValue(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Gateway returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidDestination(_)
            | AppError::OutOfRange { .. }
            | AppError::InvalidColourType(_)
            | AppError::InvalidColourValue(_)
            | AppError::InvalidInput(_) => 2,
            AppError::NotFound(_) => 3,
            AppError::Api { .. } | AppError::Http(_) => 4,
            AppError::Decode(_) | AppError::Json(_) => 5,
            AppError::Prompt(_) => 1,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidDestination(_) => "invalid_destination",
            AppError::NotFound(_) => "not_found",
            AppError::OutOfRange { .. } => "out_of_range",
            AppError::InvalidColourType(_) => "invalid_colour_type",
            AppError::InvalidColourValue(_) => "invalid_colour_value",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Api { .. } => "api",
            AppError::Decode(_) => "decode",
            AppError::Prompt(_) => "prompt",
            AppError::Http(_) => "http",
            AppError::Json(_) => "json",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({
            "error": self.error_type(),
            "message": self.to_string(),
        });
        if let AppError::Api { status, .. } = self {
            obj["status"] = serde_json::json!(status);
        }
        obj
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Prompt(err.to_string())
    }
}
