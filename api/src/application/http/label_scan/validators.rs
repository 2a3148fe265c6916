use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct ClassifyTextRequest {
    /// Ingredient text, as it would come out of OCR.
    #[validate(length(
        min = 1,
        max = 5000,
        message = "text must be between 1 and 5000 characters"
    ))]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_length_bounds() {
        let empty = ClassifyTextRequest {
            text: String::new(),
        };
        assert!(empty.validate().is_err());

        let too_long = ClassifyTextRequest {
            text: "糖".repeat(5001),
        };
        assert!(too_long.validate().is_err());

        let ok = ClassifyTextRequest {
            text: "糖".repeat(5000),
        };
        assert!(ok.validate().is_ok());
    }
}
