//! Review submission validation.
//!
//! Every rule is evaluated and every violation is reported; validation never
//! stops at the first failing field.

use catalog_core::error::{DomainError, ValidationErrors};
use serde_json::Value;

use crate::domain::review::{ReviewSubmission, ValidatedReview};

/// Lowest accepted score.
pub const MIN_RATING: i32 = 1;
/// Highest accepted score.
pub const MAX_RATING: i32 = 5;
/// Longest accepted review, in characters.
pub const MAX_REVIEW_CHARS: usize = 2000;

/// Validates a review submission against the review schema.
///
/// Rules:
/// - `product_id` is required and must be positive
/// - `rating` is required and must be a whole number from 1 to 5
/// - `review` is required, must not be blank, and is trimmed
///
/// # Errors
///
/// Returns `DomainError::Validation` listing every violated field.
pub fn validate_review_request(
    submission: &ReviewSubmission,
) -> Result<ValidatedReview, DomainError> {
    let mut errors = ValidationErrors::new();
    let product_id = check_product_id(submission.product_id, &mut errors);
    let rating = check_rating(submission.rating, &mut errors);
    let review = check_review(submission.review.as_deref(), &mut errors);
    finish(product_id, rating, review, errors)
}

/// Validates an undecoded JSON request body for `product_id`.
///
/// Applies the same rules as [`validate_review_request`]. A field holding the
/// wrong JSON type is reported as a violation of that field alongside every
/// other violation. `null` counts as missing.
///
/// # Errors
///
/// Returns `DomainError::Validation` listing every violated field, or a single
/// `body` violation when the body is not a JSON object.
pub fn validate_review_body(product_id: i64, body: &Value) -> Result<ValidatedReview, DomainError> {
    let Some(fields) = body.as_object() else {
        return Err(DomainError::invalid("body", "request body must be a JSON object"));
    };

    let mut errors = ValidationErrors::new();
    let product_id = check_product_id(Some(product_id), &mut errors);

    let rating = match fields.get("rating").filter(|value| !value.is_null()) {
        Some(value) if !value.is_number() => {
            errors.push("rating", "rating must be a number");
            None
        }
        value => check_rating(value.and_then(Value::as_f64), &mut errors),
    };

    let review = match fields.get("review").filter(|value| !value.is_null()) {
        Some(value) if !value.is_string() => {
            errors.push("review", "review must be a string");
            None
        }
        value => check_review(value.and_then(Value::as_str), &mut errors),
    };

    finish(product_id, rating, review, errors)
}

fn check_product_id(product_id: Option<i64>, errors: &mut ValidationErrors) -> Option<i64> {
    match product_id {
        None => {
            errors.push("product_id", "product_id is required");
            None
        }
        Some(id) if id <= 0 => {
            errors.push("product_id", "product_id must be a positive integer");
            None
        }
        Some(id) => Some(id),
    }
}

fn check_rating(rating: Option<f64>, errors: &mut ValidationErrors) -> Option<i32> {
    let Some(score) = rating else {
        errors.push("rating", "rating is required");
        return None;
    };
    let score = whole_score(score);
    if score.is_none() {
        errors.push(
            "rating",
            format!("rating must be a whole number between {MIN_RATING} and {MAX_RATING}"),
        );
    }
    score
}

fn check_review(review: Option<&str>, errors: &mut ValidationErrors) -> Option<String> {
    match review.map(str::trim) {
        None => {
            errors.push("review", "review is required");
            None
        }
        Some("") => {
            errors.push("review", "review must not be empty");
            None
        }
        Some(text) if text.chars().count() > MAX_REVIEW_CHARS => {
            errors.push(
                "review",
                format!("review must be {MAX_REVIEW_CHARS} characters or less"),
            );
            None
        }
        Some(text) => Some(text.to_owned()),
    }
}

fn finish(
    product_id: Option<i64>,
    rating: Option<i32>,
    review: Option<String>,
    errors: ValidationErrors,
) -> Result<ValidatedReview, DomainError> {
    // Every `None` above pushed a violation.
    match (product_id, rating, review) {
        (Some(product_id), Some(rating), Some(review)) => errors.into_result(|| ValidatedReview {
            product_id,
            rating,
            review,
        }),
        _ => Err(DomainError::Validation(errors)),
    }
}

/// Returns the score as an integer when it is finite, whole and in range.
#[allow(clippy::cast_possible_truncation)]
fn whole_score(score: f64) -> Option<i32> {
    let in_range = score >= f64::from(MIN_RATING) && score <= f64::from(MAX_RATING);
    if score.is_finite() && score.fract() == 0.0 && in_range {
        Some(score as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::error::DomainError;
    use serde_json::json;

    use super::*;

    fn violated_fields(result: Result<ValidatedReview, DomainError>) -> Vec<&'static str> {
        match result {
            Err(DomainError::Validation(errors)) => errors.fields(),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_submission_returns_same_values() {
        let submission = ReviewSubmission::new(1, 5.0, "Great product");

        let validated = validate_review_request(&submission).unwrap();

        assert_eq!(
            validated,
            ValidatedReview {
                product_id: 1,
                rating: 5,
                review: "Great product".to_owned(),
            }
        );
    }

    #[test]
    fn test_review_is_trimmed() {
        let submission = ReviewSubmission::new(3, 4.0, "  solid  ");

        let validated = validate_review_request(&submission).unwrap();

        assert_eq!(validated.review, "solid");
    }

    #[test]
    fn test_empty_submission_reports_every_field() {
        let result = validate_review_request(&ReviewSubmission::default());

        assert_eq!(violated_fields(result), vec!["product_id", "rating", "review"]);
    }

    #[test]
    fn test_missing_rating_alone_is_reported() {
        let submission = ReviewSubmission {
            rating: None,
            ..ReviewSubmission::new(1, 5.0, "Great product")
        };

        assert_eq!(violated_fields(validate_review_request(&submission)), vec!["rating"]);
    }

    #[test]
    fn test_out_of_range_rating_and_blank_review_are_both_reported() {
        let submission = ReviewSubmission::new(1, 6.0, "   ");

        let result = validate_review_request(&submission);

        assert!(result.as_ref().is_err_and(DomainError::is_bad_request));
        assert_eq!(violated_fields(result), vec!["rating", "review"]);
    }

    #[test]
    fn test_rating_bounds() {
        for score in [1.0, 2.0, 3.0, 4.0, 5.0] {
            let submission = ReviewSubmission::new(1, score, "ok");
            assert!(validate_review_request(&submission).is_ok(), "score {score}");
        }
        for score in [0.0, -1.0, 5.5, 4.2, 6.0, f64::NAN, f64::INFINITY] {
            let submission = ReviewSubmission::new(1, score, "ok");
            assert_eq!(
                violated_fields(validate_review_request(&submission)),
                vec!["rating"],
                "score {score}"
            );
        }
    }

    #[test]
    fn test_non_positive_product_id_is_rejected() {
        let submission = ReviewSubmission::new(0, 3.0, "ok");

        assert_eq!(
            violated_fields(validate_review_request(&submission)),
            vec!["product_id"]
        );
    }

    #[test]
    fn test_review_length_limit_counts_characters() {
        let at_limit = "é".repeat(MAX_REVIEW_CHARS);
        assert!(validate_review_request(&ReviewSubmission::new(1, 3.0, at_limit)).is_ok());

        let over_limit = "a".repeat(MAX_REVIEW_CHARS + 1);
        assert_eq!(
            violated_fields(validate_review_request(&ReviewSubmission::new(1, 3.0, over_limit))),
            vec!["review"]
        );
    }

    #[test]
    fn test_body_with_valid_fields_matches_typed_validation() {
        let body = json!({ "rating": 4, "review": "  Sturdy  " });

        let validated = validate_review_body(9, &body).unwrap();

        assert_eq!(
            validated,
            validate_review_request(&ReviewSubmission::new(9, 4.0, "Sturdy")).unwrap()
        );
    }

    #[test]
    fn test_body_reports_every_mistyped_field() {
        let body = json!({ "rating": "five", "review": 7 });

        let result = validate_review_body(1, &body);

        assert_eq!(violated_fields(result), vec!["rating", "review"]);
    }

    #[test]
    fn test_body_mixes_type_and_rule_violations_in_field_order() {
        let body = json!({ "rating": [5], "review": "   " });

        let result = validate_review_body(0, &body);

        assert_eq!(violated_fields(result), vec!["product_id", "rating", "review"]);
    }

    #[test]
    fn test_body_null_fields_count_as_missing() {
        let body = json!({ "rating": null });

        match validate_review_body(1, &body) {
            Err(DomainError::Validation(errors)) => {
                let messages: Vec<&str> =
                    errors.violations().iter().map(|v| v.message.as_str()).collect();
                assert_eq!(messages, vec!["rating is required", "review is required"]);
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_body_that_is_not_an_object_is_rejected() {
        assert_eq!(violated_fields(validate_review_body(1, &json!([1, 2]))), vec!["body"]);
    }
}
