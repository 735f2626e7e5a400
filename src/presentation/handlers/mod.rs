mod assess;
mod error_response;
mod grade;
mod grading_form;
mod health;
mod judge;

pub use assess::assess_handler;
pub use error_response::{ApiError, Diagnostics, ErrorResponse, method_not_allowed_handler};
pub use grade::{GradeResponse, grade_handler};
pub use grading_form::GradingForm;
pub use health::health_handler;
pub use judge::{JudgeResponse, judge_handler};
