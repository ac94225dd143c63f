use tracing::error;

use crate::completions::CompletionService;
use crate::reply::{GradeResult, parse_reply};

/// Feedback for submissions rejected before any model call.
pub const BLANK_SUBMISSION_FEEDBACK: &str = "The submission is blank, too short, or does not contain relevant content. Please ensure you follow the assignment instructions and provide a complete response.";

/// Feedback when the model call itself fails.
pub const GRADING_FAILED_FEEDBACK: &str = "Grading failed.";

const SYSTEM_PROMPT: &str = "You are a strict professor grading student assignments accurately. Provide a numeric grade and detailed feedback separately. If the submission is irrelevant, too short, or does not address the assignment instructions, give a grade of 0 and provide feedback explaining why the feedback should not exceed more than 3 lines.";

const MIN_SUBMISSION_CHARS: usize = 10;
const GIVE_UP_PHRASE: &str = "i don't know";

/// Grades one submission against the assignment instructions. Degenerate
/// submissions are rejected without a model call; every other failure mode
/// degrades to grade 0 with a sentinel feedback string. Never errors.
pub async fn grade(
    completions: &impl CompletionService,
    instructions: &str,
    submission_text: &str,
) -> GradeResult {
    if let Some(result) = reject_degenerate(submission_text) {
        return result;
    }

    let user_prompt = user_prompt(instructions, submission_text);

    match completions.complete(SYSTEM_PROMPT, &user_prompt).await {
        Ok(reply) => parse_reply(&reply),
        Err(err) => {
            error!(?err, "error grading submission");
            GradeResult {
                grade: 0,
                feedback: GRADING_FAILED_FEEDBACK.to_owned(),
            }
        }
    }
}

/// Short-circuit for blank, give-up, or too-short submissions.
fn reject_degenerate(submission_text: &str) -> Option<GradeResult> {
    let trimmed = submission_text.trim();
    let degenerate = trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case(GIVE_UP_PHRASE)
        || trimmed.chars().count() < MIN_SUBMISSION_CHARS;

    degenerate.then(|| GradeResult {
        grade: 0,
        feedback: BLANK_SUBMISSION_FEEDBACK.to_owned(),
    })
}

fn user_prompt(instructions: &str, submission_text: &str) -> String {
    format!(
        "Assignment Instructions: {instructions}\n\nStudent Submission: {submission_text}\n\nEvaluate the submission and return the grade and feedback separately. If the submission is irrelevant, too short, or does not address the assignment instructions, give a grade of 0 and provide feedback explaining why."
    )
}
