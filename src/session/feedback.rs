use crate::hand::Letter;

/// Visual feedback classification shown by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
    Neutral,
}

/// Derive the feedback classification from session state.
///
/// Total over exactly these four inputs; no hidden history. Recomputed
/// whenever any of them changes.
pub fn derive_feedback(
    is_correct: bool,
    round_solved: bool,
    prediction: Option<Letter>,
    target: Letter,
) -> Feedback {
    if is_correct || round_solved {
        Feedback::Correct
    } else if matches!(prediction, Some(p) if p != target) {
        Feedback::Incorrect
    } else {
        Feedback::Neutral
    }
}
