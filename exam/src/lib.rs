//! Exam-taking state machine for certification quizzes.
//!
//! This crate is UI-framework agnostic: the browser client and the terminal
//! client both drive an [`ExamSession`] and perform the [`Effect`]s it
//! returns (save an answer, submit for grading, show a local result).
//!
//! ARCHITECTURE
//! ============
//! One shared core (question cursor, answer map, flags, phase) plus a
//! mode-specific tail: strict exams own a countdown and an answer-save
//! outbox and are graded by the server; learning runs reveal correctness
//! per question and are scored locally.

pub mod error;
pub mod feedback;
pub mod mode;
pub mod outbox;
pub mod question;
pub mod result;
pub mod score;
pub mod session;
pub mod timer;

pub use error::ExamError;
pub use feedback::{AnswerMark, Feedback};
pub use mode::{ExamMode, ModeKind};
pub use outbox::{AnswerOutbox, PendingSave, SaveAnswerBody};
pub use question::{Answer, AnswerId, PracticeSet, Question, QuestionId, StartedSession};
pub use result::{ExamOutcome, GradedResult, ReviewItem};
pub use score::{LocalResult, QuestionOutcome, score};
pub use session::{CompletionPrompt, Effect, ExamSession, Phase, QuestionStatus, SubmitPayload};
pub use timer::{Countdown, TickOutcome, format_clock};
