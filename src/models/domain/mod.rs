pub mod curriculum;
pub mod question;
pub mod user;

pub use curriculum::{
    Grade, KeyInquiryQuestion, LearningOutcome, OutcomeContext, Strand, SubStrand, Subject,
};
pub use question::{GeneratedTest, QuestionType, TestSection};
pub use user::User;
