pub mod request;
pub mod response;

pub use request::{
    GenerateQuestionsRequest, GenerateTestRequest, LearningOutcomeQuery, LoginRequest,
    RegisterRequest, StrandQuery, SubStrandQuery, TopicRequest,
};
pub use response::{
    GradeResponse, LearningOutcomeResponse, MessageResponse, StrandResponse, SubStrandResponse,
    SubjectResponse, UserResponse,
};
