pub mod comment;
pub mod company;
pub mod course;
pub mod enrollment;
pub mod lenient;
pub mod user;

pub use comment::{Comment, NewCommentRequest};
pub use company::{Company, NewCompanyRequest};
pub use course::{Course, CourseSummary, NewCourseRequest};
pub use enrollment::{Enrollment, EnrollmentResponse, NewEnrollmentRequest, SuccessResponse};
pub use user::{LoginRequest, LoginResponse, NewUserRequest, User};
