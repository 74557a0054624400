#![forbid(unsafe_code)]

pub mod app_services;
pub mod category_service;
pub mod error;
pub mod question_service;
pub mod quiz_service;
pub mod responses;

pub use app_services::AppServices;
pub use category_service::CategoryService;
pub use error::{AppServicesError, Fault};
pub use question_service::QuestionService;
pub use quiz_service::{QuizFilter, QuizService};
pub use responses::{
    CategoryList, CreatedQuestion, DeletedQuestion, ErrorBody, QuestionListing, QuestionPage,
    QuizRound,
};
