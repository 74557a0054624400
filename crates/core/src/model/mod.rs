mod category;
mod ids;
mod page;
mod question;

pub use category::{Category, CategoryError};
pub use ids::{CategoryId, ParseIdError, QuestionId};
pub use page::{PAGE_SIZE, Page, PageRequest, paginate};
pub use question::{NewQuestion, Question, QuestionDraft, QuestionError, QuestionView};
