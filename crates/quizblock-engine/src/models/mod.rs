pub mod question;

pub use question::{CorrectAnswer, QuestionRecord};
