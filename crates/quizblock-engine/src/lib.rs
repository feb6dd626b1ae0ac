pub mod convert;
pub mod encoding;
pub mod form;
pub mod io;
pub mod models;
pub mod parsing;
pub mod session;

// Re-export key types for easier usage
pub use convert::*;
pub use encoding::{BlockEncoder, EncodeError, Row};
pub use form::{FormAction, FormSubmission};
pub use io::IoError;
pub use models::{CorrectAnswer, QuestionRecord};
pub use parsing::ParseError;
pub use session::{Session, SessionError, SubmitOutcome};
