pub mod command_handler;
pub mod traits;
pub mod vocabulary_service;

pub use command_handler::{CommandHandler, Reply};
pub use traits::{ConfirmPrompt, FixedResponse};
pub use vocabulary_service::VocabularyService;
