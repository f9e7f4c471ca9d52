mod builtin;
mod loader;

pub use builtin::BuiltinModule;
pub use loader::{LoadError, load_question_set_from_json, parse_question_set};
