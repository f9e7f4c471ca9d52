use clap::ValueEnum;

use super::loader::{LoadError, parse_question_set};
use crate::models::QuestionSet;

/// Question sets shipped with the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BuiltinModule {
    Cryptography,
    Encoding,
    SystemProtection,
}

impl BuiltinModule {
    pub fn all() -> [BuiltinModule; 3] {
        [
            BuiltinModule::Cryptography,
            BuiltinModule::Encoding,
            BuiltinModule::SystemProtection,
        ]
    }

    pub fn slug(self) -> &'static str {
        match self {
            BuiltinModule::Cryptography => "cryptography",
            BuiltinModule::Encoding => "encoding",
            BuiltinModule::SystemProtection => "system-protection",
        }
    }

    fn source(self) -> &'static str {
        match self {
            BuiltinModule::Cryptography => include_str!("../../questions/cryptography.json"),
            BuiltinModule::Encoding => include_str!("../../questions/encoding.json"),
            BuiltinModule::SystemProtection => {
                include_str!("../../questions/system-protection.json")
            }
        }
    }

    pub fn question_set(self) -> Result<QuestionSet, LoadError> {
        parse_question_set(self.source(), self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sets_are_valid() {
        for module in BuiltinModule::all() {
            let set = module.question_set().unwrap();
            assert_eq!(set.questions.len(), 5, "{}", module.slug());
            assert!(!set.title.is_empty());
            assert!(!set.description.is_empty());
        }
    }

    #[test]
    fn test_builtin_titles() {
        let titles: Vec<_> = BuiltinModule::all()
            .iter()
            .map(|m| m.question_set().unwrap().title)
            .collect();
        assert_eq!(
            titles,
            vec![
                "Cryptography Quiz",
                "Data Encoding Quiz",
                "System Protection Quiz"
            ]
        );
    }

    #[test]
    fn test_slug_matches_value_enum_name() {
        for module in BuiltinModule::all() {
            let parsed = BuiltinModule::from_str(module.slug(), false).unwrap();
            assert_eq!(parsed, module);
        }
    }
}
