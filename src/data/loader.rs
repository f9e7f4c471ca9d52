use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::{QuestionSet, QuestionSetError};

/// Error loading a question set.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid question set in {origin}: {source}")]
    Invalid {
        origin: String,
        #[source]
        source: QuestionSetError,
    },
}

/// Read and validate a question set from a JSON file.
pub fn load_question_set_from_json<P: AsRef<Path>>(path: P) -> Result<QuestionSet, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let set = parse_question_set(&json_content, &path.display().to_string())?;
    info!(
        path = %path.display(),
        title = %set.title,
        questions = set.questions.len(),
        "loaded question set"
    );
    Ok(set)
}

/// Parse and validate a question set; `origin` names the source in errors.
pub fn parse_question_set(json: &str, origin: &str) -> Result<QuestionSet, LoadError> {
    let set: QuestionSet = serde_json::from_str(json).map_err(|source| LoadError::Parse {
        origin: origin.to_string(),
        source,
    })?;

    set.validate().map_err(|source| LoadError::Invalid {
        origin: origin.to_string(),
        source,
    })?;

    Ok(set)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const VALID: &str = r#"{
        "title": "Tiny Quiz",
        "description": "Two questions.",
        "questions": [
            {
                "id": "t1",
                "prompt": "Is Base64 encryption?",
                "options": [
                    { "id": "t1-yes", "text": "Yes" },
                    { "id": "t1-no", "text": "No" }
                ],
                "correct_option_id": "t1-no",
                "explanation": "Base64 is an encoding."
            },
            {
                "id": "t2",
                "prompt": "ROT13 applied twice gives?",
                "options": [
                    { "id": "t2-a", "text": "The original text" },
                    { "id": "t2-b", "text": "ROT26 ciphertext" }
                ],
                "correct_option_id": "t2-a",
                "explanation": "13 + 13 = 26, a full rotation."
            }
        ]
    }"#;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID.as_bytes()).unwrap();

        let set = load_question_set_from_json(file.path()).unwrap();
        assert_eq!(set.title, "Tiny Quiz");
        assert_eq!(set.questions.len(), 2);
        assert_eq!(set.questions[1].correct_option_id, "t2-a");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_question_set_from_json(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_question_set("{ \"title\": ", "inline").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_invalid_set_is_rejected() {
        let json = VALID.replace(
            "\"correct_option_id\": \"t2-a\"",
            "\"correct_option_id\": \"t2-z\"",
        );
        let err = parse_question_set(&json, "inline").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid {
                source: QuestionSetError::UnknownCorrectOption { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_empty_question_list_is_rejected() {
        let json = r#"{ "title": "Empty", "description": "", "questions": [] }"#;
        let err = parse_question_set(json, "inline").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid {
                source: QuestionSetError::Empty,
                ..
            }
        ));
    }
}
