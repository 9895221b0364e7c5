use std::{io, num::ParseIntError};

/// Rejected constructor input. The object is never built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("gender must be M or F, got {0:?}")]
    Gender(String),
    #[error("age must be a positive number, got {0}")]
    NegativeAge(i64),
    #[error("id, specialism and duration must be positive numbers (id={id}, specialism={specialism}, duration={duration})")]
    NegativeSubjectField {
        id: i64,
        specialism: i64,
        duration: i64,
    },
    #[error("the number of days until the course starts must be >= 0, got {0}")]
    NegativeDaysUntilStart(i64),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration file")]
    Io(#[from] io::Error),
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("line {line}: {source}")]
    Number {
        line: usize,
        #[source]
        source: ParseIntError,
    },
    #[error("line {line}: unknown class {class:?}")]
    UnknownClass { line: usize, class: String },
    #[error("line {line}: {source}")]
    InvalidInput {
        line: usize,
        #[source]
        source: InvalidInputError,
    },
    #[error("line {line}: a school is already declared")]
    DuplicateSchool { line: usize },
    #[error("line {line}: subject id {id} is already declared")]
    DuplicateSubject { line: usize, id: u32 },
    #[error("no School declaration found")]
    MissingSchool,
    #[error("line {line}: course limits must be at least 1, got {value}")]
    Limit { line: usize, value: i64 },
}
