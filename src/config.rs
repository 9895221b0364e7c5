//! Loader for the school configuration file.
//!
//! One declaration per line, `[Class]:[property,property,...]`:
//!
//! ```text
//! School:Java School,2,2
//! Subject:Programming,1,1,4
//! Subject:GUI Programming,4,4,3,1-2
//! Teacher:Linda,F,43
//! Student:James,M,19
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::{fs, path::Path, str::FromStr};

use crate::{
    error::{ConfigError, InvalidInputError},
    person::{Person, Role},
    subject::Subject,
};

/// A person to seed the school with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonConfig {
    pub role: Role,
    pub person: Person,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolConfig {
    pub name: String,
    pub max_enrollable_courses: usize,
    pub max_assignable_courses: usize,
    pub subjects: Vec<Subject>,
    pub people: Vec<PersonConfig>,
}

impl SchoolConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<SchoolConfig, ConfigError> {
        let text = fs::read_to_string(path)?;
        text.parse()
    }
}

impl FromStr for SchoolConfig {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut school: Option<(String, usize, usize)> = None;
        let mut subjects = Vec::new();
        let mut people = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let raw = raw.trim();
            if raw.is_empty() || raw.starts_with('#') {
                continue;
            }
            let Some((class, properties)) = raw.split_once(':') else {
                return Err(malformed(line, "expected [Class]:[property,property,...]"));
            };
            let class = class.trim();
            let fields: Vec<&str> = properties.split(',').map(str::trim).collect();

            if class.eq_ignore_ascii_case("School") {
                if school.is_some() {
                    return Err(ConfigError::DuplicateSchool { line });
                }
                school = Some(parse_school(line, &fields)?);
            } else if class.eq_ignore_ascii_case("Subject") {
                let subject = parse_subject(line, &fields)?;
                if subjects.iter().any(|s: &Subject| s.id() == subject.id()) {
                    return Err(ConfigError::DuplicateSubject { line, id: subject.id() });
                }
                subjects.push(subject);
            } else if let Some(role) = Role::parse(class) {
                people.push(PersonConfig {
                    role,
                    person: parse_person(line, &fields)?,
                });
            } else {
                return Err(ConfigError::UnknownClass {
                    line,
                    class: class.to_string(),
                });
            }
        }

        let (name, max_enrollable_courses, max_assignable_courses) = school.ok_or(ConfigError::MissingSchool)?;
        Ok(SchoolConfig {
            name,
            max_enrollable_courses,
            max_assignable_courses,
            subjects,
            people,
        })
    }
}

fn malformed(line: usize, reason: &str) -> ConfigError {
    ConfigError::Malformed {
        line,
        reason: reason.to_string(),
    }
}

fn number<T: FromStr<Err = std::num::ParseIntError>>(line: usize, field: &str) -> Result<T, ConfigError> {
    field
        .parse()
        .map_err(|source| ConfigError::Number { line, source })
}

fn invalid(line: usize) -> impl Fn(InvalidInputError) -> ConfigError {
    move |source| ConfigError::InvalidInput { line, source }
}

// name[,max enrollable[,max assignable]]
fn parse_school(line: usize, fields: &[&str]) -> Result<(String, usize, usize), ConfigError> {
    if fields.is_empty() || fields.len() > 3 || fields[0].is_empty() {
        return Err(malformed(
            line,
            "a school needs a name and optionally the per-student and per-instructor course limits",
        ));
    }
    let limit = |field: Option<&&str>| -> Result<usize, ConfigError> {
        let Some(field) = field else {
            return Ok(1);
        };
        let value: i64 = number(line, field)?;
        usize::try_from(value)
            .ok()
            .filter(|&v| v >= 1)
            .ok_or(ConfigError::Limit { line, value })
    };
    Ok((fields[0].to_string(), limit(fields.get(1))?, limit(fields.get(2))?))
}

// description,id,specialism,duration[,p1-p2-...]
fn parse_subject(line: usize, fields: &[&str]) -> Result<Subject, ConfigError> {
    if !(4..=5).contains(&fields.len()) {
        return Err(malformed(
            line,
            "a subject needs a description, an id, a specialism, a duration and optional prerequisites",
        ));
    }
    let prerequisites = match fields.get(4) {
        Some(list) if !list.is_empty() => list
            .split('-')
            .map(|id| number::<u32>(line, id.trim()))
            .collect::<Result<Vec<_>, _>>()?,
        _ => Vec::new(),
    };
    Subject::new(
        number(line, fields[1])?,
        number(line, fields[2])?,
        number(line, fields[3])?,
        fields[0],
        prerequisites,
    )
    .map_err(invalid(line))
}

// name,gender,age
fn parse_person(line: usize, fields: &[&str]) -> Result<Person, ConfigError> {
    if fields.len() != 3 {
        return Err(malformed(line, "a person needs a name, a gender and an age"));
    }
    let Some(gender) = fields[1].chars().next() else {
        return Err(ConfigError::InvalidInput {
            line,
            source: InvalidInputError::Gender(String::new()),
        });
    };
    Person::new(fields[0], gender, number(line, fields[2])?).map_err(invalid(line))
}
