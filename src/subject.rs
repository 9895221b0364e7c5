use crate::error::InvalidInputError;

/// A catalog entry. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    id: u32,
    specialism: u32,
    // days any course covering this subject runs for
    duration: u32,
    description: String,
    prerequisites: Vec<u32>,
}

impl Subject {
    pub fn new(
        id: i64,
        specialism: i64,
        duration: i64,
        description: impl Into<String>,
        prerequisites: Vec<u32>,
    ) -> Result<Subject, InvalidInputError> {
        let invalid = || InvalidInputError::NegativeSubjectField {
            id,
            specialism,
            duration,
        };
        Ok(Subject {
            id: u32::try_from(id).map_err(|_| invalid())?,
            specialism: u32::try_from(specialism).map_err(|_| invalid())?,
            duration: u32::try_from(duration).map_err(|_| invalid())?,
            description: description.into(),
            prerequisites,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn specialism(&self) -> u32 {
        self.specialism
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn prerequisites(&self) -> &[u32] {
        &self.prerequisites
    }
}
