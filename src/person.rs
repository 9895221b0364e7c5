use std::{fmt, ops::Deref};

use serde::Serialize;

use crate::{course::CourseId, error::InvalidInputError, subject::Subject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl TryFrom<char> for Gender {
    type Error = InvalidInputError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'M' => Ok(Gender::Male),
            'F' => Ok(Gender::Female),
            other => Err(InvalidInputError::Gender(other.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "M"),
            Gender::Female => write!(f, "F"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: String,
    gender: Gender,
    age: u32,
}

impl Person {
    pub fn new(name: impl Into<String>, gender: char, age: i64) -> Result<Person, InvalidInputError> {
        let gender = Gender::try_from(gender)?;
        let age = u32::try_from(age).map_err(|_| InvalidInputError::NegativeAge(age))?;
        Ok(Person {
            name: name.into(),
            gender,
            age,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn set_age(&mut self, age: u32) {
        self.age = age;
    }
}

/// Instructor capability classes. What each may teach is pure data, see [`InstructorKind::specialisms`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InstructorKind {
    Teacher,
    Demonstrator,
    #[serde(rename = "OOTrainer")]
    OoTrainer,
    #[serde(rename = "GUITrainer")]
    GuiTrainer,
}

impl InstructorKind {
    pub const ALL: [InstructorKind; 4] = [
        InstructorKind::Teacher,
        InstructorKind::Demonstrator,
        InstructorKind::OoTrainer,
        InstructorKind::GuiTrainer,
    ];

    /// Specialism tiers this kind of instructor may teach.
    /// Trainers are teachers with one extra tier.
    pub fn specialisms(self) -> &'static [u32] {
        match self {
            InstructorKind::Teacher => &[1, 2],
            InstructorKind::Demonstrator => &[2],
            InstructorKind::OoTrainer => &[1, 2, 3],
            InstructorKind::GuiTrainer => &[1, 2, 4],
        }
    }

    pub fn can_teach(self, subject: &Subject) -> bool {
        self.specialisms().contains(&subject.specialism())
    }

    pub fn parse(name: &str) -> Option<InstructorKind> {
        InstructorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InstructorKind::Teacher => "Teacher",
            InstructorKind::Demonstrator => "Demonstrator",
            InstructorKind::OoTrainer => "OOTrainer",
            InstructorKind::GuiTrainer => "GUITrainer",
        }
    }
}

impl fmt::Display for InstructorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which population a person joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Instructor(InstructorKind),
}

impl Role {
    pub fn parse(name: &str) -> Option<Role> {
        if name.eq_ignore_ascii_case("Student") {
            Some(Role::Student)
        } else {
            InstructorKind::parse(name).map(Role::Instructor)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StudentId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct InstructorId(pub u32);

#[derive(Debug, Clone)]
pub struct Student {
    id: StudentId,
    person: Person,
    attended_courses: Vec<CourseId>,
    // subject ids, never repeated
    certificates: Vec<u32>,
}

impl Student {
    pub fn new(id: StudentId, person: Person) -> Student {
        Student {
            id,
            person,
            attended_courses: Vec::new(),
            certificates: Vec::new(),
        }
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn attended_courses(&self) -> &[CourseId] {
        &self.attended_courses
    }

    pub fn certificates(&self) -> &[u32] {
        &self.certificates
    }

    pub fn has_certificate(&self, subject_id: u32) -> bool {
        self.certificates.contains(&subject_id)
    }

    pub fn is_attending(&self, course: CourseId) -> bool {
        self.attended_courses.contains(&course)
    }

    pub(crate) fn attend(&mut self, course: CourseId) {
        if !self.is_attending(course) {
            self.attended_courses.push(course);
        }
    }

    pub(crate) fn leave(&mut self, course: CourseId) {
        self.attended_courses.retain(|&c| c != course);
    }

    pub(crate) fn graduate(&mut self, subject_id: u32) {
        if !self.has_certificate(subject_id) {
            self.certificates.push(subject_id);
        }
    }
}

impl Deref for Student {
    type Target = Person;

    fn deref(&self) -> &Self::Target {
        &self.person
    }
}

#[derive(Debug, Clone)]
pub struct Instructor {
    id: InstructorId,
    person: Person,
    kind: InstructorKind,
    assigned_courses: Vec<CourseId>,
}

impl Instructor {
    pub fn new(id: InstructorId, person: Person, kind: InstructorKind) -> Instructor {
        Instructor {
            id,
            person,
            kind,
            assigned_courses: Vec::new(),
        }
    }

    pub fn id(&self) -> InstructorId {
        self.id
    }

    pub fn kind(&self) -> InstructorKind {
        self.kind
    }

    pub fn can_teach(&self, subject: &Subject) -> bool {
        self.kind.can_teach(subject)
    }

    pub fn assigned_courses(&self) -> &[CourseId] {
        &self.assigned_courses
    }

    pub(crate) fn assign(&mut self, course: CourseId) {
        if !self.assigned_courses.contains(&course) {
            self.assigned_courses.push(course);
        }
    }

    pub(crate) fn unassign(&mut self, course: CourseId) {
        self.assigned_courses.retain(|&c| c != course);
    }
}

impl Deref for Instructor {
    type Target = Person;

    fn deref(&self) -> &Self::Target {
        &self.person
    }
}

/// The school's people, in admission order.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    students: Vec<Student>,
    instructors: Vec<Instructor>,
    next_student: u32,
    next_instructor: u32,
}

impl Roster {
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn instructors(&self) -> &[Instructor] {
        &self.instructors
    }

    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn instructor(&self, id: InstructorId) -> Option<&Instructor> {
        self.instructors.iter().find(|i| i.id == id)
    }

    pub(crate) fn student_mut(&mut self, id: StudentId) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.id == id)
    }

    pub(crate) fn instructor_mut(&mut self, id: InstructorId) -> Option<&mut Instructor> {
        self.instructors.iter_mut().find(|i| i.id == id)
    }

    pub(crate) fn push_student(&mut self, person: Person) -> StudentId {
        let id = StudentId(self.next_student);
        self.next_student += 1;
        self.students.push(Student::new(id, person));
        id
    }

    pub(crate) fn push_instructor(&mut self, person: Person, kind: InstructorKind) -> InstructorId {
        let id = InstructorId(self.next_instructor);
        self.next_instructor += 1;
        self.instructors.push(Instructor::new(id, person, kind));
        id
    }

    pub(crate) fn take_student(&mut self, id: StudentId) -> Option<Student> {
        let index = self.students.iter().position(|s| s.id == id)?;
        Some(self.students.remove(index))
    }

    pub(crate) fn take_instructor(&mut self, id: InstructorId) -> Option<Instructor> {
        let index = self.instructors.iter().position(|i| i.id == id)?;
        Some(self.instructors.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(specialism: i64) -> Subject {
        Subject::new(1, specialism, 3, "Subject", vec![]).unwrap()
    }

    #[test]
    fn person_validation() {
        assert!(Person::new("Ann", 'F', 20).is_ok());
        assert_eq!(
            Person::new("Ann", 'X', 20),
            Err(InvalidInputError::Gender("X".to_string()))
        );
        assert_eq!(
            Person::new("Ann", 'F', -1),
            Err(InvalidInputError::NegativeAge(-1))
        );
    }

    #[test]
    fn capability_table() {
        let teach = |kind: InstructorKind| {
            (1..=4)
                .filter(|&tier| kind.can_teach(&subject(tier)))
                .collect::<Vec<_>>()
        };
        assert_eq!(teach(InstructorKind::Teacher), vec![1, 2]);
        assert_eq!(teach(InstructorKind::Demonstrator), vec![2]);
        assert_eq!(teach(InstructorKind::OoTrainer), vec![1, 2, 3]);
        assert_eq!(teach(InstructorKind::GuiTrainer), vec![1, 2, 4]);
    }

    #[test]
    fn roles_parse_case_insensitively() {
        assert_eq!(Role::parse("student"), Some(Role::Student));
        assert_eq!(
            Role::parse("ootrainer"),
            Some(Role::Instructor(InstructorKind::OoTrainer))
        );
        assert_eq!(Role::parse("Janitor"), None);
    }

    #[test]
    fn certificates_are_never_duplicated() {
        let mut student = Student::new(StudentId(0), Person::new("Bo", 'M', 19).unwrap());
        student.graduate(3);
        student.graduate(3);
        assert_eq!(student.certificates(), &[3]);
    }

    #[test]
    fn roster_ids_are_not_reused() {
        let mut roster = Roster::default();
        let first = roster.push_student(Person::new("A", 'M', 18).unwrap());
        roster.take_student(first);
        let second = roster.push_student(Person::new("B", 'F', 18).unwrap());
        assert_ne!(first, second);
        assert!(roster.student(first).is_none());
        assert_eq!(roster.student(second).map(|s| s.name()), Some("B"));
    }
}
