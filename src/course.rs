use std::fmt;

use serde::Serialize;

use crate::{
    error::InvalidInputError,
    person::{Instructor, InstructorId, Roster, Student, StudentId},
    subject::Subject,
};

/// Maximum number of students a single course takes.
pub const MAX_STUDENTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CourseId(pub u32);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseState {
    Pending { days_until_start: u32 },
    Active { days_remaining: u32 },
    Cancelled,
    Finished,
}

/// One run of a subject.
///
/// The course keeps ids of its instructor and students; the matching
/// back-references on [`Student`] and [`Instructor`] are updated by the same
/// call that changes the course, so the two sides never disagree.
#[derive(Debug, Clone)]
pub struct Course {
    id: CourseId,
    subject: Subject,
    instructor: Option<InstructorId>,
    students: Vec<StudentId>,
    days_until_start: u32,
    days_remaining: u32,
    cancelled: bool,
}

impl Course {
    pub fn new(id: CourseId, subject: Subject, days_until_start: i64) -> Result<Course, InvalidInputError> {
        let days_until_start = u32::try_from(days_until_start)
            .map_err(|_| InvalidInputError::NegativeDaysUntilStart(days_until_start))?;
        Ok(Course {
            id,
            days_remaining: subject.duration(),
            subject,
            instructor: None,
            students: Vec::new(),
            days_until_start,
            cancelled: false,
        })
    }

    pub fn id(&self) -> CourseId {
        self.id
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn instructor(&self) -> Option<InstructorId> {
        self.instructor
    }

    pub fn has_instructor(&self) -> bool {
        self.instructor.is_some()
    }

    pub fn students(&self) -> &[StudentId] {
        &self.students
    }

    pub fn size(&self) -> usize {
        self.students.len()
    }

    pub fn is_full(&self) -> bool {
        self.students.len() >= MAX_STUDENTS
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn state(&self) -> CourseState {
        if self.cancelled {
            CourseState::Cancelled
        } else if self.days_until_start > 0 {
            CourseState::Pending {
                days_until_start: self.days_until_start,
            }
        } else if self.days_remaining > 0 {
            CourseState::Active {
                days_remaining: self.days_remaining,
            }
        } else {
            CourseState::Finished
        }
    }

    /// Negative days until start while pending, remaining days while active,
    /// 0 once finished or cancelled.
    pub fn status(&self) -> i64 {
        match self.state() {
            CourseState::Pending { days_until_start } => -i64::from(days_until_start),
            CourseState::Active { days_remaining } => i64::from(days_remaining),
            CourseState::Cancelled | CourseState::Finished => 0,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state(), CourseState::Pending { .. })
    }

    /// Finished or cancelled; no further transitions happen.
    pub fn is_closed(&self) -> bool {
        matches!(self.state(), CourseState::Cancelled | CourseState::Finished)
    }

    /// Whether `student` meets every requirement to join this course right now.
    pub fn accepts(&self, student: &Student) -> bool {
        self.is_pending()
            && !self.is_full()
            && !self.students.contains(&student.id())
            && !student.has_certificate(self.subject.id())
            && self
                .subject
                .prerequisites()
                .iter()
                .all(|&prerequisite| student.has_certificate(prerequisite))
    }

    /// Enrolls `student`, recording the course on the student as well.
    /// Returns `false` and changes nothing when the student is not accepted.
    pub fn enroll(&mut self, student: &mut Student) -> bool {
        if !self.accepts(student) {
            return false;
        }
        self.students.push(student.id());
        student.attend(self.id);
        true
    }

    /// Stores `instructor` if they can teach the subject. The caller records the
    /// reciprocal assignment on the instructor.
    pub fn set_instructor(&mut self, instructor: &Instructor) -> bool {
        if !instructor.can_teach(&self.subject) {
            return false;
        }
        self.instructor = Some(instructor.id());
        true
    }

    pub(crate) fn withdraw(&mut self, student: &mut Student) {
        self.students.retain(|&s| s != student.id());
        student.leave(self.id);
    }

    pub(crate) fn release_instructor(&mut self, instructor: &mut Instructor) {
        if self.instructor == Some(instructor.id()) {
            self.instructor = None;
        }
        instructor.unassign(self.id);
    }

    /// Moves the course forward by one day and returns the state it ends in.
    pub fn advance_one_day(&mut self, roster: &mut Roster) -> CourseState {
        match self.state() {
            CourseState::Pending { .. } => {
                self.days_until_start -= 1;
                if self.days_until_start == 0 {
                    if self.instructor.is_none() || self.students.is_empty() {
                        self.cancel(roster);
                    } else if self.days_remaining == 0 {
                        self.finish(roster);
                    }
                }
            }
            CourseState::Active { .. } => {
                self.days_remaining -= 1;
                if self.days_remaining == 0 {
                    self.finish(roster);
                }
            }
            CourseState::Cancelled | CourseState::Finished => {}
        }
        self.state()
    }

    fn cancel(&mut self, roster: &mut Roster) {
        self.cancelled = true;
        self.detach_instructor(roster);
        for id in std::mem::take(&mut self.students) {
            if let Some(student) = roster.student_mut(id) {
                student.leave(self.id);
            }
        }
        tracing::debug!(course = %self.id, subject = self.subject.id(), "course cancelled");
    }

    fn finish(&mut self, roster: &mut Roster) {
        for id in std::mem::take(&mut self.students) {
            if let Some(student) = roster.student_mut(id) {
                student.graduate(self.subject.id());
                student.leave(self.id);
            }
        }
        self.detach_instructor(roster);
        tracing::debug!(course = %self.id, subject = self.subject.id(), "course finished");
    }

    fn detach_instructor(&mut self, roster: &mut Roster) {
        if let Some(id) = self.instructor.take() {
            if let Some(instructor) = roster.instructor_mut(id) {
                instructor.unassign(self.id);
            }
        }
    }
}
