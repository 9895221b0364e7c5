use std::collections::HashMap;

use crate::{
    course::{CourseId, CourseState},
    person::StudentId,
    school::School,
};

/// Start delay given to every course the daily cycle opens.
pub const NEW_COURSE_START_DELAY: i64 = 2;

/// What happened to courses during one [`School::simulate_day`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaySchedule {
    pub opened: Vec<CourseId>,
    pub started: Vec<CourseId>,
    pub cancelled: Vec<CourseId>,
    pub finished: Vec<CourseId>,
}

impl School {
    /// Runs one school day. The steps are order-sensitive: which instructor and
    /// which course a person ends up matched to depends on catalog order and
    /// first-fit scanning.
    pub fn simulate_day(&mut self) -> DaySchedule {
        let mut schedule = DaySchedule {
            opened: self.refresh_courses(),
            ..DaySchedule::default()
        };
        self.assign_instructors();
        self.enroll_free_students();
        self.progress_courses(&mut schedule);
        schedule
    }

    /// Opens a course for every subject that has no pending course with room left.
    fn refresh_courses(&mut self) -> Vec<CourseId> {
        let mut opened = Vec::new();
        for index in 0..self.subjects().len() {
            let subject = self.subjects()[index].clone();
            let has_room = self
                .courses
                .iter()
                .any(|c| c.subject().id() == subject.id() && c.is_pending() && !c.is_full());
            if has_room {
                continue;
            }
            let subject_id = subject.id();
            match self.open_course(subject, NEW_COURSE_START_DELAY) {
                Ok(id) => {
                    tracing::debug!(course = %id, subject = subject_id, "course opened");
                    opened.push(id);
                }
                Err(error) => tracing::warn!(%error, "could not open course"),
            }
        }
        opened
    }

    /// First-fit: each course without an instructor takes the first one in
    /// roster order that has spare capacity and can teach the subject.
    fn assign_instructors(&mut self) {
        let max = self.max_assignable_courses();
        let School { courses, roster, .. } = self;
        for course in courses.iter_mut().filter(|c| !c.has_instructor()) {
            let candidate = roster
                .instructors()
                .iter()
                .find(|i| i.assigned_courses().len() < max && i.can_teach(course.subject()))
                .map(|i| i.id());
            let Some(id) = candidate else {
                continue;
            };
            let Some(instructor) = roster.instructor_mut(id) else {
                continue;
            };
            if course.set_instructor(instructor) {
                instructor.assign(course.id());
                tracing::debug!(course = %course.id(), instructor = instructor.name(), "instructor assigned");
            }
        }
    }

    /// Students below their course cap try every course in order; a student can
    /// fill several free slots in one day.
    fn enroll_free_students(&mut self) {
        let max = self.max_enrollable_courses();
        let student_ids: Vec<StudentId> = self.students().iter().map(|s| s.id()).collect();
        let course_subjects: HashMap<CourseId, u32> = self
            .courses
            .iter()
            .map(|c| (c.id(), c.subject().id()))
            .collect();
        let School { courses, roster, .. } = self;
        for id in student_ids {
            let Some(student) = roster.student_mut(id) else {
                continue;
            };
            if student.attended_courses().len() >= max {
                continue;
            }
            for course in courses.iter_mut() {
                let subject_id = course.subject().id();
                let on_subject = student
                    .attended_courses()
                    .iter()
                    .any(|attended| course_subjects.get(attended) == Some(&subject_id));
                if course.students().contains(&id)
                    || student.has_certificate(subject_id)
                    || student.attended_courses().len() >= max
                    || on_subject
                {
                    continue;
                }
                if course.enroll(student) {
                    tracing::debug!(course = %course.id(), student = student.name(), "student enrolled");
                }
            }
        }
    }

    fn progress_courses(&mut self, schedule: &mut DaySchedule) {
        let todays_courses: Vec<CourseId> = self.courses.iter().map(|c| c.id()).collect();
        let School { courses, roster, .. } = self;
        for id in todays_courses {
            let Some(course) = courses.iter_mut().find(|c| c.id() == id) else {
                continue;
            };
            let before = course.state();
            match (before, course.advance_one_day(roster)) {
                (CourseState::Pending { .. }, CourseState::Active { .. }) => schedule.started.push(id),
                (_, CourseState::Cancelled) if before != CourseState::Cancelled => schedule.cancelled.push(id),
                (_, CourseState::Finished) if before != CourseState::Finished => schedule.finished.push(id),
                _ => {}
            }
        }
        self.courses.retain(|c| !c.is_closed());
    }
}
