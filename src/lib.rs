//! A turn-based simulation of a vocational school.
//!
//! A [`School`] owns a catalog of subjects and a changing population of
//! students and instructors. Each simulated day the [`Administrator`] admits
//! and hires people, the school opens courses, matches instructors and
//! students to them and moves every course forward one day, and finally idle
//! people may leave.

pub mod administrator;
pub mod config;
pub mod course;
pub mod error;
pub mod generator;
pub mod person;
pub mod random;
pub mod report;
pub mod scheduler;
pub mod school;
pub mod serialize;
pub mod subject;

pub use administrator::{Administrator, DayOutcome};
pub use config::SchoolConfig;
pub use course::{Course, CourseId, CourseState};
pub use error::{ConfigError, InvalidInputError};
pub use person::{Gender, Instructor, InstructorId, InstructorKind, Person, Role, Student, StudentId};
pub use random::{RandomSource, SeededRandom};
pub use report::SchoolReport;
pub use scheduler::DaySchedule;
pub use school::School;
pub use serialize::SchoolSnapshot;
pub use subject::Subject;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::ScriptedRandom;

    const CONFIG: &str = "\
School:Vocational School,1,1
Subject:Programming,1,1,3
Teacher:Linda,F,43
Student:James,M,19
";

    fn administrator() -> Administrator<ScriptedRandom> {
        let school = School::from_config(CONFIG.parse().unwrap());
        // no admissions, no hires, nobody leaves
        Administrator::new(school, ScriptedRandom::constant(0.99))
    }

    #[test]
    fn configured_course_runs_to_certificate() {
        let mut admin = administrator();
        let mut statuses = Vec::new();
        let mut outcomes = Vec::new();
        admin.run(5, |school, outcome| {
            statuses.push(school.courses().first().map(|c| c.status()));
            outcomes.push(outcome.clone());
        });

        assert_eq!(statuses[..4], [Some(-1), Some(3), Some(2), Some(1)]);
        let last = &outcomes[4];
        assert_eq!(last.schedule.finished, outcomes[0].schedule.opened);
        // James now holds the whole catalog and leaves the same day
        assert_eq!(last.graduated_students.len(), 1);
        let school = admin.school();
        assert!(school.students().is_empty());
        assert!(school.instructors()[0].assigned_courses().is_empty());
    }

    #[test]
    fn empty_course_is_cancelled_before_starting() {
        let mut admin = administrator();
        admin.run(3, |_, _| {});
        // day three opened a second course that nobody is free to take
        let outcome = admin.run_day();
        assert_eq!(outcome.schedule.cancelled.len(), 1);
        assert!(outcome.schedule.started.is_empty());
        assert_eq!(admin.school().instructors()[0].assigned_courses().len(), 1);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let run = |seed| {
            let school = School::from_config(CONFIG.parse().unwrap());
            let mut admin = Administrator::new(school, SeededRandom::new(seed));
            admin.run(20, |_, _| {});
            SchoolSnapshot::capture(admin.school(), admin.day())
        };
        assert_eq!(run(11), run(11));
    }
}
