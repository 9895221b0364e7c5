use crate::{
    generator::create_person,
    person::{InstructorId, InstructorKind, Role, StudentId},
    random::{chance, RandomSource},
    scheduler::DaySchedule,
    school::School,
};

/// Up to this many students (exclusive) are admitted each day.
pub const STUDENT_ADMISSION_BOUND: u32 = 3;

/// Daily percentage chance of each kind of instructor joining.
pub const INSTRUCTOR_HIRING: [(InstructorKind, f64); 4] = [
    (InstructorKind::Teacher, 20.0),
    (InstructorKind::Demonstrator, 10.0),
    (InstructorKind::OoTrainer, 5.0),
    (InstructorKind::GuiTrainer, 5.0),
];

pub const IDLE_INSTRUCTOR_LEAVING: f64 = 20.0;
pub const IDLE_STUDENT_LEAVING: f64 = 5.0;

/// Everything that changed during one [`Administrator::run_day`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayOutcome {
    pub day: u32,
    pub admitted_students: Vec<StudentId>,
    pub hired_instructors: Vec<InstructorId>,
    pub schedule: DaySchedule,
    pub departed_instructors: Vec<InstructorId>,
    pub graduated_students: Vec<StudentId>,
    pub departed_students: Vec<StudentId>,
}

/// Runs a school: admits and hires people, lets the school day happen, then
/// lets people leave.
#[derive(Debug)]
pub struct Administrator<R> {
    school: School,
    rng: R,
    day: u32,
}

impl<R: RandomSource> Administrator<R> {
    pub fn new(school: School, rng: R) -> Administrator<R> {
        Administrator { school, rng, day: 0 }
    }

    pub fn school(&self) -> &School {
        &self.school
    }

    /// Number of days run so far.
    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn run_day(&mut self) -> DayOutcome {
        self.day += 1;
        let admitted_students = self.admit_students();
        let hired_instructors = self.hire_instructors();
        let schedule = self.school.simulate_day();
        let departed_instructors = self.instructors_leaving();
        let (graduated_students, departed_students) = self.students_leaving();

        tracing::info!(
            day = self.day,
            admitted = admitted_students.len(),
            hired = hired_instructors.len(),
            courses = self.school.courses().len(),
            graduated = graduated_students.len(),
            departed = departed_students.len() + departed_instructors.len(),
            "day finished"
        );

        DayOutcome {
            day: self.day,
            admitted_students,
            hired_instructors,
            schedule,
            departed_instructors,
            graduated_students,
            departed_students,
        }
    }

    /// Runs `days` days, handing the school and each day's outcome to `observer`.
    pub fn run<F>(&mut self, days: u32, mut observer: F)
    where
        F: FnMut(&School, &DayOutcome),
    {
        for _ in 0..days {
            let outcome = self.run_day();
            observer(&self.school, &outcome);
        }
    }

    fn admit_students(&mut self) -> Vec<StudentId> {
        let count = self.rng.next_below(STUDENT_ADMISSION_BOUND);
        let mut admitted = Vec::new();
        for _ in 0..count {
            match create_person(&mut self.rng, Role::Student) {
                Ok(person) => {
                    tracing::info!(name = person.name(), "student admitted");
                    admitted.push(self.school.add_student(person));
                }
                Err(error) => tracing::warn!(%error, "could not generate a student"),
            }
        }
        admitted
    }

    fn hire_instructors(&mut self) -> Vec<InstructorId> {
        let mut hired = Vec::new();
        for (kind, percent) in INSTRUCTOR_HIRING {
            if !chance(&mut self.rng, percent) {
                continue;
            }
            match create_person(&mut self.rng, Role::Instructor(kind)) {
                Ok(person) => {
                    tracing::info!(name = person.name(), %kind, "instructor hired");
                    hired.push(self.school.add_instructor(person, kind));
                }
                Err(error) => tracing::warn!(%error, "could not generate an instructor"),
            }
        }
        hired
    }

    fn instructors_leaving(&mut self) -> Vec<InstructorId> {
        let idle: Vec<InstructorId> = self
            .school
            .instructors()
            .iter()
            .filter(|i| i.assigned_courses().is_empty())
            .map(|i| i.id())
            .collect();
        let mut departed = Vec::new();
        for id in idle {
            if chance(&mut self.rng, IDLE_INSTRUCTOR_LEAVING) {
                if let Some(instructor) = self.school.remove_instructor(id) {
                    tracing::info!(name = instructor.name(), "instructor left");
                    departed.push(id);
                }
            }
        }
        departed
    }

    /// Removes every student holding the whole catalog, then gives each student
    /// not enrolled anywhere a chance to leave. Returns (graduated, departed).
    fn students_leaving(&mut self) -> (Vec<StudentId>, Vec<StudentId>) {
        let active = self.school.active_students();
        let students: Vec<(StudentId, bool)> = self
            .school
            .students()
            .iter()
            .map(|s| (s.id(), self.school.has_completed_catalog(s)))
            .collect();

        let mut graduated = Vec::new();
        let mut departed = Vec::new();
        for (id, completed) in students {
            if completed {
                if let Some(student) = self.school.remove_student(id) {
                    tracing::info!(name = student.name(), "student graduated");
                    graduated.push(id);
                }
            } else if !active.contains(&id) && chance(&mut self.rng, IDLE_STUDENT_LEAVING) {
                if let Some(student) = self.school.remove_student(id) {
                    tracing::info!(name = student.name(), "student left");
                    departed.push(id);
                }
            }
        }
        (graduated, departed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{person::Person, random::testing::ScriptedRandom, subject::Subject};

    fn school() -> School {
        let mut school = School::new("Test School");
        school.add_subject(Subject::new(1, 1, 3, "Maths", vec![]).unwrap());
        school
    }

    #[test]
    fn admits_the_drawn_number_of_students() {
        let rng = ScriptedRandom::constant(0.99).with_integers(&[2, 0, 0, 1, 7]);
        let mut admin = Administrator::new(school(), rng);

        let outcome = admin.run_day();
        assert_eq!(outcome.admitted_students.len(), 2);
        assert!(outcome.hired_instructors.is_empty());
        let names: Vec<_> = admin.school().students().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, ["James", "Mary"]);
        assert_eq!(admin.school().students()[1].age(), 25);
    }

    #[test]
    fn hiring_trials_are_independent() {
        let rng = ScriptedRandom::constant(0.99).with_floats(&[0.1, 0.5, 0.01, 0.9]);
        let mut admin = Administrator::new(school(), rng);

        let outcome = admin.run_day();
        let kinds: Vec<_> = admin.school().instructors().iter().map(|i| i.kind()).collect();
        assert_eq!(kinds, [InstructorKind::Teacher, InstructorKind::OoTrainer]);
        assert_eq!(outcome.hired_instructors.len(), 2);
    }

    #[test]
    fn graduate_leaves_without_a_draw() {
        let mut school = school();
        let id = school.add_student(Person::new("Ann", 'F', 20).unwrap());
        school.roster.student_mut(id).unwrap().graduate(1);
        let mut admin = Administrator::new(school, ScriptedRandom::constant(0.99));

        let outcome = admin.run_day();
        assert_eq!(outcome.graduated_students, vec![id]);
        assert!(admin.school().students().is_empty());
        assert_eq!(admin.rng.float_calls, INSTRUCTOR_HIRING.len());
    }

    #[test]
    fn only_idle_people_may_leave() {
        let mut school = school();
        let busy_teacher = school.add_instructor(Person::new("T", 'M', 40).unwrap(), InstructorKind::Teacher);
        let idle_teacher = school.add_instructor(Person::new("D", 'F', 50).unwrap(), InstructorKind::Demonstrator);
        let enrolled = school.add_student(Person::new("Ann", 'F', 20).unwrap());
        let mut admin = Administrator::new(school, ScriptedRandom::constant(0.99));

        // day one opens a course, so nobody is idle except the demonstrator
        admin.run_day();
        assert!(admin.school().student(enrolled).is_some());

        admin.rng.floats.extend([0.99; 4]);
        admin.rng.default_float = 0.0;
        let outcome = admin.run_day();
        assert_eq!(outcome.departed_instructors, vec![idle_teacher]);
        assert!(outcome.departed_students.is_empty());
        assert!(admin.school().instructor(busy_teacher).is_some());
        assert!(admin.school().student(enrolled).is_some());
    }

    #[test]
    fn idle_student_may_leave() {
        let mut school = School::new("Empty");
        school.add_subject(Subject::new(1, 3, 3, "Robotics", vec![2]).unwrap());
        let id = school.add_student(Person::new("Ann", 'F', 20).unwrap());
        let mut admin = Administrator::new(school, ScriptedRandom::constant(0.0).with_floats(&[0.9, 0.9, 0.9, 0.9]));

        let outcome = admin.run_day();
        assert_eq!(outcome.departed_students, vec![id]);
        assert!(outcome.graduated_students.is_empty());
    }

    #[test]
    fn run_reports_every_day() {
        let mut admin = Administrator::new(school(), ScriptedRandom::constant(0.99));
        let mut days = Vec::new();
        admin.run(3, |school, outcome| days.push((outcome.day, school.courses().len())));
        assert_eq!(days.iter().map(|d| d.0).collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(admin.day(), 3);
    }
}
