use crate::{
    config::{PersonConfig, SchoolConfig},
    course::{Course, CourseId},
    error::InvalidInputError,
    person::{Instructor, InstructorId, InstructorKind, Person, Role, Roster, Student, StudentId},
    subject::Subject,
};

/// Owns every subject, course and person for the whole run.
///
/// Courses, students and instructors refer to each other by id only; the
/// school is the single place those ids resolve.
#[derive(Debug, Clone)]
pub struct School {
    name: String,
    subjects: Vec<Subject>,
    pub(crate) courses: Vec<Course>,
    pub(crate) roster: Roster,
    pub(crate) next_course: u32,
    max_enrollable_courses: usize,
    max_assignable_courses: usize,
}

impl School {
    pub fn new(name: impl Into<String>) -> School {
        School {
            name: name.into(),
            subjects: Vec::new(),
            courses: Vec::new(),
            roster: Roster::default(),
            next_course: 0,
            max_enrollable_courses: 1,
            max_assignable_courses: 1,
        }
    }

    pub fn from_config(config: SchoolConfig) -> School {
        let mut school = School::new(config.name);
        school.set_max_enrollable_courses(config.max_enrollable_courses);
        school.set_max_assignable_courses(config.max_assignable_courses);
        for subject in config.subjects {
            school.add_subject(subject);
        }
        for PersonConfig { role, person } in config.people {
            match role {
                Role::Student => {
                    school.add_student(person);
                }
                Role::Instructor(kind) => {
                    school.add_instructor(person, kind);
                }
            }
        }
        school
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_enrollable_courses(&self) -> usize {
        self.max_enrollable_courses
    }

    pub fn max_assignable_courses(&self) -> usize {
        self.max_assignable_courses
    }

    pub fn set_max_enrollable_courses(&mut self, max: usize) {
        self.max_enrollable_courses = max;
    }

    pub fn set_max_assignable_courses(&mut self, max: usize) {
        self.max_assignable_courses = max;
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn students(&self) -> &[Student] {
        self.roster.students()
    }

    pub fn instructors(&self) -> &[Instructor] {
        self.roster.instructors()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id() == id)
    }

    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.roster.student(id)
    }

    pub fn instructor(&self, id: InstructorId) -> Option<&Instructor> {
        self.roster.instructor(id)
    }

    pub fn add_subject(&mut self, subject: Subject) {
        self.subjects.push(subject);
    }

    pub fn add_student(&mut self, person: Person) -> StudentId {
        self.roster.push_student(person)
    }

    pub fn add_instructor(&mut self, person: Person, kind: InstructorKind) -> InstructorId {
        self.roster.push_instructor(person, kind)
    }

    /// Opens a new course for `subject`, starting in `days_until_start` days.
    pub fn open_course(&mut self, subject: Subject, days_until_start: i64) -> Result<CourseId, InvalidInputError> {
        let id = CourseId(self.next_course);
        let course = Course::new(id, subject, days_until_start)?;
        self.next_course += 1;
        self.courses.push(course);
        Ok(id)
    }

    /// Removes a student, withdrawing them from every course first.
    pub fn remove_student(&mut self, id: StudentId) -> Option<Student> {
        let mut student = self.roster.take_student(id)?;
        for course in &mut self.courses {
            course.withdraw(&mut student);
        }
        Some(student)
    }

    /// Removes an instructor, releasing every course they were assigned to first.
    pub fn remove_instructor(&mut self, id: InstructorId) -> Option<Instructor> {
        let mut instructor = self.roster.take_instructor(id)?;
        for course in &mut self.courses {
            course.release_instructor(&mut instructor);
        }
        Some(instructor)
    }

    /// Assigns an instructor to a course, updating both sides. A previous
    /// instructor of the course loses the assignment.
    pub fn assign_instructor(&mut self, course: CourseId, instructor: InstructorId) -> bool {
        let Some(course) = self.courses.iter_mut().find(|c| c.id() == course) else {
            return false;
        };
        match self.roster.instructor(instructor) {
            Some(candidate) if candidate.can_teach(course.subject()) => {}
            _ => return false,
        }
        if let Some(previous) = course.instructor().filter(|&old| old != instructor) {
            if let Some(previous) = self.roster.instructor_mut(previous) {
                course.release_instructor(previous);
            }
        }
        let Some(instructor) = self.roster.instructor_mut(instructor) else {
            return false;
        };
        if !course.set_instructor(instructor) {
            return false;
        }
        instructor.assign(course.id());
        true
    }

    /// Enrolls a student in a course through [`Course::enroll`].
    pub fn enroll(&mut self, course: CourseId, student: StudentId) -> bool {
        let Some(course) = self.courses.iter_mut().find(|c| c.id() == course) else {
            return false;
        };
        let Some(student) = self.roster.student_mut(student) else {
            return false;
        };
        course.enroll(student)
    }

    /// Every enrollment across all courses, one entry per (course, student) pair.
    pub fn active_students(&self) -> Vec<StudentId> {
        self.courses
            .iter()
            .flat_map(|c| c.students().iter().copied())
            .collect()
    }

    /// Number of courses whose enrollment list contains `student`.
    pub fn enrolled_course_count(&self, student: StudentId) -> usize {
        self.courses
            .iter()
            .filter(|c| c.students().contains(&student))
            .count()
    }

    /// Whether `student` holds a certificate for every subject in the catalog.
    pub fn has_completed_catalog(&self, student: &Student) -> bool {
        self.subjects.iter().all(|s| student.has_certificate(s.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school() -> School {
        let mut school = School::new("Test School");
        school.add_subject(Subject::new(1, 1, 3, "Maths", vec![]).unwrap());
        school
    }

    #[test]
    fn limits_default_to_one() {
        let school = School::new("Test School");
        assert_eq!(school.max_enrollable_courses(), 1);
        assert_eq!(school.max_assignable_courses(), 1);
    }

    #[test]
    fn assignment_updates_both_sides() {
        let mut school = school();
        let teacher = school.add_instructor(Person::new("T", 'M', 40).unwrap(), InstructorKind::Teacher);
        let course = school.open_course(school.subjects()[0].clone(), 2).unwrap();

        assert!(school.assign_instructor(course, teacher));
        assert_eq!(school.course(course).unwrap().instructor(), Some(teacher));
        assert_eq!(school.instructor(teacher).unwrap().assigned_courses(), &[course]);
    }

    #[test]
    fn reassigning_releases_previous_instructor() {
        let mut school = school();
        let first = school.add_instructor(Person::new("A", 'F', 40).unwrap(), InstructorKind::Teacher);
        let second = school.add_instructor(Person::new("B", 'M', 45).unwrap(), InstructorKind::Teacher);
        let student = school.add_student(Person::new("S", 'F', 19).unwrap());
        let course = school.open_course(school.subjects()[0].clone(), 2).unwrap();
        assert!(school.assign_instructor(course, first));
        assert!(school.enroll(course, student));

        assert!(school.assign_instructor(course, second));
        assert_eq!(school.course(course).unwrap().instructor(), Some(second));
        assert!(school.instructor(first).unwrap().assigned_courses().is_empty());
        assert_eq!(school.instructor(second).unwrap().assigned_courses(), &[course]);

        for _ in 0..6 {
            school.simulate_day();
        }
        assert!(school.student(student).unwrap().has_certificate(1));
        for id in [first, second] {
            assert!(!school.instructor(id).unwrap().assigned_courses().contains(&course));
        }
    }

    #[test]
    fn reassignment_to_unqualified_instructor_keeps_the_old_one() {
        let mut school = school();
        let teacher = school.add_instructor(Person::new("T", 'M', 40).unwrap(), InstructorKind::Teacher);
        let demonstrator = school.add_instructor(Person::new("D", 'F', 38).unwrap(), InstructorKind::Demonstrator);
        let course = school.open_course(school.subjects()[0].clone(), 2).unwrap();
        assert!(school.assign_instructor(course, teacher));

        assert!(!school.assign_instructor(course, demonstrator));
        assert_eq!(school.course(course).unwrap().instructor(), Some(teacher));
        assert_eq!(school.instructor(teacher).unwrap().assigned_courses(), &[course]);
        assert!(school.instructor(demonstrator).unwrap().assigned_courses().is_empty());
    }

    #[test]
    fn removing_people_clears_back_references() {
        let mut school = school();
        let teacher = school.add_instructor(Person::new("T", 'M', 40).unwrap(), InstructorKind::Teacher);
        let student = school.add_student(Person::new("S", 'F', 19).unwrap());
        let course = school.open_course(school.subjects()[0].clone(), 2).unwrap();
        assert!(school.assign_instructor(course, teacher));
        assert!(school.enroll(course, student));
        assert_eq!(school.enrolled_course_count(student), 1);

        assert!(school.remove_student(student).is_some());
        assert!(school.course(course).unwrap().students().is_empty());
        assert!(school.active_students().is_empty());

        assert!(school.remove_instructor(teacher).is_some());
        assert!(!school.course(course).unwrap().has_instructor());
        assert!(school.remove_instructor(teacher).is_none());
    }

    #[test]
    fn catalog_completion() {
        let mut school = school();
        school.add_subject(Subject::new(2, 2, 1, "Art", vec![]).unwrap());
        let id = school.add_student(Person::new("S", 'F', 19).unwrap());
        school.roster.student_mut(id).unwrap().graduate(1);
        assert!(!school.has_completed_catalog(school.student(id).unwrap()));
        school.roster.student_mut(id).unwrap().graduate(2);
        assert!(school.has_completed_catalog(school.student(id).unwrap()));
    }
}
