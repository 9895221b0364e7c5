use serde::Serialize;

use crate::{
    course::{Course, CourseId, CourseState},
    person::{Gender, InstructorKind},
    school::School,
    subject::Subject,
};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SubjectInfo {
    pub id: u32,
    pub description: String,
    pub specialism: u32,
    pub duration: u32,
    pub prerequisites: Vec<u32>,
}

impl From<&Subject> for SubjectInfo {
    fn from(subject: &Subject) -> Self {
        SubjectInfo {
            id: subject.id(),
            description: subject.description().to_string(),
            specialism: subject.specialism(),
            duration: subject.duration(),
            prerequisites: subject.prerequisites().to_vec(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CourseInfo {
    pub id: CourseId,
    pub subject: String,
    pub subject_id: u32,
    pub status: i64,
    pub status_text: String,
    pub instructor: Option<String>,
    pub students: Vec<String>,
}

impl CourseInfo {
    fn capture(course: &Course, school: &School) -> Self {
        CourseInfo {
            id: course.id(),
            subject: course.subject().description().to_string(),
            subject_id: course.subject().id(),
            status: course.status(),
            status_text: status_text(course.state()),
            instructor: course
                .instructor()
                .and_then(|id| school.instructor(id))
                .map(|i| i.name().to_string()),
            students: course
                .students()
                .iter()
                .filter_map(|&id| school.student(id))
                .map(|s| s.name().to_string())
                .collect(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct InstructorInfo {
    pub name: String,
    pub gender: Gender,
    pub age: u32,
    pub kind: InstructorKind,
    pub assigned_courses: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StudentInfo {
    pub name: String,
    pub gender: Gender,
    pub age: u32,
    pub certificates: Vec<u32>,
    pub attended_courses: Vec<String>,
}

/// Read-only view of a school after a given day.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SchoolSnapshot {
    pub name: String,
    pub day: u32,
    pub subjects: Vec<SubjectInfo>,
    pub courses: Vec<CourseInfo>,
    pub instructors: Vec<InstructorInfo>,
    pub students: Vec<StudentInfo>,
}

impl SchoolSnapshot {
    pub fn capture(school: &School, day: u32) -> SchoolSnapshot {
        let course_names = |ids: &[CourseId]| -> Vec<String> {
            ids.iter()
                .filter_map(|&id| school.course(id))
                .map(|c| c.subject().description().to_string())
                .collect()
        };

        SchoolSnapshot {
            name: school.name().to_string(),
            day,
            subjects: school.subjects().iter().map(SubjectInfo::from).collect(),
            courses: school
                .courses()
                .iter()
                .map(|c| CourseInfo::capture(c, school))
                .collect(),
            instructors: school
                .instructors()
                .iter()
                .map(|i| InstructorInfo {
                    name: i.name().to_string(),
                    gender: i.gender(),
                    age: i.age(),
                    kind: i.kind(),
                    assigned_courses: course_names(i.assigned_courses()),
                })
                .collect(),
            students: school
                .students()
                .iter()
                .map(|s| StudentInfo {
                    name: s.name().to_string(),
                    gender: s.gender(),
                    age: s.age(),
                    certificates: s.certificates().to_vec(),
                    attended_courses: course_names(s.attended_courses()),
                })
                .collect(),
        }
    }
}

pub fn status_text(state: CourseState) -> String {
    match state {
        CourseState::Pending { days_until_start } => format!("{days_until_start} day(s) to start"),
        CourseState::Active { days_remaining } => format!("{days_remaining} day(s) to the end"),
        CourseState::Cancelled => "Course cancelled!".to_string(),
        CourseState::Finished => "Course finished!".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::Person;

    #[test]
    fn captures_names_instead_of_ids() {
        let mut school = School::new("Java School");
        school.add_subject(Subject::new(1, 1, 3, "Programming", vec![]).unwrap());
        school.add_instructor(Person::new("Linda", 'F', 43).unwrap(), InstructorKind::Teacher);
        school.add_student(Person::new("James", 'M', 19).unwrap());
        school.simulate_day();

        let snapshot = SchoolSnapshot::capture(&school, 1);
        assert_eq!(snapshot.courses.len(), 1);
        let course = &snapshot.courses[0];
        assert_eq!(course.status, -1);
        assert_eq!(course.status_text, "1 day(s) to start");
        assert_eq!(course.instructor.as_deref(), Some("Linda"));
        assert_eq!(course.students, ["James"]);
        assert_eq!(snapshot.instructors[0].assigned_courses, ["Programming"]);
        assert_eq!(snapshot.students[0].attended_courses, ["Programming"]);
    }

    #[test]
    fn serializes_to_json() {
        let mut school = School::new("Java School");
        school.add_subject(Subject::new(2, 3, 5, "OO Design", vec![1]).unwrap());
        school.add_instructor(Person::new("Karen", 'F', 51).unwrap(), InstructorKind::OoTrainer);

        let json = serde_json::to_value(SchoolSnapshot::capture(&school, 4)).unwrap();
        assert_eq!(json["day"], 4);
        assert_eq!(json["subjects"][0]["prerequisites"][0], 1);
        assert_eq!(json["instructors"][0]["kind"], "OOTrainer");
        assert_eq!(json["instructors"][0]["gender"], "F");
    }

    #[test]
    fn status_wording() {
        assert_eq!(status_text(CourseState::Active { days_remaining: 2 }), "2 day(s) to the end");
        assert_eq!(status_text(CourseState::Cancelled), "Course cancelled!");
    }
}
