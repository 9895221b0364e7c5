use polars::prelude::*;
use std::{fmt, ops::Deref};

use crate::serialize::SchoolSnapshot;

/// One titled table of the report.
pub struct ReportTable {
    title: &'static str,
    df: DataFrame,
}

impl ReportTable {
    pub fn new(title: &'static str, columns: Vec<Series>) -> PolarsResult<ReportTable> {
        Ok(ReportTable {
            title,
            df: DataFrame::new(columns)?,
        })
    }

    pub fn title(&self) -> &str {
        self.title
    }
}

impl Deref for ReportTable {
    type Target = DataFrame;

    fn deref(&self) -> &Self::Target {
        &self.df
    }
}

impl fmt::Display for ReportTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        write!(f, "{}", self.df)
    }
}

/// Subjects, courses, instructors and students of a snapshot as data frames.
pub struct SchoolReport {
    school: String,
    day: u32,
    pub subjects: ReportTable,
    pub courses: ReportTable,
    pub instructors: ReportTable,
    pub students: ReportTable,
}

impl SchoolReport {
    pub fn new(snapshot: &SchoolSnapshot) -> PolarsResult<SchoolReport> {
        let subjects = &snapshot.subjects;
        let courses = &snapshot.courses;
        let instructors = &snapshot.instructors;
        let students = &snapshot.students;

        Ok(SchoolReport {
            school: snapshot.name.clone(),
            day: snapshot.day,
            subjects: ReportTable::new(
                "SUBJECTS",
                vec![
                    Series::new("NAME", collect(subjects, |s| s.description.clone())),
                    Series::new("SUBJECT ID", collect(subjects, |s| s.id)),
                    Series::new("SPECIALISM", collect(subjects, |s| s.specialism)),
                    Series::new("DURATION", collect(subjects, |s| format!("{} days", s.duration))),
                    Series::new(
                        "PREREQUISITES",
                        collect(subjects, |s| join_or(&s.prerequisites, "No Prerequisites")),
                    ),
                ],
            )?,
            courses: ReportTable::new(
                "COURSES",
                vec![
                    Series::new("SUBJECT", collect(courses, |c| c.subject.clone())),
                    Series::new("STATUS", collect(courses, |c| c.status_text.clone())),
                    Series::new(
                        "INSTRUCTOR",
                        collect(courses, |c| c.instructor.clone().unwrap_or_else(|| "N/A".to_string())),
                    ),
                    Series::new("ENROLLED STUDENTS", collect(courses, |c| c.students.join(", "))),
                ],
            )?,
            instructors: ReportTable::new(
                "INSTRUCTORS",
                vec![
                    Series::new("NAME", collect(instructors, |i| i.name.clone())),
                    Series::new("GENDER", collect(instructors, |i| i.gender.to_string())),
                    Series::new("AGE", collect(instructors, |i| i.age)),
                    Series::new("INSTRUCTOR TYPE", collect(instructors, |i| i.kind.to_string())),
                    Series::new(
                        "ASSIGNED COURSES",
                        collect(instructors, |i| join_or(&i.assigned_courses, "Free")),
                    ),
                ],
            )?,
            students: ReportTable::new(
                "STUDENTS",
                vec![
                    Series::new("NAME", collect(students, |s| s.name.clone())),
                    Series::new("GENDER", collect(students, |s| s.gender.to_string())),
                    Series::new("AGE", collect(students, |s| s.age)),
                    Series::new("CERTIFICATES", collect(students, |s| join_or(&s.certificates, ""))),
                    Series::new(
                        "ENROLLED COURSES",
                        collect(students, |s| join_or(&s.attended_courses, "Free")),
                    ),
                ],
            )?,
        })
    }
}

impl fmt::Display for SchoolReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Welcome to {} - day {}", self.school, self.day)?;
        for table in [&self.subjects, &self.courses, &self.instructors, &self.students] {
            writeln!(f)?;
            writeln!(f, "{table}")?;
        }
        Ok(())
    }
}

fn collect<T, V>(rows: &[T], field: impl Fn(&T) -> V) -> Vec<V> {
    rows.iter().map(field).collect()
}

fn join_or<T: ToString>(items: &[T], empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
