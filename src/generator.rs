use crate::{
    error::InvalidInputError,
    person::{Person, Role},
    random::RandomSource,
};

/// Name and gender pairs new people are drawn from.
pub const NAMES_AND_GENDERS: [(&str, char); 20] = [
    ("James", 'M'),
    ("Mary", 'F'),
    ("John", 'M'),
    ("Patricia", 'F'),
    ("Robert", 'M'),
    ("Jennifer", 'F'),
    ("Michael", 'M'),
    ("Linda", 'F'),
    ("William", 'M'),
    ("Elizabeth", 'F'),
    ("David", 'M'),
    ("Barbara", 'F'),
    ("Richard", 'M'),
    ("Susan", 'F'),
    ("Joseph", 'M'),
    ("Jessica", 'F'),
    ("Thomas", 'M'),
    ("Sarah", 'F'),
    ("Charles", 'M'),
    ("Karen", 'F'),
];

/// Half-open age range for newly admitted students.
pub const STUDENT_AGES: (u32, u32) = (18, 26);
/// Half-open age range for newly hired instructors.
pub const INSTRUCTOR_AGES: (u32, u32) = (30, 70);

/// Draws a random person for `role`: name first, then age.
pub fn create_person<R: RandomSource + ?Sized>(rng: &mut R, role: Role) -> Result<Person, InvalidInputError> {
    let (name, gender) = NAMES_AND_GENDERS[rng.next_below(NAMES_AND_GENDERS.len() as u32) as usize];
    let (low, high) = match role {
        Role::Student => STUDENT_AGES,
        Role::Instructor(_) => INSTRUCTOR_AGES,
    };
    let age = rng.in_range(low, high);
    Person::new(name, gender, i64::from(age))
}
