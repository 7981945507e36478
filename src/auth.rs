//! Login roles and their checks.
//!
//! A student needs a non-blank name and id; the teacher role is granted by
//! one static credential pair. Neither is a trust boundary, they only gate
//! which screens and commands are reachable.

pub const TEACHER_USERNAME: &str = "teacher";
pub const TEACHER_PASSWORD: &str = "staffroom";

/// A logged-in student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub name: String,
    pub id: String,
}

/// Check a student login. Both fields are trimmed and must be non-empty.
pub fn validate_student(name: &str, id: &str) -> Result<Student, &'static str> {
    let name = name.trim();
    let id = id.trim();
    if name.is_empty() {
        return Err("Enter your name");
    }
    if id.is_empty() {
        return Err("Enter your student id");
    }
    Ok(Student {
        name: name.to_string(),
        id: id.to_string(),
    })
}

/// Check the teacher credential pair. The username is trimmed, the
/// password is compared as typed.
pub fn verify_teacher(username: &str, password: &str) -> bool {
    username.trim() == TEACHER_USERNAME && password == TEACHER_PASSWORD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_login_trims_fields() {
        let student = validate_student("  Ada Lovelace ", " S-1815 ").unwrap();
        assert_eq!(student.name, "Ada Lovelace");
        assert_eq!(student.id, "S-1815");
    }

    #[test]
    fn test_blank_student_fields_are_rejected() {
        assert_eq!(validate_student("", "S-1"), Err("Enter your name"));
        assert_eq!(validate_student("   ", "S-1"), Err("Enter your name"));
        assert_eq!(validate_student("Ada", ""), Err("Enter your student id"));
    }

    #[test]
    fn test_teacher_credential_check() {
        assert!(verify_teacher(TEACHER_USERNAME, TEACHER_PASSWORD));
        assert!(verify_teacher(" teacher ", TEACHER_PASSWORD));
        assert!(!verify_teacher(TEACHER_USERNAME, "wrong"));
        assert!(!verify_teacher("admin", TEACHER_PASSWORD));
        // The password is not trimmed.
        assert!(!verify_teacher(TEACHER_USERNAME, " staffroom "));
    }
}
