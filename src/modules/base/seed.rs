//! 演示数据
//! Fixed seed collections every new workspace starts from.

use lazy_static::lazy_static;

use crate::modules::auth::models::{Role, User};
use crate::modules::calendar::models::{CalendarEvent, EventType};
use crate::modules::exams::models::ExamSchedule;
use crate::modules::holidays::models::Holiday;
use crate::modules::notices::models::Notice;

fn user(id: &str, name: &str, email: &str, role: Role, background: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        avatar: Some(format!(
            "https://ui-avatars.com/api/?name={}&background={}&color=fff",
            urlencoding::encode(name).replace("%20", "+"),
            background
        )),
    }
}

fn event(
    id: &str,
    title: &str,
    description: &str,
    event_type: EventType,
    start: &str,
    end: &str,
    created_by: &str,
) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        event_type,
        start_date: start.to_string(),
        end_date: end.to_string(),
        created_by: created_by.to_string(),
    }
}

fn notice(
    id: &str,
    title: &str,
    content: &str,
    file_url: Option<&str>,
    posted_by: &str,
    posted: &str,
    expires: &str,
) -> Notice {
    Notice {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        file_url: file_url.map(str::to_string),
        posted_by: posted_by.to_string(),
        posted_date: posted.to_string(),
        expiry_date: Some(expires.to_string()),
    }
}

fn exam(id: &str, subject: &str, exam_type: &str, date: &str, time: &str, room: &str) -> ExamSchedule {
    ExamSchedule {
        id: id.to_string(),
        subject: subject.to_string(),
        exam_type: exam_type.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        room: room.to_string(),
        created_by: "1".to_string(),
    }
}

fn holiday(id: &str, title: &str, description: &str, date: &str) -> Holiday {
    Holiday {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        date: date.to_string(),
    }
}

lazy_static! {
    pub static ref USERS: Vec<User> = vec![
        user("1", "Admin User", "admin@academy.edu", Role::Admin, "6366F1"),
        user("2", "Teacher Smith", "teacher@academy.edu", Role::Teacher, "22C55E"),
        user("3", "Student Doe", "student@academy.edu", Role::Student, "3B82F6"),
    ];

    pub static ref EVENTS: Vec<CalendarEvent> = vec![
        event("1", "Spring Break", "Spring break for all students and faculty", EventType::Holiday, "2025-03-15", "2025-03-22", "1"),
        event("2", "Midterm Examinations", "Midterm examination period", EventType::Exam, "2025-03-07", "2025-03-12", "1"),
        event("3", "Final Examinations", "Final examination period", EventType::Exam, "2025-05-20", "2025-05-29", "1"),
        event("4", "Computer Science Seminar", "Guest lecture by Dr. Jane Smith on AI Ethics", EventType::Seminar, "2025-04-10", "2025-04-10", "2"),
        event("5", "Class Registration Opens", "Registration begins for next semester", EventType::Class, "2025-04-15", "2025-04-30", "1"),
        event("6", "New Student Orientation", "Orientation for all incoming freshmen", EventType::Seminar, "2025-06-01", "2025-06-03", "1"),
    ];

    pub static ref NOTICES: Vec<Notice> = vec![
        notice("1", "Library Hours Extended During Finals",
            "The library will remain open 24/7 during the final examination period from May 20-29, 2025.",
            None, "1", "2025-05-01", "2025-05-30"),
        notice("2", "Campus Wi-Fi Maintenance",
            "Campus Wi-Fi will be down for maintenance on Saturday, March 5, from 2:00 AM to 6:00 AM.",
            None, "1", "2025-03-01", "2025-03-06"),
        notice("3", "Scholarship Applications Now Open",
            "Applications for the Fall 2025 Merit Scholarship are now open. Deadline is April 15.",
            Some("/files/scholarship_application.pdf"), "1", "2025-02-15", "2025-04-15"),
        notice("4", "Computer Science Department Faculty Opening",
            "The Computer Science Department is accepting applications for Assistant Professor position.",
            None, "2", "2025-01-20", "2025-03-20"),
        notice("5", "Student Council Elections",
            "Nominations for Student Council positions are now open. Submit your application by March 30.",
            None, "1", "2025-03-10", "2025-03-30"),
    ];

    pub static ref EXAMS: Vec<ExamSchedule> = vec![
        exam("1", "Computer Science 101", "Midterm", "2025-03-09", "10:00 AM - 12:00 PM", "Hall A"),
        exam("2", "Mathematics 202", "Midterm", "2025-03-10", "2:00 PM - 4:00 PM", "Hall B"),
        exam("3", "Physics 101", "Midterm", "2025-03-11", "9:00 AM - 11:00 AM", "Lab 1"),
        exam("4", "Computer Science 101", "Final", "2025-05-22", "10:00 AM - 1:00 PM", "Hall A"),
        exam("5", "Mathematics 202", "Final", "2025-05-24", "2:00 PM - 5:00 PM", "Hall B"),
        exam("6", "Physics 101", "Final", "2025-05-26", "9:00 AM - 12:00 PM", "Lab 1"),
    ];

    pub static ref HOLIDAYS: Vec<Holiday> = vec![
        holiday("1", "New Year's Day", "New Year's Day national holiday", "2025-01-01"),
        holiday("2", "Martin Luther King Jr. Day", "Martin Luther King Jr. Day national holiday", "2025-01-20"),
        holiday("3", "Spring Break", "Spring break for all students and faculty", "2025-03-15"),
        holiday("4", "Memorial Day", "Memorial Day national holiday", "2025-05-26"),
        holiday("5", "Independence Day", "Independence Day national holiday", "2025-07-04"),
    ];
}

pub fn find_user_by_email(email: &str) -> Option<&'static User> {
    USERS.iter().find(|user| user.email == email)
}

pub fn first_user_with_role(role: Role) -> Option<&'static User> {
    USERS.iter().find(|user| user.role == role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_urls() {
        assert_eq!(
            USERS[1].avatar.as_deref(),
            Some("https://ui-avatars.com/api/?name=Teacher+Smith&background=22C55E&color=fff")
        );
    }

    #[test]
    fn test_lookup_helpers() {
        assert_eq!(find_user_by_email("student@academy.edu").unwrap().id, "3");
        assert!(find_user_by_email("STUDENT@academy.edu").is_none());
        assert_eq!(first_user_with_role(Role::Admin).unwrap().name, "Admin User");
    }

    #[test]
    fn test_seed_sizes() {
        assert_eq!(EVENTS.len(), 6);
        assert_eq!(NOTICES.len(), 5);
        assert_eq!(EXAMS.len(), 6);
        assert_eq!(HOLIDAYS.len(), 5);
    }
}
