use crate::comm::date::{compare_iso, contains_ci};
use crate::modules::exams::models::{ExamListing, ExamSchedule};

pub const ALL_TYPES: &str = "all";

/// `all` 加上按首次出现顺序去重的考试类型
pub fn exam_types(exams: &[ExamSchedule]) -> Vec<String> {
    let mut types = vec![ALL_TYPES.to_string()];
    for exam in exams {
        if !types[1..].contains(&exam.exam_type) {
            types.push(exam.exam_type.clone());
        }
    }
    types
}

/// 搜索科目、类型和考场，按类型精确过滤，结果按日期升序
pub fn filter_exams(exams: &[ExamSchedule], search: &str, exam_type: &str) -> Vec<ExamSchedule> {
    let needle = search.trim().to_lowercase();
    let mut matched: Vec<ExamSchedule> = exams
        .iter()
        .filter(|exam| {
            contains_ci(&exam.subject, &needle)
                || contains_ci(&exam.exam_type, &needle)
                || contains_ci(&exam.room, &needle)
        })
        .filter(|exam| exam_type.is_empty() || exam_type == ALL_TYPES || exam.exam_type == exam_type)
        .cloned()
        .collect();
    sort_exams(&mut matched);
    matched
}

pub fn sort_exams(exams: &mut [ExamSchedule]) {
    exams.sort_by(|a, b| compare_iso(&a.date, &b.date));
}

pub fn exam_listing(exams: &[ExamSchedule], search: &str, exam_type: &str) -> ExamListing {
    ExamListing {
        exams: filter_exams(exams, search, exam_type),
        exam_types: exam_types(exams),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::base::seed;

    fn dated(id: &str, date: &str) -> ExamSchedule {
        ExamSchedule {
            id: id.to_string(),
            date: date.to_string(),
            ..seed::EXAMS[0].clone()
        }
    }

    #[test]
    fn test_sorted_by_date() {
        let exams = vec![
            dated("a", "2025-05-26"),
            dated("b", "2025-03-09"),
            dated("c", "2025-05-22"),
        ];
        let dates: Vec<String> = filter_exams(&exams, "", ALL_TYPES)
            .into_iter()
            .map(|exam| exam.date)
            .collect();
        assert_eq!(dates, vec!["2025-03-09", "2025-05-22", "2025-05-26"]);
    }

    #[test]
    fn test_type_list_keeps_first_seen_order() {
        assert_eq!(exam_types(&seed::EXAMS), vec!["all", "Midterm", "Final"]);
        assert_eq!(exam_types(&[]), vec!["all"]);
    }

    #[test]
    fn test_search_and_type_filter() {
        let finals = filter_exams(&seed::EXAMS, "", "Final");
        assert_eq!(finals.len(), 3);
        assert!(finals.iter().all(|exam| exam.exam_type == "Final"));

        let hall_a = filter_exams(&seed::EXAMS, "hall a", ALL_TYPES);
        assert_eq!(hall_a.len(), 2);
        assert!(filter_exams(&seed::EXAMS, "physics", "Quiz").is_empty());
    }
}
