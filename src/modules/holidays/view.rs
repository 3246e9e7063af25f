use crate::comm::date::{compare_iso, contains_ci, parse_local_date};
use crate::modules::holidays::models::{Holiday, HolidayGroup};

const UNKNOWN_MONTH: &str = "Unknown date";

pub fn search_holidays(holidays: &[Holiday], search: &str) -> Vec<Holiday> {
    let needle = search.trim().to_lowercase();
    let mut matched: Vec<Holiday> = holidays
        .iter()
        .filter(|holiday| {
            contains_ci(&holiday.title, &needle)
                || holiday
                    .description
                    .as_deref()
                    .is_some_and(|description| contains_ci(description, &needle))
        })
        .cloned()
        .collect();
    matched.sort_by(|a, b| compare_iso(&a.date, &b.date));
    matched
}

/// e.g. `January 2025`
pub fn month_label(date: &str) -> String {
    parse_local_date(date)
        .map(|date| date.format("%B %Y").to_string())
        .unwrap_or_else(|| UNKNOWN_MONTH.to_string())
}

/// 按月份分组，组顺序为首次出现顺序
pub fn group_by_month(holidays: Vec<Holiday>) -> Vec<HolidayGroup> {
    let mut groups: Vec<HolidayGroup> = Vec::new();
    for holiday in holidays {
        let month = month_label(&holiday.date);
        match groups.iter_mut().find(|group| group.month == month) {
            Some(group) => group.holidays.push(holiday),
            None => groups.push(HolidayGroup {
                month,
                holidays: vec![holiday],
            }),
        }
    }
    groups
}

pub fn grouped_holidays(holidays: &[Holiday], search: &str) -> Vec<HolidayGroup> {
    group_by_month(search_holidays(holidays, search))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holiday(id: &str, date: &str) -> Holiday {
        Holiday {
            id: id.to_string(),
            title: format!("Holiday {}", id),
            description: None,
            date: date.to_string(),
        }
    }

    #[test]
    fn test_groups_by_month_ascending() {
        let holidays = vec![
            holiday("spring", "2025-03-15"),
            holiday("mlk", "2025-01-20"),
            holiday("new-year", "2025-01-01"),
        ];
        let groups = grouped_holidays(&holidays, "");

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].month, "January 2025");
        let january: Vec<&str> = groups[0].holidays.iter().map(|h| h.date.as_str()).collect();
        assert_eq!(january, vec!["2025-01-01", "2025-01-20"]);
        assert_eq!(groups[1].month, "March 2025");
        assert_eq!(groups[1].holidays.len(), 1);
    }

    #[test]
    fn test_search_by_description() {
        let groups = grouped_holidays(&crate::modules::base::seed::HOLIDAYS, "NATIONAL");
        let total: usize = groups.iter().map(|group| group.holidays.len()).sum();
        assert_eq!(total, 4);
        assert!(grouped_holidays(&[], "").is_empty());
    }

    #[test]
    fn test_month_label_fallback() {
        assert_eq!(month_label("2025-07-04"), "July 2025");
        assert_eq!(month_label("soon"), "Unknown date");
    }
}
