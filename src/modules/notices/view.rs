use chrono::{Duration, NaiveDateTime};

use crate::comm::date::{compare_iso, contains_ci, parse_local_datetime};
use crate::modules::notices::models::{Notice, NoticeEntry, NoticeSort};

/// 新公告判定窗口
pub const NEW_NOTICE_DAYS: i64 = 7;

pub fn search_notices(notices: &[Notice], search: &str) -> Vec<Notice> {
    let needle = search.trim().to_lowercase();
    notices
        .iter()
        .filter(|notice| contains_ci(&notice.title, &needle) || contains_ci(&notice.content, &needle))
        .cloned()
        .collect()
}

/// 按发布日期排序，相同日期保持原顺序
pub fn sort_notices(notices: &mut [Notice], sort: NoticeSort) {
    notices.sort_by(|a, b| {
        let ascending = compare_iso(&a.posted_date, &b.posted_date);
        match sort {
            NoticeSort::Oldest => ascending,
            NoticeSort::Newest => match (
                parse_local_datetime(&a.posted_date),
                parse_local_datetime(&b.posted_date),
            ) {
                (Some(_), Some(_)) => ascending.reverse(),
                _ => ascending,
            },
        }
    });
}

pub fn is_new(notice: &Notice, now: NaiveDateTime) -> bool {
    parse_local_datetime(&notice.posted_date)
        .is_some_and(|posted| posted > now - Duration::days(NEW_NOTICE_DAYS))
}

pub fn list_notices(notices: &[Notice], search: &str, sort: NoticeSort, now: NaiveDateTime) -> Vec<NoticeEntry> {
    let mut matched = search_notices(notices, search);
    sort_notices(&mut matched, sort);
    matched
        .into_iter()
        .map(|notice| NoticeEntry {
            is_new: is_new(&notice, now),
            notice,
        })
        .collect()
}
