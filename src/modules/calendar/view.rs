//! 日历视图计算
//! Search, type filter and day/week/month windows over calendar events.

use chrono::{Datelike, Days, Months, NaiveDate};
use std::collections::HashMap;

use crate::comm::date::{compare_iso, contains_ci, parse_local_date};
use crate::modules::calendar::models::{CalendarEvent, CalendarView, EventType};

/// 事件类型显示开关；不在表中的类型不显示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTypeFilter {
    shown: HashMap<EventType, bool>,
}

impl Default for EventTypeFilter {
    fn default() -> Self {
        Self {
            shown: EventType::ALL.iter().map(|kind| (*kind, true)).collect(),
        }
    }
}

impl EventTypeFilter {
    pub fn none() -> Self {
        Self {
            shown: HashMap::new(),
        }
    }

    /// Parses `holiday,exam`; unknown names are ignored. An empty list shows every type.
    pub fn from_list(list: &str) -> Self {
        let kinds: Vec<EventType> = list
            .split(',')
            .filter_map(|name| name.parse().ok())
            .collect();
        if list.trim().is_empty() {
            return Self::default();
        }

        let mut filter = Self::none();
        for kind in kinds {
            filter.set(kind, true);
        }
        filter
    }

    pub fn set(&mut self, kind: EventType, shown: bool) {
        self.shown.insert(kind, shown);
    }

    pub fn is_shown(&self, kind: EventType) -> bool {
        self.shown.get(&kind).copied().unwrap_or(false)
    }
}

/// 标题和描述的不区分大小写搜索，结果按开始日期升序
pub fn filter_events(
    events: &[CalendarEvent],
    search: &str,
    filter: &EventTypeFilter,
) -> Vec<CalendarEvent> {
    let needle = search.trim().to_lowercase();
    let mut matched: Vec<CalendarEvent> = events
        .iter()
        .filter(|event| filter.is_shown(event.event_type))
        .filter(|event| {
            contains_ci(&event.title, &needle)
                || event
                    .description
                    .as_deref()
                    .is_some_and(|description| contains_ci(description, &needle))
        })
        .cloned()
        .collect();
    sort_by_start(&mut matched);
    matched
}

pub fn sort_by_start(events: &mut [CalendarEvent]) {
    events.sort_by(|a, b| compare_iso(&a.start_date, &b.start_date));
}

/// 当天进行中且类型未被隐藏的事件（开始日 ≤ date ≤ 结束日）
pub fn events_on(
    events: &[CalendarEvent],
    date: NaiveDate,
    filter: &EventTypeFilter,
) -> Vec<CalendarEvent> {
    events
        .iter()
        .filter(|event| filter.is_shown(event.event_type))
        .filter(|event| {
            match (
                parse_local_date(&event.start_date),
                parse_local_date(&event.end_date),
            ) {
                (Some(start), Some(end)) => start <= date && date <= end,
                _ => false,
            }
        })
        .cloned()
        .collect()
}

pub fn days_in_view(view: CalendarView, anchor: NaiveDate) -> Vec<NaiveDate> {
    match view {
        CalendarView::Day => vec![anchor],
        CalendarView::Week => {
            let offset = u64::from(anchor.weekday().num_days_from_sunday());
            let start = anchor.checked_sub_days(Days::new(offset)).unwrap_or(anchor);
            start.iter_days().take(7).collect()
        }
        CalendarView::Month => {
            let first = anchor.with_day(1).unwrap_or(anchor);
            first
                .iter_days()
                .take_while(|day| day.month() == first.month())
                .collect()
        }
    }
}

/// 上一页/下一页
pub fn step(view: CalendarView, anchor: NaiveDate, forward: bool) -> NaiveDate {
    let moved = match (view, forward) {
        (CalendarView::Day, true) => anchor.checked_add_days(Days::new(1)),
        (CalendarView::Day, false) => anchor.checked_sub_days(Days::new(1)),
        (CalendarView::Week, true) => anchor.checked_add_days(Days::new(7)),
        (CalendarView::Week, false) => anchor.checked_sub_days(Days::new(7)),
        (CalendarView::Month, true) => anchor.checked_add_months(Months::new(1)),
        (CalendarView::Month, false) => anchor.checked_sub_months(Months::new(1)),
    };
    moved.unwrap_or(anchor)
}

/// 按类型统计事件数
pub fn count_by_type(events: &[CalendarEvent]) -> Vec<(EventType, usize)> {
    EventType::ALL
        .iter()
        .map(|kind| {
            let count = events.iter().filter(|event| event.event_type == *kind).count();
            (*kind, count)
        })
        .collect()
}
