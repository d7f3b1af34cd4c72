//! 月历计算

use jiff::civil::{Date, Weekday};

/// 星期名称，按周日起算的偏移索引
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.to_sunday_zero_offset() as usize]
}

pub fn month_name(date: Date) -> &'static str {
    MONTH_NAMES[(date.month() - 1) as usize]
}

/// 一周七天，空位属于相邻月份
pub type Week = [Option<i8>; 7];

/// 包含 `date` 的整月排布
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    first_weekday: Weekday,
    weeks: Vec<Week>,
}

impl MonthGrid {
    pub fn new(date: Date, first_weekday: Weekday) -> Self {
        let first = date.first_of_month();
        let leading = (first.weekday().to_sunday_zero_offset()
            - first_weekday.to_sunday_zero_offset())
        .rem_euclid(7) as usize;
        let days = date.days_in_month() as usize;

        let mut weeks = Vec::with_capacity((leading + days).div_ceil(7));
        let mut week: Week = [None; 7];
        for (cell, day) in (leading..).zip(1..=days) {
            week[cell % 7] = Some(day as i8);
            if cell % 7 == 6 {
                weeks.push(week);
                week = [None; 7];
            }
        }
        if week.iter().any(Option::is_some) {
            weeks.push(week);
        }

        Self {
            first_weekday,
            weeks,
        }
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// 表头：星期名称首字母，从一周的第一天开始
    pub fn header(&self) -> [&'static str; 7] {
        let start = self.first_weekday.to_sunday_zero_offset() as usize;
        core::array::from_fn(|column| {
            let name = WEEKDAY_NAMES[(start + column) % 7];
            &name[..1]
        })
    }

    pub fn leading_blanks(&self) -> usize {
        self.weeks
            .first()
            .map_or(0, |week| week.iter().take_while(|day| day.is_none()).count())
    }
}
