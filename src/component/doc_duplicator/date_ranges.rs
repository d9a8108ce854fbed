//! 雙週日期區間標籤產生

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate, TimeDelta};

/// 標籤中的日期格式，例如 `04-22-2024`
pub const DATE_FORMAT: &str = "%m-%d-%Y";

/// 一次最多產生的區間數（約二十年）
pub const MAX_PERIODS: usize = 520;

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .with_context(|| format!("Invalid date '{}', expected MM-DD-YYYY", input.trim()))
}

/// 產生 `count` 個雙週區間標籤 `開始_結束`
///
/// 區間以 `start` 所在週的星期一為基準，每十四天一期：
/// 第 k 期從 `星期一 + 14k` 開始，結束於 `星期一 + 14k + 11`（第二週的星期五）。
/// 第一期例外地從 `start` 當天開始，因此週中開始時第一期較短。
pub fn biweekly_ranges(start: NaiveDate, count: usize) -> Result<Vec<String>> {
    if count > MAX_PERIODS {
        bail!("Too many periods: {count} (at most {MAX_PERIODS})");
    }

    let offset = TimeDelta::days(i64::from(start.weekday().num_days_from_monday()));
    let monday = start
        .checked_sub_signed(offset)
        .with_context(|| format!("Date out of range: {start}"))?;

    let mut labels = Vec::new();
    for period in 0..count {
        let period_offset = i64::try_from(period)
            .ok()
            .and_then(|k| k.checked_mul(14))
            .and_then(TimeDelta::try_days);
        let Some((period_monday, period_end)) = period_offset.and_then(|delta| {
            let period_monday = monday.checked_add_signed(delta)?;
            let period_end = period_monday.checked_add_signed(TimeDelta::days(11))?;
            Some((period_monday, period_end))
        }) else {
            bail!("Date out of range after {period} period(s) from {start}");
        };

        let period_start = if period == 0 { start } else { period_monday };
        labels.push(format!(
            "{}_{}",
            period_start.format(DATE_FORMAT),
            period_end.format(DATE_FORMAT)
        ));
    }

    Ok(labels)
}
