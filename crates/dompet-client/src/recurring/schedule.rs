use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};

use crate::ledger::types::{Frequency, RecurringTemplate};

const WEEKLY_INTERVAL_DAYS: u64 = 7;

/// Whether `template` should be materialized by a run at `as_of`.
///
/// Monthly templates fire on their day of the month, at most once per
/// calendar date. Weekly templates fire once at least a week has passed
/// since their last generation. Paused templates are never due.
pub fn is_due(template: &RecurringTemplate, as_of: NaiveDateTime) -> bool {
    if !template.is_active {
        tracing::debug!(template_id = %template.template_id, "not due: template is paused");
        return false;
    }

    let today = as_of.date();
    let last_run = template.last_generated_at.map(|value| value.date());
    let due = match template.period.frequency {
        Frequency::Monthly => {
            template.period.day_of_month == today.day() && last_run.is_none_or(|last| last < today)
        }
        Frequency::Weekly => last_run.is_none_or(|last| week_elapsed(last, today)),
    };

    tracing::debug!(
        template_id = %template.template_id,
        frequency = template.period.frequency.as_str(),
        day_of_month = template.period.day_of_month,
        last_generated_at = ?template.last_generated_at,
        %today,
        due,
        "evaluated due rule"
    );
    due
}

/// The first date on or after `from` on which `template` would be due.
///
/// `None` for paused templates and for monthly days no calendar month has.
pub fn next_due_date(template: &RecurringTemplate, from: NaiveDate) -> Option<NaiveDate> {
    if !template.is_active {
        return None;
    }

    let last_run = template.last_generated_at.map(|value| value.date());
    match template.period.frequency {
        Frequency::Weekly => match last_run {
            Some(last) => {
                let next = last.checked_add_days(Days::new(WEEKLY_INTERVAL_DAYS))?;
                Some(next.max(from))
            }
            None => Some(from),
        },
        Frequency::Monthly => {
            let earliest = match last_run {
                Some(last) if last >= from => last.checked_add_days(Days::new(1))?,
                _ => from,
            };
            let day = template.period.day_of_month;
            let first_of_month = earliest.with_day(1)?;
            // Any day in 1..=31 appears within the next two months.
            (0..=2)
                .filter_map(|offset| first_of_month.checked_add_months(Months::new(offset)))
                .filter_map(|month| month.with_day(day))
                .find(|candidate| *candidate >= earliest)
        }
    }
}

fn week_elapsed(last: NaiveDate, today: NaiveDate) -> bool {
    last.checked_add_days(Days::new(WEEKLY_INTERVAL_DAYS))
        .is_some_and(|next| next <= today)
}
