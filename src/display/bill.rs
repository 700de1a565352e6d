//! Bill and quick expense display formatting

use chrono::{DateTime, Utc};

use super::report::{separator, truncate};
use crate::config::Settings;
use crate::models::{Bill, QuickExpenseSetting};
use crate::reports::BillSchedule;

fn format_bill_row(bill: &Bill, settings: &Settings, now: DateTime<Utc>) -> String {
    let status = if bill.paid {
        "paid"
    } else if bill.is_overdue(now) {
        "OVERDUE"
    } else {
        "due"
    };

    format!(
        "{:<10} {:<24} {:>12}  {:<8} {}",
        bill.due_date.format(&settings.date_format),
        truncate(&bill.name, 24),
        bill.amount.format_with_symbol(&settings.currency_symbol),
        status,
        bill.id
    )
}

/// Upcoming bills first, then paid ones
pub fn format_bill_schedule(schedule: &BillSchedule, settings: &Settings, now: DateTime<Utc>) -> String {
    let mut output = String::new();

    output.push_str("Upcoming Bills\n");
    output.push_str(&separator(72));
    output.push('\n');
    if schedule.upcoming.is_empty() {
        output.push_str("No upcoming bills.\n");
    }
    for bill in &schedule.upcoming {
        output.push_str(&format_bill_row(bill, settings, now));
        output.push('\n');
    }

    output.push_str("\nPaid Bills\n");
    output.push_str(&separator(72));
    output.push('\n');
    if schedule.paid.is_empty() {
        output.push_str("No paid bills.\n");
    }
    for bill in &schedule.paid {
        output.push_str(&format_bill_row(bill, settings, now));
        output.push('\n');
    }

    output
}

pub fn format_quick_expenses(quick_expenses: &[QuickExpenseSetting], settings: &Settings) -> String {
    if quick_expenses.is_empty() {
        return "No quick expenses configured.\n".to_string();
    }

    let mut output = String::new();
    for quick in quick_expenses {
        output.push_str(&format!(
            "{:<10} {:<16} {:>10}  {:<14} {}\n",
            format!("[{}]", quick.icon),
            quick.name,
            quick.amount.format_with_symbol(&settings.currency_symbol),
            quick.category,
            quick.id
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_quick_expenses, Money, NewBill};
    use crate::reports::bill_schedule;
    use chrono::TimeZone;

    #[test]
    fn test_bill_schedule_sections() {
        let now = Utc.with_ymd_and_hms(2025, 4, 10, 0, 0, 0).unwrap();
        let mut paid = Bill::from_input(NewBill::new(
            "Power",
            Money::from_units(90),
            Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap(),
        ));
        paid.paid = true;
        let overdue = Bill::from_input(NewBill::new(
            "Phone",
            Money::from_units(25),
            Utc.with_ymd_and_hms(2025, 4, 5, 0, 0, 0).unwrap(),
        ));

        let output = format_bill_schedule(&bill_schedule(&[paid, overdue]), &Settings::default(), now);
        let (upcoming, paid_section) = output.split_once("Paid Bills").unwrap();
        assert!(upcoming.contains("Phone"));
        assert!(upcoming.contains("OVERDUE"));
        assert!(paid_section.contains("Power"));
    }

    #[test]
    fn test_empty_schedule() {
        let output = format_bill_schedule(&BillSchedule::default(), &Settings::default(), Utc::now());
        assert!(output.contains("No upcoming bills."));
        assert!(output.contains("No paid bills."));
    }

    #[test]
    fn test_quick_expenses() {
        let output = format_quick_expenses(&default_quick_expenses(), &Settings::default());
        assert!(output.contains("Bus Fare"));
        assert!(output.contains("₹150.00"));
        assert!(format_quick_expenses(&[], &Settings::default()).contains("No quick expenses"));
    }
}
