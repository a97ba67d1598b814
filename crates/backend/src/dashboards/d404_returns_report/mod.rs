pub mod layout;
pub mod pdf;

use chrono::NaiveDate;

/// Имя файла отчета: returns-report-YYYY-MM-DD.pdf
pub fn report_filename(date: NaiveDate) -> String {
    format!("returns-report-{}.pdf", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_filename() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(report_filename(date), "returns-report-2026-03-07.pdf");
    }
}
