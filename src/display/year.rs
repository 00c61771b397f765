//! Financial year display formatting

use crate::models::FinancialYear;

/// Format the list of financial years, most recent first
pub fn format_year_list(years: &[FinancialYear], current: Option<i32>) -> String {
    if years.is_empty() {
        return "No financial years found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10}  {:<12}  {:<12}  {}\n",
        "Year", "Books Open", "Year End", "File"
    ));
    output.push_str(&format!(
        "{:-<10}  {:-<12}  {:-<12}  {:-<30}\n",
        "", "", "", ""
    ));

    for year in years {
        let marker = if current == Some(year.start_year) {
            " (current)"
        } else {
            ""
        };
        output.push_str(&format!(
            "{:<10}  {:<12}  {:<12}  {}{}\n",
            year.to_string(),
            year.books_start_date.to_string(),
            year.end_date().to_string(),
            year.file_path.display(),
            marker,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_year_list(&[], None), "No financial years found.");
    }

    #[test]
    fn test_list_with_current_marker() {
        let years = vec![FinancialYear::new(
            2024,
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            PathBuf::from("/data/biller-FY-2024.bcz"),
        )];

        let output = format_year_list(&years, Some(2024));
        assert!(output.contains("2024-2025"));
        assert!(output.contains("(current)"));
    }
}
