//! Firm details display formatting

use crate::models::FirmDetails;

/// Format the firm details block
pub fn format_firm_details(details: &FirmDetails) -> String {
    let mut output = String::new();
    output.push_str(&format!("Firm:    {}\n", details.name));
    if !details.address.is_empty() {
        output.push_str(&format!("Address: {}\n", details.address));
    }
    if !details.phone_numbers.is_empty() {
        output.push_str(&format!("Phone:   {}\n", details.phone_numbers));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_empty_fields() {
        let output = format_firm_details(&FirmDetails::new("Test Firm", "", "555-0100"));
        assert!(output.contains("Test Firm"));
        assert!(!output.contains("Address:"));
        assert!(output.contains("555-0100"));
    }
}
