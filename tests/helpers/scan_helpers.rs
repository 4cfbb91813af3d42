//! Scan helpers: run the recognizer over a snippet with the cursor at its end.

use cxxsense::{ErrorCode, ScanOptions, ScanResult, TextSize, scan};

/// Scan `source` with the cursor at the end of the text.
pub fn scan_to_end(source: &str, options: ScanOptions) -> ScanResult {
    match scan(source, TextSize::of(source), &options) {
        Ok(result) => result,
        Err(err) => panic!("scan of {:?} failed: {}", source, err),
    }
}

/// Scan with every feature enabled.
pub fn scan_cpp(source: &str) -> ScanResult {
    scan_to_end(source, ScanOptions::all())
}

/// Scan with every feature disabled.
pub fn scan_c(source: &str) -> ScanResult {
    scan_to_end(source, ScanOptions::default())
}

/// Render the result node of a scan, panicking with the full dump if absent.
pub fn render(result: &ScanResult) -> String {
    match result.render() {
        Some(rendered) => rendered,
        None => panic!("scan produced no result:\n{}", result),
    }
}

/// Assert the scan reports a diagnostic with `code`.
pub fn assert_reported(result: &ScanResult, code: ErrorCode) {
    assert!(
        result.diagnostics().iter().any(|d| d.code == code),
        "Expected {} among diagnostics: {:?}",
        code.as_str(),
        result
            .diagnostics()
            .iter()
            .map(|d| d.code.as_str())
            .collect::<Vec<_>>()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_to_end_places_cursor_after_text() {
        let result = scan_c("abc");
        assert_eq!(result.last_token().map(|t| t.text.as_str()), Some("abc"));
    }
}
