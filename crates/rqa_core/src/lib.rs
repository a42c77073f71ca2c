pub mod config;
pub mod error;
pub mod eval;
pub mod models;
pub mod stream;

#[cfg(test)]
mod tests {
    use super::config::Delimiters;
    use super::error::AppError;

    #[test]
    fn app_error_is_structured() {
        let err = AppError::new("CONFIG_TEST", "config failed").with_retryable(false);
        assert_eq!(err.code, "CONFIG_TEST");
        assert_eq!(err.message, "config failed");
        assert!(!err.retryable);
        assert_eq!(err.to_string(), "[CONFIG_TEST] config failed");
    }

    #[test]
    fn app_error_display_includes_details() {
        let err = AppError::new("IO_FAILED", "read failed").with_details("path=a.txt");
        assert_eq!(err.to_string(), "[IO_FAILED] read failed (path=a.txt)");
    }

    #[test]
    fn io_errors_name_the_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = AppError::io("Failed to read input file", "answer.txt", &source);
        assert_eq!(err.code, "IO_FAILED");
        assert_eq!(err.details.as_deref(), Some("path=answer.txt; err=gone"));
        assert!(!err.retryable);
    }

    #[test]
    fn delimiters_reject_degenerate_pairs() {
        assert!(Delimiters::new('[', ']').is_ok());
        assert!(Delimiters::new('{', '}').is_ok());
        assert_eq!(
            Delimiters::new('[', '[').expect_err("same").code,
            "CONFIG_INVALID"
        );
        assert!(Delimiters::new('a', ']').is_err());
        assert!(Delimiters::new('[', ' ').is_err());
    }
}
