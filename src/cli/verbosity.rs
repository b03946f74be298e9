//! Verbosity flag to log filter mapping

/// Map the `-v` count to an `EnvFilter` directive
pub fn get_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        2 => "debug,tutorial_forge=trace",
        // -vvv also traces dependencies such as tera
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::EnvFilter;

    #[test]
    fn test_get_log_level() {
        assert_eq!(get_log_level(0), "info");
        assert_eq!(get_log_level(1), "debug");
        assert_eq!(get_log_level(2), "debug,tutorial_forge=trace");
        assert_eq!(get_log_level(3), "trace");
        assert_eq!(get_log_level(9), "trace");
    }

    #[test]
    fn test_every_level_is_a_valid_filter() {
        for verbose in 0..=3 {
            assert!(EnvFilter::try_new(get_log_level(verbose)).is_ok(), "{verbose}");
        }
    }
}
