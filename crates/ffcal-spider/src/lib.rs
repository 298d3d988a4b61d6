pub mod config;
pub mod econ;
pub mod error;
pub mod fs;

/// Shortcut for required API elements.
pub(crate) mod http {
    pub(crate) use reqwest::Client as HttpClient;
}

pub use config::CalendarConfig;
pub use error::FetchError;

/// Format the time elapsed since `time`, for trace output.
pub fn time_elapsed(time: std::time::Instant) -> String {
    format!(
        "\x1b[38;5;208melapsed time: {} ms\x1b[0m",
        time.elapsed().as_millis()
    )
}
