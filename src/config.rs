
/// How the contact form delivers its payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SubmissionMode {
    /// Fake round trip with a random failure, for local work without a backend.
    Simulated,
    /// POST to `get_contact_endpoint()`.
    Http,
}

#[cfg(debug_assertions)]
pub fn get_contact_endpoint() -> &'static str {
    "http://localhost:3001/api/contact"  // Development URL when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_contact_endpoint() -> &'static str {
    "/api/contact"  // Production URL
}

#[cfg(debug_assertions)]
pub fn get_submission_mode() -> SubmissionMode {
    SubmissionMode::Simulated
}

#[cfg(not(debug_assertions))]
pub fn get_submission_mode() -> SubmissionMode {
    SubmissionMode::Http
}

// Contact form
pub const STATUS_AUTO_DISMISS_MS: u32 = 5_000;
pub const SIMULATED_DELAY_MS: u32 = 2_000;
pub const SIMULATED_FAILURE_RATE: f64 = 0.1;
pub const SUBMISSION_TIMEOUT_MS: u32 = 15_000;

// Navigation
pub const NAV_SCROLL_THRESHOLD: f64 = 100.0;
pub const HEADER_OFFSET: f64 = 80.0;

// Animations
pub const LETTER_DELAY_MS: u32 = 600;
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const LAZY_IMAGE_THRESHOLD: f64 = 0.01;
pub const LAZY_IMAGE_ROOT_MARGIN: &str = "50px 0px";

pub const PRELOAD_FONTS: [&str; 2] = [
    "https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@300;400;500;600;700&display=swap",
    "https://fonts.googleapis.com/css2?family=Satoshi:wght@400;500;600;700;800&display=swap",
];
pub const SERVICE_WORKER_PATH: &str = "/sw.js";
