#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:5200"  // Flask dev server when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Production URL (same origin)
}
