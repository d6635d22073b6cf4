mod common;
mod envelope_sanitizer;
mod store_expiration;
