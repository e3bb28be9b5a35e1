
#[cfg(unix)]
mod lifecycle_tests;
#[cfg(unix)]
mod registration_tests;
