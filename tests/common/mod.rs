#![allow(dead_code)]

pub mod fakes;
pub mod synthetic_image;

/// Route `log` output of the library through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
