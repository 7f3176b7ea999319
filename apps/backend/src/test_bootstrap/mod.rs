pub mod capture;
pub mod logging;
