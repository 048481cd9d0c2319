pub mod logger;

pub use self::logger::setup_logger;
