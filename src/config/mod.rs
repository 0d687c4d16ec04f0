//! Configuration

pub mod settings;

pub use settings::{
    CandleTickCountSettings, CheckSettings, DatabaseSettings, NotificationSettings, Settings,
};
