//! Concrete checks
//!
//! Every check here is registered in [`builtin_registry`]; the framework
//! dispatcher never needs to change when a check is added.

pub mod candle_ticks;

pub use candle_ticks::CandleTickCountCheck;

use crate::checker::CheckerRegistry;

/// Registry of all shipped checks
pub fn builtin_registry() -> CheckerRegistry {
    let mut registry = CheckerRegistry::new();
    registry.register(candle_ticks::CHECK_NAME, CandleTickCountCheck::factory);
    registry
}
