//! Domain types for TickerDash

pub mod bar;
pub mod range;
pub mod symbol;

pub use bar::Bar;
pub use range::HistoryRange;
pub use symbol::{ResolvedSymbol, SymbolError};
