pub use bills::{Bill, OrderDirection, OrderField};
pub use error::EngineError;
pub use finances::FinancialEntry;
pub use lock::UpdateLock;
pub use ops::{BillQuery, Engine, EngineBuilder, RefreshOutcome, RefreshSettings};

mod attributes;
mod bills;
mod error;
mod finances;
mod lock;
mod ops;

type ResultEngine<T> = Result<T, EngineError>;
