pub mod adapter;
pub mod manager;

pub use adapter::{AdapterError, DataAdapter, SelectQuery};
pub use manager::{Capability, PoolManager};
