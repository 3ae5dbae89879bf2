//! One handler per task kind, grouped by task category.

pub(crate) mod balances;
pub(crate) mod chain;
pub(crate) mod nominating;
pub(crate) mod pools;
