pub mod operation;
pub mod symmetric_key;
