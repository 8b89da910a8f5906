pub mod archiver;
pub mod cipher;
pub mod key_store;
