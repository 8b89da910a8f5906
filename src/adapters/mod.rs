pub mod archive;
pub mod cipher;
pub mod key_stores;
