pub mod aes_gcm;
