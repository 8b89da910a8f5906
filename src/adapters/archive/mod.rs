pub mod tar_gz;
