pub mod init;
pub mod place;
