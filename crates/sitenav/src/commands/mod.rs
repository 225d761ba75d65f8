pub mod generate;
pub mod init;
pub mod script;
pub mod serve;
