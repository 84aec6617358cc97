pub mod broadcast;
pub mod decode;
pub mod init;
pub mod name;
pub mod namespace;
pub mod query;
pub mod utils;
