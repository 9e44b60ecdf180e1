pub mod cli;
pub mod http_err;
pub mod mortgage;
pub mod server;
