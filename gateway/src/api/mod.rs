pub mod daily;
pub mod f1_proxy;
pub mod otf_chat;
pub mod psychology;
pub mod spotify;
pub mod utils;
