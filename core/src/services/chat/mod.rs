//! Chat service module: two-person chats and their messages

mod service;


pub use service::ChatService;
