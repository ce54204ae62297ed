mod message_store_tests;
mod session_store_tests;
