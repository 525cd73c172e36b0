pub mod messages;
pub mod poller;
