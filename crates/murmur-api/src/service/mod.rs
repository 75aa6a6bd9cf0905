pub mod account;
pub mod message;

#[cfg(test)]
mod fake;

pub use account::AccountService;
pub use message::MessageService;
