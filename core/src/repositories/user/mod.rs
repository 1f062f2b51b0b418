pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
mod memory;


pub use r#trait::UserRepository;
pub use memory::InMemoryUserRepository;
