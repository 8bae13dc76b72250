pub mod admin;
pub mod launch;
pub mod quote;
pub mod settings;
pub mod stats;
pub mod utils;
