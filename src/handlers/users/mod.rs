pub mod create;
pub mod delete;
pub mod page;
pub mod read;
pub mod search;
pub mod update;

pub use create::{create, create_bulk};
pub use delete::{delete_bulk, delete_one};
pub use page::page;
pub use read::{get_one, list};
pub use search::search;
pub use update::{update_bulk, update_one};
