pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod list_books;
pub mod update_book;

pub use create_book::create_book;
pub use delete_book::delete_book;
pub use get_book::get_book;
pub use list_books::list_books;
pub use update_book::update_book;
