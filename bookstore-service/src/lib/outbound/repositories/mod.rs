pub mod book;
pub mod user;

pub use book::SqliteBookRepository;
pub use user::SqliteUserRepository;
