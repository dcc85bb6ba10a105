mod not_found;
mod thread;

pub use not_found::NotFoundPage;
pub use thread::ThreadPage;
