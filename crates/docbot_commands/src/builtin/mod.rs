//! The standard commands.

mod change;
mod document;
mod help;
mod roll;
mod show;

pub use change::Change;
pub use document::{AddDocument, ListDocuments, RemoveDocument};
pub use help::Help;
pub use roll::Roll;
pub use show::Show;
