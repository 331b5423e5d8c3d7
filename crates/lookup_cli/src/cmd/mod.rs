/// Member table command.
pub mod members;
/// Root projection command.
pub mod object;
/// Full decomposition command.
pub mod show;
/// Sample type listing command.
pub mod types;

pub(crate) mod render;
pub(crate) mod util;
