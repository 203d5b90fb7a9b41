pub mod get_torrent;
pub mod search;

pub use get_torrent::*;
pub use search::*;
