pub mod add;
pub mod check;
pub mod completions;
pub mod list;
pub mod mv;
pub mod remove;
pub mod search;
pub mod stats;
pub mod venue;
