//! profilefetch: render a neofetch-style GitHub profile README.
//!
//! Account statistics come from the GitHub REST and GraphQL APIs, with a
//! per-repository lines-of-code cache so only repositories with new commits
//! have their history walked again. The stats are laid out in a fixed-width
//! box next to ASCII art and written out as a `<pre>` block.

pub mod age;
pub mod cache;
pub mod cli;
pub mod compose;
pub mod config;
pub mod github;
pub mod layout;
pub mod loc;
pub mod logging;
pub mod readme;
pub mod stats;

#[cfg(test)]
mod test_support;
