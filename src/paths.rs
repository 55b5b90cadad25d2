//! Path resolution for blog data files.
//!
//! Provides XDG-compliant path resolution.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "blog";

/// Get XDG-compliant data directory for the blog.
///
/// `$XDG_DATA_HOME/blog`, else `$HOME/.local/share/blog`, else `./blog`
/// when neither variable is set.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|home| PathBuf::from(home).join(".local/share")))
        .unwrap_or_else(|_| PathBuf::from("."));

    data_home.join(APP_DIR)
}

/// Get database file path (data_dir/blog.db).
pub fn get_db_path() -> PathBuf {
    get_data_dir().join("blog.db")
}
