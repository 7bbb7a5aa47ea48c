//! Small helpers shared by the scanner, renderer and CLI.

mod encoding;
mod hashing;
mod paths;

pub use encoding::{detect_encoding, is_binary_file, read_file_safe, BINARY_SAMPLE_SIZE};
pub use hashing::sha256_hex;
pub use paths::{format_file_size, format_megabytes, normalize_path, relative_path_string};
