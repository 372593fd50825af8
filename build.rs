//! Build script for the AI radio relay.
//!
//! Copies the `.env.example` template into the user's local data directory so
//! the relay finds a configuration example next to the `.env` it falls back to
//! when no `.env` exists in the working directory.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root to `<data_local_dir>/airadio/`.
///
/// # Destination
///
/// - Linux: `~/.local/share/airadio/.env.example`
/// - macOS: `~/Library/Application Support/airadio/.env.example`
/// - Windows: `%LOCALAPPDATA%/airadio/.env.example`
///
/// A missing template only produces a cargo warning; directory or write
/// failures abort the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("airadio");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
