//! Build script for the moodrec backend.
//!
//! Copies the `.env.example` template into the user's local data directory,
//! next to the `.env` file the binary reads at start-up:
//! - Linux: `~/.local/share/moodrec/.env.example`
//! - macOS: `~/Library/Application Support/moodrec/.env.example`
//! - Windows: `%LOCALAPPDATA%/moodrec/.env.example`
//!
//! Failures only produce cargo warnings; the template is a convenience.

use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=.env.example");

    if let Err(e) = copy_env_example() {
        println!("cargo:warning=could not install .env.example: {}", e);
    }
}

fn copy_env_example() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");
    if !env_example_path.is_file() {
        return Err(format!("not found at {}", env_example_path.display()).into());
    }

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("moodrec");
    fs::create_dir_all(&out_dir)?;
    fs::copy(&env_example_path, out_dir.join(".env.example"))?;
    Ok(())
}
