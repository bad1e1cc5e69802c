use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SaveFile<G> {
    version: u32,
    game: G,
}

/// Write a game in progress to `path` as JSON. Overwrites any previous
/// save; parent directories are created as needed.
pub fn save_game<G, P>(path: P, game: &G) -> Result<(), String>
where
    G: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("creating {}: {e}", parent.display()))?;
        }
    }
    let file = SaveFile {
        version: FORMAT_VERSION,
        game,
    };
    let json = serde_json::to_string_pretty(&file).map_err(|e| format!("encoding save: {e}"))?;
    fs::write(path, json).map_err(|e| format!("writing {}: {e}", path.display()))
}

/// Read a game back from a file written by [`save_game`].
pub fn load_game<G, P>(path: P) -> Result<G, String>
where
    G: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| format!("reading {}: {e}", path.display()))?;
    let file: SaveFile<G> =
        serde_json::from_str(&json).map_err(|e| format!("decoding {}: {e}", path.display()))?;
    if file.version != FORMAT_VERSION {
        return Err(format!(
            "unsupported save version {} (expected {FORMAT_VERSION})",
            file.version
        ));
    }
    Ok(file.game)
}
