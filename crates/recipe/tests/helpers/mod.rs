use std::path::Path;

use mealvault_recipe::Vault;
use temp_dir::TempDir;

pub fn setup_vault(dir: &TempDir) -> Vault {
    Vault::new(dir.path(), "Recipes")
}

pub async fn write_note(root: &Path, relative: &str, content: &str) -> anyhow::Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await?;

    Ok(())
}
