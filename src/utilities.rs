use crate::infrastructure::FileSystem;
use std::{error::Error, path::Path};

/// Writes a file only if its contents differ and returns whether it did.
pub async fn write_file_if_changed(
    file_system: &(dyn FileSystem + Send + Sync),
    path: &Path,
    contents: &[u8],
) -> Result<bool, Box<dyn Error>> {
    let mut buffer = vec![];

    if file_system.read_file(path, &mut buffer).await.is_ok() && buffer == contents {
        return Ok(false);
    }

    if let Some(directory) = path.parent() {
        file_system.create_directory(directory).await?;
    }

    file_system.write_file(path, contents).await?;

    Ok(true)
}
