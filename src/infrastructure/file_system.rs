use async_trait::async_trait;
use std::{
    error::Error,
    fmt::{self, Debug, Display, Formatter},
    io,
    path::Path,
};
use tokio::{
    fs::{self, File},
    io::AsyncReadExt,
};

#[async_trait]
pub trait FileSystem: Debug {
    async fn read_file(&self, path: &Path, buffer: &mut Vec<u8>) -> Result<(), Box<dyn Error>>;
    async fn read_file_to_string(
        &self,
        path: &Path,
        buffer: &mut String,
    ) -> Result<(), Box<dyn Error>>;
    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), Box<dyn Error>>;
    async fn create_directory(&self, path: &Path) -> Result<(), Box<dyn Error>>;
}

#[derive(Debug, Default)]
pub struct OsFileSystem {}

impl OsFileSystem {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileSystem for OsFileSystem {
    async fn read_file(&self, path: &Path, buffer: &mut Vec<u8>) -> Result<(), Box<dyn Error>> {
        File::open(path)
            .await
            .map_err(|error| OsFileSystemError::new(error, path))?
            .read_to_end(buffer)
            .await
            .map_err(|error| OsFileSystemError::new(error, path))?;

        Ok(())
    }

    async fn read_file_to_string(
        &self,
        path: &Path,
        buffer: &mut String,
    ) -> Result<(), Box<dyn Error>> {
        File::open(path)
            .await
            .map_err(|error| OsFileSystemError::new(error, path))?
            .read_to_string(buffer)
            .await
            .map_err(|error| OsFileSystemError::new(error, path))?;

        Ok(())
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), Box<dyn Error>> {
        fs::write(path, contents)
            .await
            .map_err(|error| OsFileSystemError::new(error, path))?;

        Ok(())
    }

    async fn create_directory(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        fs::create_dir_all(path)
            .await
            .map_err(|error| OsFileSystemError::new(error, path))?;

        Ok(())
    }
}

#[derive(Debug)]
pub struct OsFileSystemError {
    error: io::Error,
    path: String,
}

impl OsFileSystemError {
    pub fn new(error: io::Error, path: &Path) -> Self {
        Self {
            error,
            path: path.display().to_string(),
        }
    }
}

impl Error for OsFileSystemError {}

impl Display for OsFileSystemError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{}: {}", &self.error, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn write_and_read_file() {
        let directory = TempDir::new().unwrap();
        let path = directory.path().join("foo/bar.txt");
        let file_system = OsFileSystem::new();

        file_system
            .create_directory(path.parent().unwrap())
            .await
            .unwrap();
        file_system.write_file(&path, b"baz").await.unwrap();

        let mut string = String::new();

        file_system
            .read_file_to_string(&path, &mut string)
            .await
            .unwrap();

        assert_eq!(string, "baz");
    }

    #[tokio::test]
    async fn report_path_of_missing_file() {
        let directory = TempDir::new().unwrap();
        let path = directory.path().join("foo");

        assert!(
            OsFileSystem::new()
                .read_file(&path, &mut vec![])
                .await
                .unwrap_err()
                .to_string()
                .ends_with(&path.display().to_string())
        );
    }
}
