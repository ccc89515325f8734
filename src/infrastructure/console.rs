use async_trait::async_trait;
use std::error::Error;
use tokio::io::{AsyncWriteExt, Stderr, Stdout, stderr, stdout};

/// An output of printed labels, commands and logs.
#[async_trait]
pub trait Console {
    async fn write_stdout(&mut self, buffer: &[u8]) -> Result<(), Box<dyn Error>>;
    async fn write_stderr(&mut self, buffer: &[u8]) -> Result<(), Box<dyn Error>>;
}

#[derive(Debug)]
pub struct OsConsole {
    stdout: Stdout,
    stderr: Stderr,
}

impl OsConsole {
    pub fn new() -> Self {
        Self {
            stdout: stdout(),
            stderr: stderr(),
        }
    }
}

#[async_trait]
impl Console for OsConsole {
    // Outputs are flushed so that printed results precede an exit.
    async fn write_stdout(&mut self, buffer: &[u8]) -> Result<(), Box<dyn Error>> {
        self.stdout.write_all(buffer).await?;
        self.stdout.flush().await?;

        Ok(())
    }

    async fn write_stderr(&mut self, buffer: &[u8]) -> Result<(), Box<dyn Error>> {
        self.stderr.write_all(buffer).await?;
        self.stderr.flush().await?;

        Ok(())
    }
}

/// A console keeping its outputs in memory.
#[derive(Debug, Default)]
pub struct MemoryConsole {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    pub fn stderr(&self) -> &[u8] {
        &self.stderr
    }
}

#[async_trait]
impl Console for MemoryConsole {
    async fn write_stdout(&mut self, buffer: &[u8]) -> Result<(), Box<dyn Error>> {
        self.stdout.extend_from_slice(buffer);

        Ok(())
    }

    async fn write_stderr(&mut self, buffer: &[u8]) -> Result<(), Box<dyn Error>> {
        self.stderr.extend_from_slice(buffer);

        Ok(())
    }
}
