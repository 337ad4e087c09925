use crate::core::Storage;
use crate::utils::error::{BoxLayoutError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncWrite, AsyncWriteExt};

const MAX_NAME_ATTEMPTS: usize = 10_000;

/// Download directory. Existing files are never overwritten: a taken name
/// becomes `name (1).ext`, `name (2).ext`, and so on.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

/// `box_layout.svg` with n=2 gives `box_layout (2).svg`.
pub fn numbered_name(name: &str, n: usize) -> String {
    if n == 0 {
        return name.to_string();
    }
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{} ({}){}", &name[..dot], n, &name[dot..]),
        _ => format!("{} ({})", name, n),
    }
}

/// Writes `data` to a freshly created file. On failure the partial file at
/// `path` is removed before the error is returned.
async fn write_or_discard<W>(mut writer: W, path: &Path, data: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin + Send,
{
    let written = async {
        writer.write_all(data).await?;
        writer.flush().await
    }
    .await;

    if let Err(e) = written {
        drop(writer);
        if let Err(remove_err) = fs::remove_file(path).await {
            tracing::warn!(
                "Could not remove partial download {}: {}",
                path.display(),
                remove_err
            );
        }
        return Err(e.into());
    }
    Ok(())
}

impl Storage for LocalStorage {
    async fn save_download(&self, suggested_name: &str, data: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_path).await?;

        for n in 0..MAX_NAME_ATTEMPTS {
            let full_path = self.base_path.join(numbered_name(suggested_name, n));
            let file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&full_path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };

            write_or_discard(file, &full_path, data).await?;
            return Ok(full_path);
        }

        Err(BoxLayoutError::Io(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!(
                "no free name for '{}' in {}",
                suggested_name,
                self.base_path.display()
            ),
        )))
    }
}
