use anyhow::Result;
use std::io::{Seek, SeekFrom, Write};
use tempfile::NamedTempFile;

/// Input table handle. Stdin ("-") and non-seekable files (process
/// substitution pipes) are copied to a temporary file so the loader can
/// reopen them by name.
pub struct CachedInput<'a> {
    original: &'a str,
    cached: Option<NamedTempFile>,
}

impl<'a> CachedInput<'a> {
    pub fn new(filename: &'a str) -> Result<CachedInput<'a>> {
        if filename == "-" {
            let mut cached = NamedTempFile::new()?;
            std::io::copy(&mut std::io::stdin().lock(), &mut cached)?;
            cached.flush()?;
            return Ok(CachedInput {
                original: filename,
                cached: Some(cached),
            });
        }

        let mut file = std::fs::File::open(filename)?;
        if file.seek(SeekFrom::Current(0)).is_ok() {
            Ok(CachedInput {
                original: filename,
                cached: None,
            })
        } else {
            let mut cached = NamedTempFile::new()?;
            std::io::copy(&mut file, &mut cached)?;
            cached.flush()?;
            Ok(CachedInput {
                original: filename,
                cached: Some(cached),
            })
        }
    }

    pub fn name(&'a self) -> &'a str {
        if let Some(ref file) = self.cached {
            file.path().to_str().unwrap()
        } else {
            self.original
        }
    }
}
