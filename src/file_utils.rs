use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: "{input}-{language}" next to the input file
    pub fn default_output_path<P: AsRef<Path>>(input_file: P, target_language: &str) -> PathBuf {
        let mut name = OsString::from(input_file.as_ref().as_os_str());
        name.push("-");
        name.push(target_language);
        PathBuf::from(name)
    }

    /// Open a file for buffered line reading
    pub fn open_reader<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open input file: {:?}", path.as_ref()))?;
        Ok(BufReader::new(file))
    }

    /// Create a temporary file in the directory of `output` so that it can be
    /// renamed over `output` once it is complete
    pub fn create_staging_file<P: AsRef<Path>>(output: P) -> Result<NamedTempFile> {
        let output = output.as_ref();
        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::ensure_dir(&dir)?;

        tempfile::Builder::new()
            .prefix(".xml-translate-")
            .tempfile_in(&dir)
            .with_context(|| format!("Failed to create temporary file in {:?}", dir))
    }

    /// Give the staging file the permissions of `source`, so the final output
    /// is as readable as the file it was translated from
    pub fn copy_permissions<P: AsRef<Path>>(staging: &NamedTempFile, source: P) -> Result<()> {
        let source = source.as_ref();
        let permissions = fs::metadata(source)
            .with_context(|| format!("Failed to read permissions of {:?}", source))?
            .permissions();
        staging.as_file().set_permissions(permissions)
            .with_context(|| format!("Failed to set permissions on {:?}", staging.path()))?;
        Ok(())
    }

    /// Move a finished staging file to its final location, replacing any
    /// existing file
    pub fn persist<P: AsRef<Path>>(staging: NamedTempFile, output: P) -> Result<()> {
        let output = output.as_ref();
        staging.persist(output)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to write output file: {:?}", output))?;
        Ok(())
    }
}
