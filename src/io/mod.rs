use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::read::GzDecoder;

pub mod csv_writer;
pub mod json_writer;
pub mod summary;
pub mod table;

pub(crate) fn open_maybe_gz(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        let decoder = GzDecoder::new(file);
        Ok(Box::new(decoder))
    } else {
        Ok(Box::new(file))
    }
}

#[derive(Debug)]
pub struct Staged {
    tmp: PathBuf,
    dest: PathBuf,
}

impl Staged {
    pub fn dest(&self) -> &Path {
        &self.dest
    }

    pub fn discard(self) {
        let _ = fs::remove_file(&self.tmp);
    }
}

// Content goes to `<path>.tmp`; nothing appears at `path` until `commit_all`.
pub fn stage_file<F>(path: &Path, write: F) -> Result<Staged>
where
    F: FnOnce(File) -> Result<()>,
{
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);
    let file =
        File::create(&tmp).with_context(|| format!("failed to create {}", tmp.display()))?;
    if let Err(err) = write(file) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    Ok(Staged {
        tmp,
        dest: path.to_path_buf(),
    })
}

// All-or-nothing: on any failed rename, files already moved are removed and
// the remaining temporaries are discarded.
pub fn commit_all(staged: Vec<Staged>) -> Result<()> {
    let mut committed: Vec<PathBuf> = Vec::with_capacity(staged.len());
    let mut pending = staged.into_iter();
    while let Some(file) = pending.next() {
        if let Err(err) = fs::rename(&file.tmp, &file.dest) {
            let _ = fs::remove_file(&file.tmp);
            for rest in pending {
                rest.discard();
            }
            for path in &committed {
                let _ = fs::remove_file(path);
            }
            return Err(err)
                .with_context(|| format!("failed to move {} into place", file.dest.display()));
        }
        committed.push(file.dest);
    }
    Ok(())
}
