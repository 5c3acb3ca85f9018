use std::io;
use std::path::{Component, Path, PathBuf};

pub trait FileStore: Send + Sync {
    /// Writes `contents` under `name`, replacing any file already there.
    fn write(&self, name: &str, contents: &[u8]) -> io::Result<()>;

    fn read(&self, name: &str) -> io::Result<Vec<u8>>;
}

/// Whether `name` is a single, ordinary path component that cannot escape
/// the directory it is joined onto.
pub fn is_plain_filename(name: &str) -> bool {
    let mut components = Path::new(name).components();

    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(component)), None) if component == name
    )
}

/// A [`FileStore`] rooted at a directory on local disk.
#[derive(Debug, Clone)]
pub struct DiskFileStore {
    root: PathBuf,
}

impl DiskFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Like [`DiskFileStore::new`], creating the directory if needed.
    pub fn create(root: impl Into<PathBuf>) -> io::Result<Self> {
        let store = Self::new(root);
        std::fs::create_dir_all(&store.root)?;

        Ok(store)
    }

    fn resolve(&self, name: &str) -> io::Result<PathBuf> {
        if !is_plain_filename(name) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("refusing to use {name:?} as a file name"),
            ));
        }

        Ok(self.root.join(name))
    }
}

impl FileStore for DiskFileStore {
    fn write(&self, name: &str, contents: &[u8]) -> io::Result<()> {
        std::fs::write(self.resolve(name)?, contents)
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.resolve(name)?)
    }
}
