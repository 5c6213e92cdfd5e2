//! The filesystem tree visible to the wrapped library.
//!
//! The artifact has no ambient filesystem of its own; every path the
//! wrapped parser opens is routed through five host imports that end
//! up here. The tree is an in-memory overlay of directories and files
//! plus host-directory mounts; a mount makes the host directory's
//! contents readable under a guest path without copying them in ahead
//! of time. On a path collision the in-memory overlay wins.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::HostError;

#[derive(Debug)]
enum Node {
    Dir(BTreeMap<String, Node>),
    File(Vec<u8>),
}

#[derive(Debug)]
struct OpenFile {
    data: Vec<u8>,
}

/// The guest-visible filesystem.
#[derive(Debug)]
pub struct VirtualFs {
    root: Node,
    mounts: BTreeMap<Vec<String>, PathBuf>,
    fds: BTreeMap<i32, OpenFile>,
    next_fd: i32,
}

impl Default for VirtualFs {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualFs {
    pub fn new() -> Self {
        Self {
            root: Node::Dir(BTreeMap::new()),
            mounts: BTreeMap::new(),
            fds: BTreeMap::new(),
            next_fd: 3,
        }
    }

    /// Normalizes an absolute guest path into its segments.
    ///
    /// `.` segments are dropped and `..` pops; popping past the root
    /// is an error rather than a silent clamp.
    fn segments(path: &str) -> Result<Vec<String>, HostError> {
        if !path.starts_with('/') {
            return Err(HostError::FsInvalidPath(path.to_string()));
        }
        let mut out: Vec<String> = Vec::new();
        for part in path.split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    if out.pop().is_none() {
                        return Err(HostError::FsInvalidPath(path.to_string()));
                    }
                }
                other => out.push(other.to_string()),
            }
        }
        Ok(out)
    }

    fn display(segments: &[String]) -> PathBuf {
        let mut p = PathBuf::from("/");
        for s in segments {
            p.push(s);
        }
        p
    }

    /// Creates a directory and any missing parents.
    pub fn mkdir_p(&mut self, path: &str) -> Result<(), HostError> {
        let segments = Self::segments(path)?;
        let mut node = &mut self.root;
        for (i, segment) in segments.iter().enumerate() {
            let Node::Dir(children) = node else {
                return Err(HostError::FsNotADirectory(Self::display(&segments[..i])));
            };
            node = children
                .entry(segment.clone())
                .or_insert_with(|| Node::Dir(BTreeMap::new()));
        }
        match node {
            Node::Dir(_) => Ok(()),
            Node::File(_) => Err(HostError::FsNotADirectory(Self::display(&segments))),
        }
    }

    /// Writes a file into the overlay, creating parent directories.
    pub fn write_file(&mut self, path: &str, contents: impl Into<Vec<u8>>) -> Result<(), HostError> {
        let segments = Self::segments(path)?;
        let Some((name, dirs)) = segments.split_last() else {
            return Err(HostError::FsIsADirectory(PathBuf::from("/")));
        };
        self.mkdir_p(&Self::display(dirs).to_string_lossy())?;
        let mut node = &mut self.root;
        for segment in dirs {
            let Node::Dir(children) = node else { unreachable!() };
            node = children.get_mut(segment).expect("created above");
        }
        let Node::Dir(children) = node else { unreachable!() };
        if let Some(Node::Dir(_)) = children.get(name) {
            return Err(HostError::FsIsADirectory(Self::display(&segments)));
        }
        children.insert(name.clone(), Node::File(contents.into()));
        Ok(())
    }

    /// Makes the contents of `host_dir` readable under `guest_path`.
    pub fn mount(
        &mut self,
        guest_path: &str,
        host_dir: impl AsRef<Path>,
    ) -> Result<(), HostError> {
        let host_dir = host_dir.as_ref();
        if !host_dir.is_dir() {
            return Err(HostError::FsNotADirectory(host_dir.to_path_buf()));
        }
        let segments = Self::segments(guest_path)?;
        if self.mounts.contains_key(&segments) {
            return Err(HostError::FsAlreadyMounted(Self::display(&segments)));
        }
        self.mkdir_p(guest_path)?;
        self.mounts.insert(segments, host_dir.to_path_buf());
        Ok(())
    }

    /// Removes a mount point. The overlay directory stays in place and
    /// already-open descriptors keep their contents.
    pub fn unmount(&mut self, guest_path: &str) -> Result<(), HostError> {
        let segments = Self::segments(guest_path)?;
        self.mounts
            .remove(&segments)
            .map(|_| ())
            .ok_or_else(|| HostError::FsNotFound(Self::display(&segments)))
    }

    fn overlay_node(&self, segments: &[String]) -> Option<&Node> {
        let mut node = &self.root;
        for segment in segments {
            match node {
                Node::Dir(children) => node = children.get(segment)?,
                Node::File(_) => return None,
            }
        }
        Some(node)
    }

    /// Maps a guest path to a host path through the longest matching
    /// mount, if any.
    fn host_path(&self, segments: &[String]) -> Option<PathBuf> {
        self.mounts
            .iter()
            .filter(|(mount, _)| segments.starts_with(mount))
            .max_by_key(|(mount, _)| mount.len())
            .map(|(mount, host)| {
                let mut path = host.clone();
                for segment in &segments[mount.len()..] {
                    path.push(segment);
                }
                path
            })
    }

    pub fn exists(&self, path: &str) -> bool {
        let Ok(segments) = Self::segments(path) else {
            return false;
        };
        if self.overlay_node(&segments).is_some() {
            return true;
        }
        self.host_path(&segments).is_some_and(|p| p.exists())
    }

    /// Reads a whole file, overlay first, then through the mounts.
    pub fn read_file(&self, path: &str) -> Result<Vec<u8>, HostError> {
        let segments = Self::segments(path)?;
        match self.overlay_node(&segments) {
            Some(Node::File(data)) => return Ok(data.clone()),
            Some(Node::Dir(_)) => {
                // An overlay dir may shadow a mounted file of the same
                // name only if nothing host-side resolves.
                if self.host_path(&segments).is_none() {
                    return Err(HostError::FsIsADirectory(Self::display(&segments)));
                }
            }
            None => {}
        }
        let host = self
            .host_path(&segments)
            .ok_or_else(|| HostError::FsNotFound(Self::display(&segments)))?;
        if host.is_dir() {
            return Err(HostError::FsIsADirectory(Self::display(&segments)));
        }
        fs::read(&host).map_err(|_| HostError::FsNotFound(Self::display(&segments)))
    }

    /// File size in bytes without keeping the contents.
    pub fn metadata(&self, path: &str) -> Result<u64, HostError> {
        let segments = Self::segments(path)?;
        if let Some(Node::File(data)) = self.overlay_node(&segments) {
            return Ok(data.len() as u64);
        }
        let host = self
            .host_path(&segments)
            .ok_or_else(|| HostError::FsNotFound(Self::display(&segments)))?;
        let meta = fs::metadata(&host).map_err(|_| HostError::FsNotFound(Self::display(&segments)))?;
        if meta.is_dir() {
            return Err(HostError::FsIsADirectory(Self::display(&segments)));
        }
        Ok(meta.len())
    }

    /// Lists a directory: the union of overlay entries and, when the
    /// path is reachable through a mount, host entries. Sorted and
    /// deduplicated.
    pub fn read_dir(&self, path: &str) -> Result<Vec<String>, HostError> {
        let segments = Self::segments(path)?;
        let mut names: Vec<String> = Vec::new();
        let mut found = false;
        match self.overlay_node(&segments) {
            Some(Node::Dir(children)) => {
                found = true;
                names.extend(children.keys().cloned());
            }
            Some(Node::File(_)) => {
                return Err(HostError::FsNotADirectory(Self::display(&segments)));
            }
            None => {}
        }
        if let Some(host) = self.host_path(&segments) {
            if host.is_dir() {
                found = true;
                for entry in fs::read_dir(&host)
                    .map_err(|_| HostError::FsNotFound(Self::display(&segments)))?
                {
                    let entry = entry?;
                    names.push(entry.file_name().to_string_lossy().into_owned());
                }
            }
        }
        if !found {
            return Err(HostError::FsNotFound(Self::display(&segments)));
        }
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Opens a file for the guest, returning a descriptor.
    ///
    /// Contents are captured at open time, so a later unmount or a
    /// host-side delete does not invalidate the descriptor.
    pub fn open(&mut self, path: &str) -> Result<i32, HostError> {
        let data = self.read_file(path)?;
        let fd = self.next_fd;
        self.next_fd += 1;
        self.fds.insert(fd, OpenFile { data });
        Ok(fd)
    }

    pub fn size(&self, fd: i32) -> Result<u64, HostError> {
        self.fds
            .get(&fd)
            .map(|f| f.data.len() as u64)
            .ok_or(HostError::FsBadFd(fd))
    }

    /// Reads up to `len` bytes at `offset`. Reads past the end return
    /// the empty slice rather than an error.
    pub fn read_at(&self, fd: i32, offset: u64, len: usize) -> Result<&[u8], HostError> {
        let file = self.fds.get(&fd).ok_or(HostError::FsBadFd(fd))?;
        let start = (offset as usize).min(file.data.len());
        let end = start.saturating_add(len).min(file.data.len());
        Ok(&file.data[start..end])
    }

    pub fn close(&mut self, fd: i32) -> Result<(), HostError> {
        self.fds
            .remove(&fd)
            .map(|_| ())
            .ok_or(HostError::FsBadFd(fd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_reads_overlay_files() {
        let mut vfs = VirtualFs::new();
        vfs.write_file("/home/user/main.c", "int main() { return 0; }")
            .expect("write");
        assert!(vfs.exists("/home/user/main.c"));
        assert_eq!(
            vfs.read_file("/home/user/main.c").expect("read"),
            b"int main() { return 0; }"
        );
        assert_eq!(vfs.metadata("/home/user/main.c").expect("metadata"), 24);
    }

    #[test]
    fn normalizes_dot_segments() {
        let mut vfs = VirtualFs::new();
        vfs.write_file("/a/b.h", "x").expect("write");
        assert!(vfs.exists("/a/./c/../b.h"));
        assert!(matches!(
            vfs.read_file("relative.h"),
            Err(HostError::FsInvalidPath(_))
        ));
        assert!(matches!(
            vfs.read_file("/../escape"),
            Err(HostError::FsInvalidPath(_))
        ));
    }

    #[test]
    fn mounts_expose_host_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("hello.c"), "int x;").expect("host write");
        std::fs::create_dir(dir.path().join("sub")).expect("host mkdir");
        std::fs::write(dir.path().join("sub/inner.h"), "int y;").expect("host write");

        let mut vfs = VirtualFs::new();
        vfs.mount("/home/web_user", dir.path()).expect("mount");

        let listing = vfs.read_dir("/home/web_user").expect("readdir");
        assert_eq!(listing, vec!["hello.c".to_string(), "sub".to_string()]);
        assert_eq!(vfs.read_file("/home/web_user/hello.c").expect("read"), b"int x;");
        assert_eq!(
            vfs.read_file("/home/web_user/sub/inner.h").expect("read"),
            b"int y;"
        );
    }

    #[test]
    fn overlay_wins_over_mounted_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("config.h"), "host").expect("host write");

        let mut vfs = VirtualFs::new();
        vfs.mount("/src", dir.path()).expect("mount");
        vfs.write_file("/src/config.h", "overlay").expect("write");

        assert_eq!(vfs.read_file("/src/config.h").expect("read"), b"overlay");
        let listing = vfs.read_dir("/src").expect("readdir");
        assert_eq!(listing, vec!["config.h".to_string()]);
    }

    #[test]
    fn rejects_double_mounts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut vfs = VirtualFs::new();
        vfs.mount("/mnt", dir.path()).expect("mount");
        assert!(matches!(
            vfs.mount("/mnt", dir.path()),
            Err(HostError::FsAlreadyMounted(_))
        ));
        vfs.unmount("/mnt").expect("unmount");
        vfs.mount("/mnt", dir.path()).expect("remount");
    }

    #[test]
    fn descriptors_survive_unmount() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("data.txt"), "0123456789").expect("host write");

        let mut vfs = VirtualFs::new();
        vfs.mount("/data", dir.path()).expect("mount");
        let fd = vfs.open("/data/data.txt").expect("open");
        vfs.unmount("/data").expect("unmount");

        assert_eq!(vfs.size(fd).expect("size"), 10);
        assert_eq!(vfs.read_at(fd, 4, 3).expect("read"), b"456");
        assert_eq!(vfs.read_at(fd, 9, 10).expect("read"), b"9");
        assert_eq!(vfs.read_at(fd, 20, 1).expect("read"), b"");
        vfs.close(fd).expect("close");
        assert!(matches!(vfs.read_at(fd, 0, 1), Err(HostError::FsBadFd(_))));
    }

    #[test]
    fn missing_paths_are_reported() {
        let vfs = VirtualFs::new();
        assert!(matches!(
            vfs.read_file("/nope"),
            Err(HostError::FsNotFound(_))
        ));
        assert!(matches!(
            vfs.read_dir("/nope"),
            Err(HostError::FsNotFound(_))
        ));
        assert!(!vfs.exists("/nope"));
    }
}
