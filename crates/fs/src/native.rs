use std::path::Path;

use fattr_engine::{AttrError, AttrFlags, AttributeProvider, Catalog};
use log::debug;

/// Attribute provider backed by the Linux `FS_IOC_GETFLAGS` /
/// `FS_IOC_SETFLAGS` ioctls.
///
/// Stateless; every call opens the file, runs one ioctl and closes it
/// again. On platforms without the ioctls every operation reports
/// [`AttrError::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeProvider;

impl AttributeProvider for NativeProvider {
    fn probe(&self, path: &Path) -> Result<AttrFlags, AttrError> {
        // A successful flags read is the support check. The kernel reports
        // no per-filesystem capability mask, so a filesystem that answers
        // the ioctl at all gets the full known catalog.
        let flags = self.read_flags(path)?;
        debug!("[native] probe ok on {:?}, flags {:#x}", path, flags.bits());
        Ok(Catalog::full().known_bits())
    }

    fn read_flags(&self, path: &Path) -> Result<AttrFlags, AttrError> {
        sys::get_flags(path).map(AttrFlags::from_bits_retain)
    }

    fn write_flags(&self, path: &Path, flags: AttrFlags) -> Result<(), AttrError> {
        sys::set_flags(path, flags.bits())
    }
}

#[cfg(target_os = "linux")]
mod sys {
    use std::ffi::CString;
    use std::io;
    use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};
    use std::os::unix::ffi::OsStrExt;
    use std::path::Path;

    use fattr_engine::AttrError;

    fn open_readonly(path: &Path) -> io::Result<OwnedFd> {
        let cpath = CString::new(path.as_os_str().as_bytes())
            .map_err(|_| io::Error::from(io::ErrorKind::InvalidInput))?;
        // O_NONBLOCK so fifos and device nodes cannot hang the open.
        let fd = unsafe {
            libc::open(
                cpath.as_ptr(),
                libc::O_RDONLY | libc::O_NONBLOCK | libc::O_CLOEXEC,
            )
        };
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(unsafe { OwnedFd::from_raw_fd(fd) })
    }

    fn attr_error(path: &Path, err: io::Error) -> AttrError {
        match err.raw_os_error() {
            // The filesystem does not implement the flag ioctls.
            Some(libc::ENOTTY) | Some(libc::EOPNOTSUPP) | Some(libc::ENOSYS) => {
                AttrError::Unsupported {
                    path: path.to_path_buf(),
                }
            }
            _ => AttrError::from_io(path.to_path_buf(), err),
        }
    }

    pub fn get_flags(path: &Path) -> Result<u32, AttrError> {
        let fd = open_readonly(path).map_err(|e| attr_error(path, e))?;

        let mut flags: libc::c_long = 0;
        let rc = unsafe { libc::ioctl(fd.as_raw_fd(), libc::FS_IOC_GETFLAGS, &mut flags) };
        if rc != 0 {
            return Err(attr_error(path, io::Error::last_os_error()));
        }
        Ok(flags as u32)
    }

    pub fn set_flags(path: &Path, flags: u32) -> Result<(), AttrError> {
        let fd = open_readonly(path).map_err(|e| attr_error(path, e))?;

        let flags = flags as libc::c_long;
        let rc = unsafe { libc::ioctl(fd.as_raw_fd(), libc::FS_IOC_SETFLAGS, &flags) };
        if rc != 0 {
            return Err(attr_error(path, io::Error::last_os_error()));
        }
        Ok(())
    }
}

#[cfg(not(target_os = "linux"))]
mod sys {
    use std::path::Path;

    use fattr_engine::AttrError;

    pub fn get_flags(path: &Path) -> Result<u32, AttrError> {
        Err(AttrError::Unsupported {
            path: path.to_path_buf(),
        })
    }

    pub fn set_flags(path: &Path, _flags: u32) -> Result<(), AttrError> {
        Err(AttrError::Unsupported {
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
#[path = "native_tests.rs"]
mod tests;
