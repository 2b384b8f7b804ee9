//! Memory-mapped read access to the input binary.
//!
//! The shared object being cataloged is mapped read-only so the ELF
//! parser can see its full contents as a byte slice without copying the
//! file into memory. The mapping lives for the duration of one
//! extraction run and is released on drop.

use std::ffi::CString;
use std::io;

/// A read-only memory-mapped file.
pub struct MappedFile {
    fd: libc::c_int,
    addr: *const libc::c_void,
    size: libc::off_t,
    pub data: &'static [u8],
}

impl MappedFile {
    /// Open a file and map it read-only.
    ///
    /// Fails if the path cannot be opened or does not name a regular
    /// file (a directory or device node is never a shared object).
    pub fn open(path: &str) -> io::Result<MappedFile> {
        let c_path = CString::new(path)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains null byte"))?;
        let fd = unsafe { libc::open(c_path.as_ptr(), libc::O_RDONLY) };
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }
        let mut statbuf: libc::stat = unsafe { std::mem::zeroed() };
        let stat_ret = unsafe { libc::fstat(fd, &mut statbuf as *mut libc::stat) };
        if stat_ret < 0 {
            let err = io::Error::last_os_error();
            unsafe {
                libc::close(fd);
            }
            return Err(err);
        }
        if (statbuf.st_mode & libc::S_IFMT) != libc::S_IFREG {
            unsafe {
                libc::close(fd);
            }
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            ));
        }
        let size = statbuf.st_size;
        let addr = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                size as usize,
                libc::PROT_READ,
                libc::MAP_PRIVATE,
                fd,
                0,
            )
        };
        if addr == libc::MAP_FAILED {
            let err = io::Error::last_os_error();
            unsafe {
                libc::close(fd);
            }
            return Err(err);
        }
        let data = unsafe { std::slice::from_raw_parts(addr as *const u8, size as usize) };
        Ok(Self {
            fd,
            addr,
            size,
            data,
        })
    }
}

impl Drop for MappedFile {
    fn drop(&mut self) {
        unsafe {
            libc::munmap(self.addr as *mut libc::c_void, self.size as usize);
            libc::close(self.fd);
        }
    }
}
