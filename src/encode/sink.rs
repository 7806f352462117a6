use std::fs::File;
use std::io::{self, BufWriter, Cursor, Seek, Stdout, StdoutLock, Write};

/// An output the encoder can write a binary STL file to.
///
/// Deferred face counts are patched through [Sink::seekable]. Sinks that return
/// `None` can only be used when the face count is known up front.
pub trait Sink: Write {
    /// Returns the sink as a repositionable stream, if it is one.
    fn seekable(&mut self) -> Option<&mut dyn Seek> {
        None
    }

    /// Called once when the encoder is closed.
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn seekable(&mut self) -> Option<&mut dyn Seek> {
        (**self).seekable()
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn seekable(&mut self) -> Option<&mut dyn Seek> {
        (**self).seekable()
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl Sink for File {
    fn seekable(&mut self) -> Option<&mut dyn Seek> {
        Some(self)
    }
}

impl<W: Write + Seek> Sink for BufWriter<W> {
    fn seekable(&mut self) -> Option<&mut dyn Seek> {
        Some(self)
    }
}

impl<T: AsRef<[u8]>> Sink for Cursor<T>
where
    Cursor<T>: Write,
{
    fn seekable(&mut self) -> Option<&mut dyn Seek> {
        Some(self)
    }
}

impl Sink for Vec<u8> {}

impl Sink for Stdout {}

impl Sink for StdoutLock<'_> {}

/// Marks any `Write + Seek` output as a sink that supports deferred face counts.
#[derive(Debug)]
pub struct Seekable<W>(pub W);

impl<W> Seekable<W> {
    pub fn into_inner(self) -> W {
        self.0
    }
}

impl<W: Write> Write for Seekable<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<W: Write + Seek> Sink for Seekable<W> {
    fn seekable(&mut self) -> Option<&mut dyn Seek> {
        Some(&mut self.0)
    }
}

/// Marks any `Write` output as a sink that can only be written front to back.
#[derive(Debug)]
pub struct Sequential<W>(pub W);

impl<W> Sequential<W> {
    pub fn into_inner(self) -> W {
        self.0
    }
}

impl<W: Write> Write for Sequential<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<W: Write> Sink for Sequential<W> {}
