mod header;
mod face;
mod sink;

pub use sink::{Seekable, Sequential, Sink};

use std::io::{self, Seek, SeekFrom};

use thiserror::Error;

use crate::core::bit_coder::ByteWriter;
use crate::core::mesh::{Face, Mesh, Triangle, Vertex, COMMENT_SIZE};
use crate::core::shared::ConfigType;

/// The triangle count written to the header when the encoder is opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceCount {
    /// The count is written as given. It is not checked against the faces
    /// written afterwards unless [Config::strict_face_count] is enabled.
    Known(u32),
    /// A zero placeholder is written and replaced with the number of faces
    /// written once the encoder is closed. The sink must be seekable.
    Deferred,
}

#[derive(Debug, Clone)]
pub struct Config {
    strict_face_count: bool,
}

impl Config {
    /// With a known face count, fail when more faces are written than declared,
    /// or when the encoder is closed with fewer.
    pub fn strict_face_count(mut self, strict: bool) -> Self {
        self.strict_face_count = strict;
        self
    }
}

impl ConfigType for Config {
    fn default() -> Self {
        Self {
            strict_face_count: false,
        }
    }
}

#[remain::sorted]
#[derive(Error, Debug)]
pub enum Err {
    #[error("The encoder is already closed")]
    Closed,
    #[error("More faces written than the declared {declared}")]
    FaceCountExceeded { declared: u32 },
    #[error("Declared {declared} faces but {written} were written")]
    FaceCountMismatch { declared: u32, written: u32 },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("A deferred face count requires a seekable sink")]
    SeekUnsupported,
    #[error("A binary STL file holds at most {} faces", u32::MAX)]
    TooManyFaces,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Writing,
    Closed,
}

/// Streams faces into a binary STL file.
///
/// The header is written by [Encoder::open]. Faces are appended in call order.
/// [Encoder::close] finalizes the triangle count and closes the sink; after that
/// every call fails with [Err::Closed].
pub struct Encoder<W: Sink> {
    writer: W,
    face_count: FaceCount,
    /// Absolute position of the triangle count field. Set only for deferred counts.
    count_pos: Option<u64>,
    faces_written: u32,
    state: State,
    cfg: Config,
}

impl<W: Sink> Encoder<W> {
    /// Writes the header and returns an encoder ready to take faces.
    ///
    /// `comment` is left-aligned in the 80 byte comment field and is truncated or
    /// zero-padded to fit. With [FaceCount::Deferred], fails with
    /// [Err::SeekUnsupported] before writing anything if the sink cannot be
    /// repositioned.
    pub fn open<C: AsRef<[u8]>>(
        mut writer: W,
        comment: C,
        face_count: FaceCount,
        cfg: Config,
    ) -> Result<Self, Err> {
        let (count_pos, initial_count) = match face_count {
            FaceCount::Known(n) => (None, n),
            FaceCount::Deferred => {
                let seeker = writer.seekable().ok_or(Err::SeekUnsupported)?;
                // Streams such as pipes look seekable but cannot report a position.
                let start = seeker.stream_position().map_err(|_| Err::SeekUnsupported)?;
                (Some(start + COMMENT_SIZE as u64), 0)
            }
        };

        header::encode_header(&mut writer, comment.as_ref(), initial_count)?;

        Ok(Self {
            writer,
            face_count,
            count_pos,
            faces_written: 0,
            state: State::Writing,
            cfg,
        })
    }

    pub fn write_face(&mut self, face: &Face) -> Result<(), Err> {
        if self.state == State::Closed {
            return Err(Err::Closed);
        }
        if let (true, FaceCount::Known(declared)) = (self.cfg.strict_face_count, self.face_count) {
            if self.faces_written >= declared {
                return Err(Err::FaceCountExceeded { declared });
            }
        }
        let next = self.faces_written.checked_add(1).ok_or(Err::TooManyFaces)?;

        face::encode_face(&mut self.writer, face)?;
        self.faces_written = next;
        Ok(())
    }

    /// Writes a face with a zero normal and a zero attribute count.
    pub fn write_triangle(&mut self, a: Vertex, b: Vertex, c: Vertex) -> Result<(), Err> {
        self.write_face(&Face::from(Triangle::new(a, b, c)))
    }

    pub fn write_faces<'a, I>(&mut self, faces: I) -> Result<(), Err>
    where
        I: IntoIterator<Item = &'a Face>,
    {
        for face in faces {
            self.write_face(face)?;
        }
        Ok(())
    }

    /// Finalizes the file.
    ///
    /// For a deferred count, seeks back to the count field, overwrites it with the
    /// number of faces written, and returns to the end of the data. The sink is
    /// closed in every case, also when finalizing fails. The encoder is closed even
    /// if this fails.
    pub fn close(&mut self) -> Result<(), Err> {
        if self.state == State::Closed {
            return Err(Err::Closed);
        }
        self.state = State::Closed;

        let finished = self.finish();
        let closed = self.writer.close();
        finished?;
        closed?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Err> {
        if let (true, FaceCount::Known(declared)) = (self.cfg.strict_face_count, self.face_count) {
            if self.faces_written != declared {
                return Err(Err::FaceCountMismatch {
                    declared,
                    written: self.faces_written,
                });
            }
        }

        match self.count_pos {
            Some(pos) => self.patch_face_count(pos),
            None => Ok(()),
        }
    }

    fn patch_face_count(&mut self, pos: u64) -> Result<(), Err> {
        let seeker = self.writer.seekable().ok_or(Err::SeekUnsupported)?;
        let end = seeker.stream_position()?;
        seeker.seek(SeekFrom::Start(pos))?;

        self.writer.write_u32(self.faces_written)?;

        let seeker = self.writer.seekable().ok_or(Err::SeekUnsupported)?;
        // Append-mode files accept the seek but still write at the end.
        if seeker.stream_position()? != pos + 4 {
            return Err(Err::SeekUnsupported);
        }
        seeker.seek(SeekFrom::Start(end))?;
        Ok(())
    }

    pub fn faces_written(&self) -> u32 {
        self.faces_written
    }

    pub fn get_face_count(&self) -> FaceCount {
        self.face_count
    }

    pub fn is_closed(&self) -> bool {
        self.state == State::Closed
    }

    /// Returns the sink. Does not close the encoder; call [Encoder::close] first.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Encodes a whole mesh into `writer`, reusing the mesh's 80 byte comment verbatim.
pub fn encode<W>(mesh: &Mesh, writer: &mut W, cfg: Config) -> Result<(), Err>
where
    W: Sink,
{
    let num_faces = u32::try_from(mesh.len()).map_err(|_| Err::TooManyFaces)?;
    let comment = mesh.get_header().comment;
    let mut encoder = Encoder::open(writer, comment, FaceCount::Known(num_faces), cfg)?;
    encoder.write_faces(mesh.get_faces())?;
    encoder.close()
}
