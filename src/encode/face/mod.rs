use std::io;

use crate::core::bit_coder::ByteWriter;
use crate::core::mesh::{Face, Vertex, FACE_SIZE};

/// Writes one 50 byte face record with a single call to the writer.
pub(crate) fn encode_face<W>(writer: &mut W, face: &Face) -> io::Result<()>
where
    W: ByteWriter,
{
    let mut record = Vec::with_capacity(FACE_SIZE);
    write_vertex(&mut record, &face.normal)?;
    for v in &face.triangle.vertices {
        write_vertex(&mut record, v)?;
    }
    record.write_u16(face.attribute_byte_count)?;
    debug_assert_eq!(record.len(), FACE_SIZE);

    writer.write_bytes(&record)
}

fn write_vertex<W>(writer: &mut W, v: &Vertex) -> io::Result<()>
where
    W: ByteWriter,
{
    writer.write_f32(v.x)?;
    writer.write_f32(v.y)?;
    writer.write_f32(v.z)
}
