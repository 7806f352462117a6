use crate::core::bit_coder::{ByteReader, ReaderErr};
use crate::core::mesh::{Face, Triangle, Vertex, FACE_SIZE};

/// Reads one 50 byte face record.
pub(crate) fn decode_face<R>(reader: &mut R) -> Result<Face, ReaderErr>
where
    R: ByteReader,
{
    let mut data = [0_u8; FACE_SIZE];
    reader.read_bytes(&mut data)?;

    let mut record = &data[..];
    let normal = read_vertex(&mut record)?;
    let triangle = Triangle::new(
        read_vertex(&mut record)?,
        read_vertex(&mut record)?,
        read_vertex(&mut record)?,
    );
    let attribute_byte_count = record.read_u16()?;

    Ok(Face { normal, triangle, attribute_byte_count })
}

fn read_vertex<R>(reader: &mut R) -> Result<Vertex, ReaderErr>
where
    R: ByteReader,
{
    Ok(Vertex {
        x: reader.read_f32()?,
        y: reader.read_f32()?,
        z: reader.read_f32()?,
    })
}
