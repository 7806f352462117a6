use crate::core::bit_coder::{ByteReader, ReaderErr};
use crate::core::mesh::{Header, COMMENT_SIZE, HEADER_SIZE};

/// Reads the 80 byte comment and the triangle count in a single read.
pub(crate) fn decode_header<R>(reader: &mut R) -> Result<Header, ReaderErr>
where
    R: ByteReader,
{
    let mut data = [0_u8; HEADER_SIZE];
    reader.read_bytes(&mut data)?;

    let mut comment = [0_u8; COMMENT_SIZE];
    comment.copy_from_slice(&data[..COMMENT_SIZE]);

    let mut count = &data[COMMENT_SIZE..];
    let triangle_count = count.read_u32()?;

    Ok(Header { comment, triangle_count })
}
