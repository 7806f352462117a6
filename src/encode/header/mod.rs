use std::io;

use crate::core::bit_coder::ByteWriter;
use crate::core::mesh::pad_comment;

/// Writes the comment, left-aligned in 80 bytes, followed by the triangle count.
pub(crate) fn encode_header<W>(
    writer: &mut W,
    comment: &[u8],
    triangle_count: u32,
) -> io::Result<()>
where
    W: ByteWriter,
{
    writer.write_bytes(&pad_comment(comment))?;
    writer.write_u32(triangle_count)
}
