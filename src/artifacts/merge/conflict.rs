use bytes::{BufMut, Bytes, BytesMut};

pub const CURRENT_MARKER: &[u8] = b"<<<<<<< HEAD\n";
pub const SEPARATOR_MARKER: &[u8] = b"=======\n";
pub const GIVEN_MARKER: &[u8] = b">>>>>>>\n";

/// Content of a conflicted file
///
/// Both versions are inserted verbatim between the markers. A side that does
/// not track the file contributes no bytes. No newline is added after either
/// side, so content without a trailing newline runs into the next marker.
pub fn conflict_content(current: Option<&[u8]>, given: Option<&[u8]>) -> Bytes {
    let current = current.unwrap_or_default();
    let given = given.unwrap_or_default();

    let mut content = BytesMut::with_capacity(
        CURRENT_MARKER.len()
            + current.len()
            + SEPARATOR_MARKER.len()
            + given.len()
            + GIVEN_MARKER.len(),
    );
    content.put_slice(CURRENT_MARKER);
    content.put_slice(current);
    content.put_slice(SEPARATOR_MARKER);
    content.put_slice(given);
    content.put_slice(GIVEN_MARKER);

    content.freeze()
}
