//! Blob object
//!
//! Blobs store a snapshot of one file. Unlike git blobs, a grove blob records
//! the file name next to its content, so the blob identity depends on both:
//! the same bytes stored under two names produce two distinct blobs.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<name length: u32 BE><name><content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable, with_header};
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Read, Write};

/// Blob object representing one file snapshot
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    /// Name of the file in the working tree
    name: String,
    /// Raw file content
    content: Bytes,
}

impl Blob {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn into_content(self) -> Bytes {
        self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let name_length =
            u32::try_from(self.name.len()).context("blob file name is too long to store")?;

        let mut payload = Vec::with_capacity(4 + self.name.len() + self.content.len());
        payload.write_u32::<BigEndian>(name_length)?;
        payload.write_all(self.name.as_bytes())?;
        payload.write_all(&self.content)?;

        with_header(self.object_type(), &payload)
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let name_length = reader
            .read_u32::<BigEndian>()
            .context("Invalid blob object: missing name length")?;

        let mut name = vec![0; name_length as usize];
        reader
            .read_exact(&mut name)
            .context("Invalid blob object: truncated name")?;
        let name = String::from_utf8(name)?;

        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Ok(Self::new(name, content.into()))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}
