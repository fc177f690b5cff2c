//! Blob object
//!
//! Blobs hold raw file content. The path a blob was recorded under lives in the
//! index, so identical contents share one stored object.
//!
//! ## Format
//!
//! On disk: `blob\n<hex-encoded content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Read, Write};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Content as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut blob_bytes = Vec::new();
        writeln!(blob_bytes, "{}", self.object_type())?;
        blob_bytes.write_all(hex::encode(&self.content).as_bytes())?;

        Ok(Bytes::from(blob_bytes))
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let mut encoded = String::new();
        reader.read_to_string(&mut encoded)?;

        let content = hex::decode(encoded.trim()).context("Invalid blob encoding")?;
        Ok(Self::new(content.into()))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn object_id(&self) -> anyhow::Result<ObjectId> {
        Ok(ObjectId::digest(&self.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::object_type::ObjectType;
    use proptest::proptest;
    use std::io::Cursor;

    proptest! {
        #[test]
        fn stored_form_decodes_to_the_original_content(content in proptest::collection::vec(proptest::num::u8::ANY, 0..256)) {
            let blob = Blob::new(content.clone().into());
            let mut reader = Cursor::new(blob.serialize().unwrap());

            assert_eq!(ObjectType::parse_object_type(&mut reader).unwrap(), ObjectType::Blob);
            assert_eq!(Blob::deserialize(reader).unwrap().content().as_ref(), content.as_slice());
        }
    }

    #[test]
    fn identical_content_shares_an_id() -> anyhow::Result<()> {
        let first = Blob::new(Bytes::from_static(b"same"));
        let second = Blob::new(Bytes::from("same".to_string()));

        assert_eq!(first.object_id()?, second.object_id()?);
        Ok(())
    }
}
