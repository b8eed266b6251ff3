use aurbump_common::errors::*;
use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use std::io::Read;
use xz2::read::XzDecoder;

/// Compression of a downloaded index, debian mirrors publish
/// `Packages`, `Packages.gz` and `Packages.xz` side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Gzip,
    Bzip2,
    Xz,
    Zstd,
    None,
}

impl Compression {
    pub fn detect(bytes: &[u8]) -> Compression {
        let mime = tree_magic_mini::from_u8(bytes);
        debug!("Detected mimetype for index: {:?}", mime);

        match mime {
            "application/gzip" => Compression::Gzip,
            "application/x-bzip" | "application/x-bzip2" => Compression::Bzip2,
            "application/x-xz" => Compression::Xz,
            "application/zstd" => Compression::Zstd,
            _ => Compression::None,
        }
    }

    fn reader<'a>(&self, bytes: &'a [u8]) -> Result<Box<dyn Read + 'a>> {
        match self {
            Compression::Gzip => Ok(Box::new(GzDecoder::new(bytes))),
            Compression::Bzip2 => Ok(Box::new(BzDecoder::new(bytes))),
            Compression::Xz => Ok(Box::new(XzDecoder::new(bytes))),
            Compression::Zstd => Ok(Box::new(zstd::Decoder::new(bytes)?)),
            Compression::None => Ok(Box::new(bytes)),
        }
    }
}

/// Decode an index into text, decompressing it first if needed.
pub fn to_text(bytes: &[u8]) -> Result<String> {
    let comp = Compression::detect(bytes);
    let mut text = String::new();
    comp.reader(bytes)?
        .read_to_string(&mut text)
        .with_context(|| anyhow!("Failed to read index (compression: {:?})", comp))?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_encoding::BASE64;

    const PLAIN: &str = "Package: nordvpn\nVersion: 3.7.0-3\n";

    #[test]
    fn plain_text() {
        assert_eq!(Compression::detect(PLAIN.as_bytes()), Compression::None);
        assert_eq!(to_text(PLAIN.as_bytes()).unwrap(), PLAIN);
    }

    #[test]
    fn gzip() {
        let bytes = BASE64
            .decode(b"H4sIAAAAAAACAwtITM5OTE+1UsjLL0opK8jjCkstKs7Mz7NSMNYz1zPQNeYCAIVgA80iAAAA")
            .unwrap();
        assert_eq!(Compression::detect(&bytes), Compression::Gzip);
        assert_eq!(to_text(&bytes).unwrap(), PLAIN);
    }

    #[test]
    fn bzip2() {
        let bytes = BASE64
            .decode(b"QlpoOTFBWSZTWf85rlwAAAbbgAAQQANIkEEALqnZACAAIoND1A0aGgoAMRppo0igZMEAHzOjKpjqZgqKpqfizf3xdyRThQkP85rlwA==")
            .unwrap();
        assert_eq!(Compression::detect(&bytes), Compression::Bzip2);
        assert_eq!(to_text(&bytes).unwrap(), PLAIN);
    }

    #[test]
    fn xz() {
        let bytes = BASE64
            .decode(b"/Td6WFoAAATm1rRGAgAhARYAAAB0L+WjAQAhUGFja2FnZTogbm9yZHZwbgpWZXJzaW9uOiAzLjcuMC0zCgAAAKSSEYrlNzrqAAE6IrYqT9AftvN9AQAAAAAEWVo=")
            .unwrap();
        assert_eq!(Compression::detect(&bytes), Compression::Xz);
        assert_eq!(to_text(&bytes).unwrap(), PLAIN);
    }

    #[test]
    fn zstd() {
        let bytes = BASE64
            .decode(b"KLUv/SAiEQEAUGFja2FnZTogbm9yZHZwbgpWZXJzaW9uOiAzLjcuMC0zCg==")
            .unwrap();
        assert_eq!(Compression::detect(&bytes), Compression::Zstd);
        assert_eq!(to_text(&bytes).unwrap(), PLAIN);
    }

    #[test]
    fn invalid_utf8() {
        assert!(to_text(b"Version: \xff\xfe").is_err());
    }
}
