use std::fmt;

use crate::Error;

/// Uppercase hex without separators, as the miner logs hashes and nonces.
pub struct HexFmt<'a>(pub &'a [u8]);

impl<'a> fmt::Display for HexFmt<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}

/// Uppercase hex string of `bytes`.
pub fn to_hex_upper(bytes: &[u8]) -> String {
    HexFmt(bytes).to_string()
}

/// Lowercase hex string of `bytes`.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        s.push_str(&format!("{:02x}", b));
    }
    s
}

/// Decode a hex string, either case.
pub fn from_hex(s: &str) -> Result<Vec<u8>, Error> {
    if s.len() % 2 != 0 {
        return Err(Error::InvalidHex(format!("odd length {}", s.len())));
    }

    s.as_bytes()
        .chunks(2)
        .map(|pair| -> Result<u8, Error> { Ok((nibble(pair[0])? << 4) | nibble(pair[1])?) })
        .collect()
}

/// Decode a hex string into a fixed size array.
pub fn from_hex_array<const N: usize>(s: &str) -> Result<[u8; N], Error> {
    let v = from_hex(s)?;
    v.as_slice()
        .try_into()
        .map_err(|_| Error::InvalidHex(format!("expected {} bytes, got {}", N, v.len())))
}

fn nibble(c: u8) -> Result<u8, Error> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(Error::InvalidHex(format!("bad character {:?}", c as char))),
    }
}
