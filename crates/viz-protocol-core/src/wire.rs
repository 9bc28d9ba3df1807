//! Canonical binary encoding used for transaction digests and on-chain data.
//!
//! The layout is the chain's consensus serialization:
//! - Fixed-width integers are little-endian
//! - Lengths, counts and tags are varints (7 bits per byte, low group first)
//! - Strings and sequences carry a varint length prefix
//! - Optionals carry a single presence byte
//! - Maps are sequences of (key, value) pairs in insertion order
//!
//! Every byte written here ends up inside a signed digest, so the encoder
//! never reorders anything it is given.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::WireError;

/// Longest varint accepted for a u64 (ceil(64 / 7)).
const MAX_VARINT_LEN: usize = 10;

/// Appends values to a buffer in canonical wire form.
#[derive(Debug, Default)]
pub struct WireEncoder {
    buf: BytesMut,
}

impl WireEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Encode any wire value.
    pub fn put<T: WireEncode + ?Sized>(&mut self, value: &T) -> Result<(), WireError> {
        value.encode(self)
    }

    pub fn put_u8(&mut self, v: u8) {
        self.buf.put_u8(v);
    }

    pub fn put_u16(&mut self, v: u16) {
        self.buf.put_u16_le(v);
    }

    pub fn put_u32(&mut self, v: u32) {
        self.buf.put_u32_le(v);
    }

    pub fn put_u64(&mut self, v: u64) {
        self.buf.put_u64_le(v);
    }

    pub fn put_i8(&mut self, v: i8) {
        self.buf.put_i8(v);
    }

    pub fn put_i16(&mut self, v: i16) {
        self.buf.put_i16_le(v);
    }

    pub fn put_i32(&mut self, v: i32) {
        self.buf.put_i32_le(v);
    }

    pub fn put_i64(&mut self, v: i64) {
        self.buf.put_i64_le(v);
    }

    pub fn put_bool(&mut self, v: bool) {
        self.buf.put_u8(v as u8);
    }

    /// Write an unsigned varint.
    pub fn put_varint(&mut self, mut v: u64) {
        while v >= 0x80 {
            self.buf.put_u8((v as u8 & 0x7f) | 0x80);
            v >>= 7;
        }
        self.buf.put_u8(v as u8);
    }

    /// Write a collection length.
    pub fn put_len(&mut self, len: usize) {
        self.put_varint(len as u64);
    }

    /// Write raw bytes with no length prefix.
    pub fn put_raw(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// Write a length-prefixed byte string.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.put_len(bytes.len());
        self.buf.put_slice(bytes);
    }

    pub fn put_str(&mut self, s: &str) {
        self.put_bytes(s.as_bytes());
    }

    /// Write a sequence: count followed by each element.
    pub fn put_seq<T: WireEncode>(&mut self, items: &[T]) -> Result<(), WireError> {
        self.put_len(items.len());
        for item in items {
            item.encode(self)?;
        }
        Ok(())
    }

    /// Write an ordered map in the iteration order of `entries`.
    pub fn put_map<'a, K, V, I>(&mut self, entries: I) -> Result<(), WireError>
    where
        K: WireEncode + 'a,
        V: WireEncode + 'a,
        I: IntoIterator<Item = (&'a K, &'a V)>,
        I::IntoIter: ExactSizeIterator,
    {
        let entries = entries.into_iter();
        self.put_len(entries.len());
        for (k, v) in entries {
            k.encode(self)?;
            v.encode(self)?;
        }
        Ok(())
    }

    /// Write a presence byte followed by the value, if any.
    pub fn put_option<T: WireEncode>(&mut self, value: Option<&T>) -> Result<(), WireError> {
        match value {
            Some(v) => {
                self.put_u8(1);
                v.encode(self)
            }
            None => {
                self.put_u8(0);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}

/// Reads canonical wire values from a borrowed buffer.
///
/// Every read checks the remaining length first; a short buffer yields
/// [`WireError::TruncatedInput`], never a panic.
#[derive(Debug, Clone)]
pub struct WireDecoder<'a> {
    buf: &'a [u8],
}

impl<'a> WireDecoder<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Decode any wire value.
    pub fn get<T: WireDecode>(&mut self) -> Result<T, WireError> {
        T::decode(self)
    }

    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Fail unless the whole buffer was consumed.
    pub fn finish(&self) -> Result<(), WireError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(WireError::TrailingBytes(n)),
        }
    }

    fn need(&self, needed: usize) -> Result<(), WireError> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(WireError::TruncatedInput { needed, remaining });
        }
        Ok(())
    }

    pub fn get_u8(&mut self) -> Result<u8, WireError> {
        self.need(1)?;
        Ok(self.buf.get_u8())
    }

    pub fn get_u16(&mut self) -> Result<u16, WireError> {
        self.need(2)?;
        Ok(self.buf.get_u16_le())
    }

    pub fn get_u32(&mut self) -> Result<u32, WireError> {
        self.need(4)?;
        Ok(self.buf.get_u32_le())
    }

    pub fn get_u64(&mut self) -> Result<u64, WireError> {
        self.need(8)?;
        Ok(self.buf.get_u64_le())
    }

    pub fn get_i8(&mut self) -> Result<i8, WireError> {
        self.need(1)?;
        Ok(self.buf.get_i8())
    }

    pub fn get_i16(&mut self) -> Result<i16, WireError> {
        self.need(2)?;
        Ok(self.buf.get_i16_le())
    }

    pub fn get_i32(&mut self) -> Result<i32, WireError> {
        self.need(4)?;
        Ok(self.buf.get_i32_le())
    }

    pub fn get_i64(&mut self) -> Result<i64, WireError> {
        self.need(8)?;
        Ok(self.buf.get_i64_le())
    }

    pub fn get_bool(&mut self) -> Result<bool, WireError> {
        match self.get_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(WireError::InvalidValue(format!("bool byte {other:#04x}"))),
        }
    }

    pub fn get_varint(&mut self) -> Result<u64, WireError> {
        let mut value: u64 = 0;
        for i in 0..MAX_VARINT_LEN {
            let byte = self.get_u8()?;
            let group = u64::from(byte & 0x7f);
            let shift = 7 * i as u32;
            if shift == 63 && group > 1 {
                return Err(WireError::VarintOverflow);
            }
            value |= group << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(WireError::VarintOverflow)
    }

    /// Read a collection length, bounded by the bytes still available.
    ///
    /// Every element occupies at least one byte, so a count larger than the
    /// remaining input can only come from a corrupt or truncated buffer.
    pub fn get_len(&mut self) -> Result<usize, WireError> {
        let len = self.get_varint()?;
        let remaining = self.remaining();
        if len > remaining as u64 {
            return Err(WireError::TruncatedInput {
                needed: usize::try_from(len).unwrap_or(usize::MAX),
                remaining,
            });
        }
        Ok(len as usize)
    }

    /// Borrow `n` raw bytes.
    pub fn get_raw(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        self.need(n)?;
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    /// Read exactly `N` raw bytes into an array.
    pub fn get_array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.get_raw(N)?);
        Ok(out)
    }

    /// Take everything left in the buffer.
    pub fn take_rest(&mut self) -> &'a [u8] {
        let rest = self.buf;
        self.buf = &[];
        rest
    }

    pub fn get_bytes(&mut self) -> Result<Vec<u8>, WireError> {
        let len = self.get_len()?;
        Ok(self.get_raw(len)?.to_vec())
    }

    pub fn get_string(&mut self) -> Result<String, WireError> {
        let len = self.get_len()?;
        let raw = self.get_raw(len)?;
        String::from_utf8(raw.to_vec())
            .map_err(|e| WireError::InvalidValue(format!("string is not utf-8: {e}")))
    }

    pub fn get_seq<T: WireDecode>(&mut self) -> Result<Vec<T>, WireError> {
        let len = self.get_len()?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(T::decode(self)?);
        }
        Ok(items)
    }

    pub fn get_option<T: WireDecode>(&mut self) -> Result<Option<T>, WireError> {
        match self.get_u8()? {
            0 => Ok(None),
            1 => Ok(Some(T::decode(self)?)),
            other => Err(WireError::InvalidValue(format!(
                "option presence byte {other:#04x}"
            ))),
        }
    }
}

/// A value with a canonical binary form.
pub trait WireEncode {
    fn encode(&self, enc: &mut WireEncoder) -> Result<(), WireError>;
}

/// A value that can be read back from its canonical binary form.
pub trait WireDecode: Sized {
    fn decode(dec: &mut WireDecoder<'_>) -> Result<Self, WireError>;
}

/// Encode a value to a fresh byte vector.
pub fn to_wire_bytes<T: WireEncode + ?Sized>(value: &T) -> Result<Vec<u8>, WireError> {
    let mut enc = WireEncoder::new();
    value.encode(&mut enc)?;
    Ok(enc.into_bytes())
}

/// Decode a value that must span the entire buffer.
pub fn from_wire_bytes<T: WireDecode>(bytes: &[u8]) -> Result<T, WireError> {
    let mut dec = WireDecoder::new(bytes);
    let value = T::decode(&mut dec)?;
    dec.finish()?;
    Ok(value)
}

/// An integer written in varint form rather than at a fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Varint(pub u64);

impl WireEncode for Varint {
    fn encode(&self, enc: &mut WireEncoder) -> Result<(), WireError> {
        enc.put_varint(self.0);
        Ok(())
    }
}

impl WireDecode for Varint {
    fn decode(dec: &mut WireDecoder<'_>) -> Result<Self, WireError> {
        dec.get_varint().map(Varint)
    }
}

macro_rules! fixed_width {
    ($($ty:ty => $put:ident, $get:ident;)*) => {
        $(
            impl WireEncode for $ty {
                fn encode(&self, enc: &mut WireEncoder) -> Result<(), WireError> {
                    enc.$put(*self);
                    Ok(())
                }
            }

            impl WireDecode for $ty {
                fn decode(dec: &mut WireDecoder<'_>) -> Result<Self, WireError> {
                    dec.$get()
                }
            }
        )*
    };
}

fixed_width! {
    u8 => put_u8, get_u8;
    u16 => put_u16, get_u16;
    u32 => put_u32, get_u32;
    u64 => put_u64, get_u64;
    i8 => put_i8, get_i8;
    i16 => put_i16, get_i16;
    i32 => put_i32, get_i32;
    i64 => put_i64, get_i64;
    bool => put_bool, get_bool;
}

impl WireEncode for str {
    fn encode(&self, enc: &mut WireEncoder) -> Result<(), WireError> {
        enc.put_str(self);
        Ok(())
    }
}

impl WireEncode for String {
    fn encode(&self, enc: &mut WireEncoder) -> Result<(), WireError> {
        enc.put_str(self);
        Ok(())
    }
}

impl WireDecode for String {
    fn decode(dec: &mut WireDecoder<'_>) -> Result<Self, WireError> {
        dec.get_string()
    }
}

impl<T: WireEncode> WireEncode for Vec<T> {
    fn encode(&self, enc: &mut WireEncoder) -> Result<(), WireError> {
        enc.put_seq(self)
    }
}

impl<T: WireDecode> WireDecode for Vec<T> {
    fn decode(dec: &mut WireDecoder<'_>) -> Result<Self, WireError> {
        dec.get_seq()
    }
}

impl<T: WireEncode> WireEncode for Option<T> {
    fn encode(&self, enc: &mut WireEncoder) -> Result<(), WireError> {
        enc.put_option(self.as_ref())
    }
}

impl<T: WireDecode> WireDecode for Option<T> {
    fn decode(dec: &mut WireDecoder<'_>) -> Result<Self, WireError> {
        dec.get_option()
    }
}

// Pairs are how map entries travel: a Vec<(K, V)> is an insertion-ordered map.
impl<A: WireEncode, B: WireEncode> WireEncode for (A, B) {
    fn encode(&self, enc: &mut WireEncoder) -> Result<(), WireError> {
        self.0.encode(enc)?;
        self.1.encode(enc)
    }
}

impl<A: WireDecode, B: WireDecode> WireDecode for (A, B) {
    fn decode(dec: &mut WireDecoder<'_>) -> Result<Self, WireError> {
        Ok((A::decode(dec)?, B::decode(dec)?))
    }
}

impl<T: WireEncode + ?Sized> WireEncode for &T {
    fn encode(&self, enc: &mut WireEncoder) -> Result<(), WireError> {
        (**self).encode(enc)
    }
}
