//! On-wire encoding for segments carried inside transport commands.
//!
//! Segments are embedded into a transport command payload by prefixing a
//! short magic marker, the encoded [`SegmentHeader`], and finally the raw
//! segment bytes. This keeps the layer transport-agnostic while letting the
//! receiving shim detect and strip segment metadata before handing the chunk
//! to the re-assembler.

use std::num::NonZeroUsize;

use bincode::{
    borrow_decode_from_slice,
    config,
    encode_to_vec,
    error::{DecodeError, EncodeError},
};

use crate::{Segment, SegmentHeader, SegmentIndex, SendTimestamp, SenderId, TransferId};

/// Magic prefix that marks an encoded segment payload.
pub const SEGMENT_MAGIC: &[u8; 4] = b"CHNK";

/// Fixed bytes required to wrap a segment, excluding the segment body.
///
/// Computed from a header with every field at its maximum value: bincode's
/// standard configuration uses variable-width integers, so the worst-case
/// header is the one that bounds the wrapping overhead.
///
/// # Panics
///
/// Panics if encoding the constant worst-case header fails, which would
/// indicate a programmer error in the header definition.
#[must_use]
pub fn segment_overhead() -> NonZeroUsize {
    let header = SegmentHeader::new(
        TransferId::new(u32::MAX),
        SegmentIndex::new(u8::MAX),
        u8::MAX,
        SenderId::new(u32::MAX),
        SendTimestamp::from_ticks(i64::MIN),
    );
    let header_bytes = encode_to_vec(header, config::standard()).unwrap_or_else(|err| {
        panic!("segment header encoding must be infallible for constants: {err}")
    });
    let overhead = SEGMENT_MAGIC.len() + size_of::<u16>() + header_bytes.len();
    NonZeroUsize::new(overhead).unwrap_or_else(|| {
        panic!("segment overhead must be non-zero (computed {overhead})");
    })
}

/// Encode a segment for transport by prefixing marker and header bytes.
///
/// The returned buffer layout is:
/// `[SEGMENT_MAGIC][u16 header_len][header bytes][segment payload]`.
///
/// # Errors
///
/// Returns an [`EncodeError`] if the header cannot be encoded.
pub fn encode_segment(segment: &Segment) -> Result<Vec<u8>, EncodeError> {
    let header_bytes = encode_to_vec(segment.header(), config::standard())?;
    let header_len = u16::try_from(header_bytes.len())
        .map_err(|_| EncodeError::Other("segment header length must fit within u16::MAX"))?;

    let payload = segment.payload();
    let mut buf =
        Vec::with_capacity(SEGMENT_MAGIC.len() + size_of::<u16>() + header_bytes.len() + payload.len());
    buf.extend_from_slice(SEGMENT_MAGIC);
    buf.extend_from_slice(&header_len.to_be_bytes());
    buf.extend_from_slice(&header_bytes);
    buf.extend_from_slice(payload);
    Ok(buf)
}

/// Attempt to decode a segment from a transport command payload.
///
/// Returns `Ok(Some(segment))` when `bytes` carries the segment marker and a
/// valid encoded header, `Ok(None)` when the marker is absent (the command
/// belongs to some other protocol feature), or an error if the marker is
/// present but decoding fails.
///
/// # Errors
///
/// Returns a [`DecodeError`] when the marker is present but the header bytes
/// cannot be decoded.
pub fn decode_segment(bytes: &[u8]) -> Result<Option<Segment>, DecodeError> {
    let minimum_len = SEGMENT_MAGIC.len() + size_of::<u16>();
    if bytes.len() < minimum_len {
        return Ok(None);
    }

    let Some(prefix) = bytes.get(..SEGMENT_MAGIC.len()) else {
        return Ok(None);
    };
    if prefix != SEGMENT_MAGIC {
        return Ok(None);
    }

    let len_offset = SEGMENT_MAGIC.len();
    let len_bytes = match (bytes.get(len_offset), bytes.get(len_offset + 1)) {
        (Some(a), Some(b)) => [*a, *b],
        _ => {
            return Err(DecodeError::UnexpectedEnd {
                additional: minimum_len - bytes.len(),
            });
        }
    };
    let header_len = usize::from(u16::from_be_bytes(len_bytes));
    let header_start = len_offset + size_of::<u16>();
    let header_end = header_start + header_len;

    let Some(header_bytes) = bytes.get(header_start..header_end) else {
        return Err(DecodeError::UnexpectedEnd {
            additional: header_end.saturating_sub(bytes.len()),
        });
    };

    let (header, consumed) =
        borrow_decode_from_slice::<SegmentHeader, _>(header_bytes, config::standard())?;
    if consumed != header_len {
        return Err(DecodeError::OtherString(
            "segment header length mismatch".to_string(),
        ));
    }

    let payload = bytes.get(header_end..).unwrap_or_default().to_vec();
    Ok(Some(Segment::new(header, payload)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> SegmentHeader {
        SegmentHeader::new(
            TransferId::new(9),
            SegmentIndex::new(2),
            3,
            SenderId::new(17),
            SendTimestamp::from_ticks(1_234_567),
        )
    }

    #[test]
    fn round_trip_segment() {
        let segment = Segment::new(sample_header(), vec![1, 2, 3, 4]);

        let encoded = encode_segment(&segment).expect("encode segment");
        let decoded = decode_segment(&encoded)
            .expect("decode segment")
            .expect("segment marker present");
        assert_eq!(decoded, segment);
    }

    #[test]
    fn decode_returns_none_for_foreign_payloads() {
        let bytes = [0_u8, 1, 2, 3, 4, 5, 6, 7];
        assert!(decode_segment(&bytes).expect("decode ok").is_none());
    }

    #[test]
    fn decode_returns_none_for_short_payloads() {
        assert!(decode_segment(b"CH").expect("decode ok").is_none());
    }

    #[test]
    fn segment_overhead_bounds_encoded_size() {
        let segment = Segment::new(sample_header(), Vec::new());
        let encoded = encode_segment(&segment).expect("encode segment");
        assert!(encoded.len() <= segment_overhead().get());
    }

    #[test]
    fn decode_rejects_truncated_header() {
        let header_bytes =
            encode_to_vec(sample_header(), config::standard()).expect("encode header");

        // Advertise a longer header than provided to force `UnexpectedEnd`.
        let advertised: u16 = (header_bytes.len() + 4)
            .try_into()
            .expect("advertised length fits in u16");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(SEGMENT_MAGIC);
        bytes.extend_from_slice(&advertised.to_be_bytes());
        bytes.extend_from_slice(&header_bytes);

        let err = decode_segment(&bytes).expect_err("expected decode failure");
        assert!(matches!(err, DecodeError::UnexpectedEnd { .. }));
    }

    #[test]
    fn decode_rejects_header_length_mismatch() {
        let mut header_bytes =
            encode_to_vec(sample_header(), config::standard()).expect("encode header");
        header_bytes.extend_from_slice(&[0_u8, 1]); // pad so advertised exceeds consumed
        let advertised: u16 = header_bytes
            .len()
            .try_into()
            .expect("padded length fits in u16");

        let mut bytes = Vec::new();
        bytes.extend_from_slice(SEGMENT_MAGIC);
        bytes.extend_from_slice(&advertised.to_be_bytes());
        bytes.extend_from_slice(&header_bytes);

        let err = decode_segment(&bytes).expect_err("expected decode failure");
        match err {
            DecodeError::OtherString(msg) => assert_eq!(msg, "segment header length mismatch"),
            other => panic!("expected length mismatch error, got {other:?}"),
        }
    }
}
