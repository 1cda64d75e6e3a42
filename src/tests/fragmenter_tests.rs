//! Tests for outbound fragmentation and segment batch helpers.

use std::num::NonZeroUsize;

use crate::{
    FragmentationError,
    Fragmenter,
    SegmentBatch,
    SegmentIndex,
    SendTimestamp,
    SenderId,
    TransferId,
};

const SENDER: SenderId = SenderId::new(7);

fn fragmenter(max_segment_size: usize) -> Fragmenter {
    Fragmenter::new(
        SENDER,
        NonZeroUsize::new(max_segment_size).expect("non-zero"),
    )
}

fn assert_segment(batch: &SegmentBatch, index: usize, payload: &[u8]) {
    let segment = batch
        .segments()
        .get(index)
        .expect("segment missing at requested index");
    assert_eq!(segment.payload(), payload);
    assert_eq!(
        segment.header().index(),
        SegmentIndex::try_from(index).expect("index fits in u8"),
    );
}

#[test]
fn splits_ten_byte_payload_into_three_segments() {
    let mut fragmenter = fragmenter(4);
    let payload: Vec<u8> = (0..10).collect();
    let sent_at = SendTimestamp::from_ticks(99);

    let batch = fragmenter
        .split_at(&payload, sent_at)
        .expect("split payload");

    assert_eq!(batch.len(), 3);
    assert_eq!(batch.transfer_id(), TransferId::new(0));
    assert_segment(&batch, 0, &[0, 1, 2, 3]);
    assert_segment(&batch, 1, &[4, 5, 6, 7]);
    assert_segment(&batch, 2, &[8, 9]);

    for segment in batch.segments() {
        assert_eq!(segment.header().total(), 3);
        assert_eq!(segment.header().sender_id(), SENDER);
        assert_eq!(segment.header().sent_at(), sent_at);
    }
}

#[test]
fn empty_payload_yields_empty_batch_and_still_advances_id() {
    let mut fragmenter = fragmenter(8);

    let batch = fragmenter.split(&[]).expect("split empty payload");
    assert!(batch.is_empty());
    assert_eq!(batch.len(), 0);
    assert_eq!(batch.transfer_id(), TransferId::new(0));

    let next = fragmenter.split(&[1]).expect("split next payload");
    assert_eq!(next.transfer_id(), TransferId::new(1));
}

#[test]
fn transfer_ids_advance_per_split() {
    let mut fragmenter = fragmenter(4);

    let first = fragmenter.split(&[1, 2, 3, 4, 5]).expect("first split");
    let second = fragmenter.split(&[9, 9, 9]).expect("second split");

    assert_eq!(first.transfer_id(), TransferId::new(0));
    assert_eq!(first.len(), 2);
    assert_eq!(second.transfer_id(), TransferId::new(1));
    assert_eq!(second.len(), 1);
}

#[test]
fn transfer_ids_wrap_before_u32_max() {
    let mut fragmenter = Fragmenter::with_starting_id(
        SENDER,
        NonZeroUsize::new(4).expect("non-zero"),
        TransferId::new(u32::MAX - 1),
    );

    let last = fragmenter.split(&[1]).expect("split at counter ceiling");
    assert_eq!(last.transfer_id(), TransferId::new(u32::MAX - 1));

    let wrapped = fragmenter.split(&[2]).expect("split after wraparound");
    assert_eq!(wrapped.transfer_id(), TransferId::new(0));
}

#[test]
fn payload_exceeding_segment_cap_is_rejected_without_consuming_id() {
    let mut fragmenter = fragmenter(1);
    let payload = vec![0_u8; 256];

    let err = fragmenter
        .split(&payload)
        .expect_err("256 one-byte segments must be rejected");
    assert_eq!(
        err,
        FragmentationError::TransferTooLarge {
            payload_len: 256,
            required: 256,
            max_segment_size: 1,
        },
    );

    let next = fragmenter.split(&[5]).expect("split after rejection");
    assert_eq!(next.transfer_id(), TransferId::new(0));
}

#[test]
fn payload_at_segment_cap_is_accepted_with_sequential_indices() {
    let mut fragmenter = fragmenter(1);
    let payload = vec![0_u8; 255];

    let batch = fragmenter.split(&payload).expect("255 segments fit");
    assert_eq!(batch.len(), 255);
    for (position, segment) in batch.segments().iter().enumerate() {
        assert_eq!(usize::from(segment.header().index()), position);
        assert_eq!(segment.header().total(), 255);
    }
    let last = batch.segments().last().expect("final segment");
    assert_eq!(last.header().index(), SegmentIndex::new(254));
}

#[test]
fn batch_into_iterator_yields_segments_in_index_order() {
    let mut fragmenter = fragmenter(2);
    let batch = fragmenter.split(&[1, 2, 3]).expect("split payload");

    let payloads: Vec<Vec<u8>> = batch
        .into_iter()
        .map(|segment| segment.payload().to_vec())
        .collect();
    assert_eq!(payloads, vec![vec![1, 2], vec![3]]);
}
