use byte_bitmap::{Bitmap, Context, ErrorCode};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Set(i64),
    Unset(i64),
    Clear(i64),
}

// Strategy for a bit count together with a sequence of in-range operations
prop_compose! {
    fn arb_ops(max_bits: i64)
        (bit_count in 1..max_bits)
        (ops in prop::collection::vec(
            prop_oneof![
                (0..bit_count).prop_map(Op::Set),
                (0..bit_count).prop_map(Op::Unset),
                (0..bit_count).prop_map(Op::Clear),
            ],
            0..200,
        ), bit_count in Just(bit_count))
        -> (i64, Vec<Op>)
    {
        (bit_count, ops)
    }
}

// Strategy for a bitmap and the reference array it was built from
prop_compose! {
    fn arb_bitmap(max_bits: i64)
        (bit_count in 1..max_bits)
        (bits in prop::collection::vec(any::<bool>(), bit_count as usize))
        -> (Bitmap, Vec<bool>)
    {
        let mut ctx = Context::new();
        let mut bitmap = ctx.create(bits.len() as i64).unwrap();
        for (idx, bit) in (0..).zip(&bits) {
            if *bit {
                bitmap.set(idx).unwrap();
            }
        }
        (bitmap, bits)
    }
}

fn reference_ones(bits: &[bool]) -> Vec<i64> {
    (0..).zip(bits).filter(|(_, bit)| **bit).map(|(idx, _)| idx).collect()
}

proptest! {
    #[test]
    fn test_ops_match_reference((bit_count, ops) in arb_ops(300)) {
        let mut ctx = Context::new();
        let mut bitmap = ctx.create(bit_count).unwrap();
        let mut expected = vec![false; bit_count as usize];

        for op in ops {
            match op {
                Op::Set(idx) => {
                    prop_assert_eq!(ctx.set(&mut bitmap, idx), Ok(idx));
                    expected[idx as usize] = true;
                }
                Op::Unset(idx) => {
                    prop_assert_eq!(ctx.unset(&mut bitmap, idx), Ok(idx));
                    expected[idx as usize] ^= true;
                }
                Op::Clear(idx) => {
                    prop_assert_eq!(ctx.clear(&mut bitmap, idx), Ok(idx));
                    expected[idx as usize] = false;
                }
            }
            for (idx, bit) in (0..).zip(&expected) {
                prop_assert_eq!(
                    bitmap.get(idx),
                    Ok(u8::from(*bit)),
                    "Bit {} mismatch after {:?}",
                    idx, op
                );
            }
        }
        prop_assert_eq!(ctx.get_error(), ErrorCode::None);
    }

    #[test]
    fn test_scans_match_reference((bitmap, bits) in arb_bitmap(200)) {
        let ones = reference_ones(&bits);

        prop_assert_eq!(bitmap.first_set(), ones.first().copied().unwrap_or(0));
        prop_assert_eq!(bitmap.last_set(), ones.last().copied().unwrap_or(0));
        prop_assert_eq!(bitmap.is_empty(), ones.is_empty());
        prop_assert_eq!(bitmap.iter_ones().collect::<Vec<_>>(), ones.clone());
        prop_assert_eq!(bitmap.iter().collect::<Vec<_>>(), bits.clone());

        for from in 0..bitmap.bit_count() {
            let expected = ones.iter().copied().find(|idx| *idx > from).unwrap_or(from);
            prop_assert_eq!(bitmap.next_set(from), Ok(expected), "from = {}", from);
        }
    }

    #[test]
    fn test_out_of_range_is_rejected(bit_count in 1i64..100, offset in 0i64..1000) {
        let mut ctx = Context::new();
        let mut bitmap = ctx.create(bit_count).unwrap();

        prop_assert!(ctx.get(&bitmap, bit_count + offset).is_err());
        prop_assert_eq!(ctx.get_error(), ErrorCode::OutOfRangeHigh);
        prop_assert!(ctx.set(&mut bitmap, -1 - offset).is_err());
        prop_assert_eq!(ctx.get_error(), ErrorCode::OutOfRangeLow);
        prop_assert!(ctx.unset(&mut bitmap, bit_count + offset).is_err());
        prop_assert!(ctx.next_set(&bitmap, -1 - offset).is_err());
        prop_assert!(bitmap.is_empty());
    }

    #[test]
    fn test_byte_count_is_ceil(bit_count in 1i64..100_000) {
        let mut ctx = Context::new();
        let bitmap = ctx.create(bit_count).unwrap();
        prop_assert_eq!(bitmap.byte_count() as i64, (bit_count + 7) / 8);
    }
}
