use byte_bitmap::{Context, ErrorCode};

fn main() {
    let mut ctx = Context::with_limit(1024).unwrap();
    let mut bitmap = ctx.create(1024).unwrap();
    bitmap.set(1000).unwrap();
    assert_eq!(bitmap.next_set(0), Ok(1000));
    bitmap.release();

    assert!(ctx.create(1025).is_err());
    assert_eq!(ctx.get_error(), ErrorCode::OutOfRangeHigh);
}
