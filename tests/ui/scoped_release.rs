use byte_bitmap::{Bitmap, Context};

fn mark_multiples(bitmap: &mut Bitmap, step: i64) {
    let mut idx = 0;
    while idx < bitmap.bit_count() {
        bitmap.set(idx).unwrap();
        idx += step;
    }
}

fn main() {
    let mut ctx = Context::new();
    for bit_count in [1, 7, 8, 9, 64, 65] {
        let mut bitmap = ctx.create(bit_count).unwrap();
        mark_multiples(&mut bitmap, 3);
        assert_eq!(bitmap.first_set(), 0);
        assert_eq!(bitmap.last_set(), (bit_count - 1) / 3 * 3);
        // released here
    }
}
