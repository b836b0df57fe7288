use byte_bitmap::{Bitmap, Context};

fn combinations(idx: i64, bitmap: &mut Bitmap, data: &mut [bool]) {
    if idx == bitmap.bit_count() {
        for (pick, slot) in bitmap.iter().zip(data.iter_mut()) {
            *slot = pick;
        }
        println!("{data:?}");
        return;
    }
    if bitmap.get(idx) == Ok(0) {
        bitmap.set(idx).unwrap();
        combinations(idx + 1, bitmap, data);
        bitmap.unset(idx).unwrap();
    }
    combinations(idx + 1, bitmap, data)
}

fn main() {
    const BIT_COUNT: i64 = 9;
    let mut ctx = Context::new();
    let mut bitmap = ctx.create(BIT_COUNT).unwrap();
    let mut my_data = [false; BIT_COUNT as usize];
    combinations(0, &mut bitmap, &mut my_data);
}
