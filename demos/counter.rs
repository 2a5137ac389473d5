//! Small end-to-end tour of the emitter: subscribe, emit, release.

use emitter::Emitter;

fn main() {
    let emitter = Emitter::<Vec<i32>>::new();

    let add1 = emitter.subscribe("add", |args| {
        println!("add1: {:?} -> {}", args, args.iter().sum::<i32>());
    });
    let add2 = emitter.subscribe("add", |args| {
        println!("add2: saw {} argument(s)", args.len());
    });

    emitter.emit("add", &vec![1, 2]);

    // Release the second subscriber; only add1 fires from here on.
    add2.release();
    emitter.emit("add", &vec![2, 3]);

    let mul = emitter.subscribe("mul", |args| {
        println!("mul: {:?} -> {}", args, args.iter().product::<i32>());
    });
    emitter.emit("mul", &vec![3, 4, 5]);

    // Emitting a name nobody subscribed to is a no-op.
    emitter.emit("sub", &vec![10, 4]);

    add1.release();
    mul.release();
    println!("live event names: {}", emitter.event_count());
}
