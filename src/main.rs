// This binary crate is intentionally minimal.
// All dataset, simulation, and rendering logic lives in the library
// (src/lib.rs and its modules); the interactive surface is the studio binary.
fn main() {
    println!("netsketch: an interactive neural network teaching studio.");
    println!("Run `cargo run --bin studio` and open http://127.0.0.1:7878");
}
