use liblanesum::buffer::{AlignedBuffer, MisalignedBuffer};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Allocate an aligned buffer of `len` elements and fill it with values in [0, 1) drawn
/// from a ChaCha8 generator seeded with `seed`.
pub fn random_buffer(len: usize, seed: u64) -> anyhow::Result<AlignedBuffer> {
    let mut buffer = AlignedBuffer::new(len)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for value in buffer.as_mut_slice() {
        *value = rng.random();
    }
    Ok(buffer)
}

/// Copy `source` into a buffer whose base address deliberately breaks vector alignment.
pub fn misaligned_copy(source: &AlignedBuffer) -> anyhow::Result<MisalignedBuffer> {
    Ok(MisalignedBuffer::copy_of(source)?)
}
