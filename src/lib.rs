/// Use mimalloc as the global allocator.
/// The tally performs one small allocation per distinct word, which is
/// where mimalloc's thread-local caching pays off over glibc malloc.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod common;
pub mod wordfreq;
