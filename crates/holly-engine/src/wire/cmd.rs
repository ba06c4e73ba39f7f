/// Size in bytes of one submission burst (a vertex or a compiled header).
pub const BURST_SIZE: usize = 32;

/// Alignment the device mandates for any region bursts are read from.
pub const BURST_ALIGN: usize = 32;

/// One raw 32-byte burst as handed to the device.
pub type Burst = [u8; BURST_SIZE];

/// Command word of an ordinary strip vertex.
pub const CMD_VERTEX: u32 = 0xE000_0000;

/// Command word of a strip-terminating vertex. Exactly one per strip, and it
/// must be the strip's final vertex.
pub const CMD_VERTEX_EOL: u32 = 0xF000_0000;

/// Base command word of a compiled polygon header. The list kind and the
/// per-vertex format bits are OR'd in by the context compiler.
pub const CMD_POLYHDR: u32 = 0x8084_0000;
