use bytemuck::{Pod, Zeroable};

/// A compiled polygon header, opaque to callers once produced.
///
/// 32 bytes: the command word, three mode words, and four pad words the
/// device ignores for untextured geometry. Produced by
/// [`PolyContext::compile`](crate::poly::PolyContext::compile) and consumed
/// once per strip by the device.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct PolyHeader {
    pub cmd: u32,
    pub mode1: u32,
    pub mode2: u32,
    pub mode3: u32,
    pub d1: u32,
    pub d2: u32,
    pub d3: u32,
    pub d4: u32,
}

const _: () = assert!(size_of::<PolyHeader>() == super::cmd::BURST_SIZE);
