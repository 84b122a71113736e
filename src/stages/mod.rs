pub mod stage0_normalize;
pub mod stage1_chunk;
pub mod stage2_score;
pub mod stage3_aggregate;

pub use stage0_normalize::*;
pub use stage1_chunk::*;
pub use stage2_score::*;
pub use stage3_aggregate::*;
